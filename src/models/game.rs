//! Match and Phase: group-stage and knockout games.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Phase of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Group,
    #[serde(rename = "round_of_16")]
    RoundOf16,
    Quarterfinal,
    Semifinal,
    Final,
}

impl Phase {
    /// Knockout phases in bracket order.
    pub const KNOCKOUT: [Phase; 4] = [
        Phase::RoundOf16,
        Phase::Quarterfinal,
        Phase::Semifinal,
        Phase::Final,
    ];

    pub fn is_knockout(self) -> bool {
        self != Phase::Group
    }

    /// The knockout phase that follows this one (None for Group and Final).
    pub fn next_knockout(self) -> Option<Phase> {
        match self {
            Phase::RoundOf16 => Some(Phase::Quarterfinal),
            Phase::Quarterfinal => Some(Phase::Semifinal),
            Phase::Semifinal => Some(Phase::Final),
            Phase::Group | Phase::Final => None,
        }
    }

    /// Opening knockout phase for a total qualifier count. The bracket always
    /// runs through to the final, so smaller fields enter at a later phase.
    pub fn opening_round(qualifiers: usize) -> Option<Phase> {
        match qualifiers {
            16 => Some(Phase::RoundOf16),
            8 => Some(Phase::Quarterfinal),
            4 => Some(Phase::Semifinal),
            2 => Some(Phase::Final),
            _ => None,
        }
    }
}

/// A single match.
///
/// Group matches always reference both teams; knockout matches may have open
/// slots until the feeding match of the previous phase is decided. Scores are
/// both present or both absent. `winner` is None only for unscored matches
/// and group-stage draws; a scored knockout match always has a winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub phase: Phase,
    /// Zone name (group matches only).
    pub zone: Option<String>,
    /// Round-robin matchday, 1-based (group matches only).
    pub matchday: Option<u32>,
    /// Bracket position within the phase, 0-based (knockout matches only).
    pub slot: Option<u32>,
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub winner: Option<TeamId>,
}

impl Match {
    /// A group-stage match with both teams assigned up front.
    pub fn group(zone: impl Into<String>, matchday: u32, home: TeamId, away: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Group,
            zone: Some(zone.into()),
            matchday: Some(matchday),
            slot: None,
            home: Some(home),
            away: Some(away),
            home_goals: None,
            away_goals: None,
            winner: None,
        }
    }

    /// A knockout placeholder match: both slots open until feeders decide.
    pub fn knockout(phase: Phase, slot: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase,
            zone: None,
            matchday: None,
            slot: Some(slot),
            home: None,
            away: None,
            home_goals: None,
            away_goals: None,
            winner: None,
        }
    }

    /// A knockout match with both teams already assigned (opening round).
    pub fn knockout_seeded(phase: Phase, slot: u32, home: TeamId, away: TeamId) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
            ..Self::knockout(phase, slot)
        }
    }

    /// Both goal counts entered.
    pub fn is_scored(&self) -> bool {
        self.home_goals.is_some() && self.away_goals.is_some()
    }

    /// Decided: scored, and for knockout matches the winner is resolved.
    pub fn is_decided(&self) -> bool {
        if self.phase.is_knockout() {
            self.is_scored() && self.winner.is_some()
        } else {
            self.is_scored()
        }
    }

    /// Whether the match references the given team in any role.
    pub fn references(&self, team: TeamId) -> bool {
        self.home == Some(team) || self.away == Some(team) || self.winner == Some(team)
    }

    /// Remove the score and resolved winner (used when a correction upstream
    /// invalidates this result).
    pub fn clear_score(&mut self) {
        self.home_goals = None;
        self.away_goals = None;
        self.winner = None;
    }
}
