//! StandingRow: one line of a zone's ranking table (derived, never stored).

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Aggregated group-stage record for one team within its zone.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    /// 3 per win, 1 per draw.
    pub points: u32,
}

impl StandingRow {
    /// Empty row for a team with no played matches.
    pub fn new(team_id: TeamId, team: impl Into<String>) -> Self {
        Self {
            team_id,
            team: team.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Fold one played match into the row.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        if scored > conceded {
            self.won += 1;
            self.points += 3;
        } else if scored == conceded {
            self.drawn += 1;
            self.points += 1;
        } else {
            self.lost += 1;
        }
    }
}
