//! TournamentState and TournamentError.

use crate::models::game::{MatchId, Phase};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Errors that can occur during tournament operations.
///
/// All of these are recoverable conditions returned to the caller for
/// user-facing messaging; none are fatal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// The generated display color is already taken.
    DuplicateTeamColor,
    /// Team name is empty after trimming.
    InvalidTeamName,
    /// The zone is not one of the configured zones.
    UnknownZone(String),
    /// The zone already holds the maximum number of teams.
    ZoneFull { zone: String, capacity: usize },
    /// Team not found in the store.
    TeamNotFound(TeamId),
    /// The team is referenced by at least one match and cannot be removed.
    TeamInUse(TeamId),
    /// The team list is locked (group stage has started).
    TeamsLocked,
    /// Group-stage results are locked (knockout has started).
    GroupStageLocked,
    /// A zone has fewer teams than the operation requires.
    NotEnoughTeams { zone: String, have: usize, need: usize },
    /// The zone's round robin has already been generated.
    FixturesAlreadyGenerated { zone: String },
    /// The zone has no generated fixtures yet.
    FixturesMissing { zone: String },
    /// Not every match of the phase has a result.
    IncompleteResults { phase: Phase },
    /// Match not found in the store.
    MatchNotFound(MatchId),
    /// One or both of the match's team slots are still unresolved.
    MatchNotReady(MatchId),
    /// The bracket holds no match at the expected (phase, slot) position.
    BracketSlotMissing { phase: Phase, slot: u32 },
    /// A draw was entered for a knockout match.
    KnockoutDraw,
    /// The match belongs to a knockout phase the bracket has not reached.
    PhaseNotStarted(Phase),
    /// Total qualifier count does not fit a bracket (power of two, 2..=16).
    QualifierCountMismatch { total: usize },
    /// The cross-zone pairing rule cannot be satisfied with this layout.
    SeedingInfeasible { zones: usize, qualifiers_per_zone: usize },
    /// The champion is decided; no further mutation is permitted.
    TournamentOver,
    /// Tournament is not in a state that allows this action.
    InvalidState,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::DuplicateTeamColor => write!(f, "The team color is already in use"),
            TournamentError::InvalidTeamName => write!(f, "Team name must not be empty"),
            TournamentError::UnknownZone(zone) => write!(f, "Unknown zone '{}'", zone),
            TournamentError::ZoneFull { zone, capacity } => {
                write!(f, "Zone {} already has the maximum of {} teams", zone, capacity)
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::TeamInUse(_) => {
                write!(f, "Team is referenced by existing matches and cannot be removed")
            }
            TournamentError::TeamsLocked => {
                write!(f, "The team list is locked: the group stage has started")
            }
            TournamentError::GroupStageLocked => {
                write!(f, "Group results are locked: the knockout phase has started")
            }
            TournamentError::NotEnoughTeams { zone, have, need } => {
                write!(f, "Zone {} has {} teams but needs at least {}", zone, have, need)
            }
            TournamentError::FixturesAlreadyGenerated { zone } => {
                write!(f, "Fixtures for zone {} have already been generated", zone)
            }
            TournamentError::FixturesMissing { zone } => {
                write!(f, "Zone {} has no generated fixtures", zone)
            }
            TournamentError::IncompleteResults { phase } => {
                write!(f, "Not every match of {:?} has a result", phase)
            }
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match is waiting on a previous round's winner")
            }
            TournamentError::BracketSlotMissing { phase, slot } => {
                write!(f, "The bracket has no match at {:?} slot {}", phase, slot)
            }
            TournamentError::KnockoutDraw => {
                write!(f, "Knockout matches cannot end in a draw")
            }
            TournamentError::PhaseNotStarted(phase) => {
                write!(f, "The bracket has not reached {:?} yet", phase)
            }
            TournamentError::QualifierCountMismatch { total } => {
                write!(f, "{} qualifiers do not fit a knockout bracket", total)
            }
            TournamentError::SeedingInfeasible { zones, qualifiers_per_zone } => {
                write!(
                    f,
                    "Cross-zone seeding is not possible with {} zones of {} qualifiers",
                    zones, qualifiers_per_zone
                )
            }
            TournamentError::TournamentOver => {
                write!(f, "The champion is decided; the tournament is over")
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
        }
    }
}

/// Current phase of the tournament.
///
/// Ordering follows tournament progress, so later states compare greater.
#[derive(
    Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Team management and fixture generation; nothing locked.
    #[default]
    Setup,
    /// Round-robin results being entered; team list locked.
    GroupStage,
    #[serde(rename = "round_of_16")]
    RoundOf16,
    Quarterfinal,
    Semifinal,
    Final,
    /// Terminal: the final is decided and no further mutation is allowed.
    ChampionDecided,
}

impl TournamentState {
    /// String form used in the persisted config key-value store.
    pub fn as_str(self) -> &'static str {
        match self {
            TournamentState::Setup => "setup",
            TournamentState::GroupStage => "group_stage",
            TournamentState::RoundOf16 => "round_of_16",
            TournamentState::Quarterfinal => "quarterfinal",
            TournamentState::Semifinal => "semifinal",
            TournamentState::Final => "final",
            TournamentState::ChampionDecided => "champion_decided",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "setup" => Some(TournamentState::Setup),
            "group_stage" => Some(TournamentState::GroupStage),
            "round_of_16" => Some(TournamentState::RoundOf16),
            "quarterfinal" => Some(TournamentState::Quarterfinal),
            "semifinal" => Some(TournamentState::Semifinal),
            "final" => Some(TournamentState::Final),
            "champion_decided" => Some(TournamentState::ChampionDecided),
            _ => None,
        }
    }

    /// State in which matches of the given phase are played.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Group => TournamentState::GroupStage,
            Phase::RoundOf16 => TournamentState::RoundOf16,
            Phase::Quarterfinal => TournamentState::Quarterfinal,
            Phase::Semifinal => TournamentState::Semifinal,
            Phase::Final => TournamentState::Final,
        }
    }

    /// The knockout phase currently in play, if any.
    pub fn knockout_phase(self) -> Option<Phase> {
        match self {
            TournamentState::RoundOf16 => Some(Phase::RoundOf16),
            TournamentState::Quarterfinal => Some(Phase::Quarterfinal),
            TournamentState::Semifinal => Some(Phase::Semifinal),
            TournamentState::Final => Some(Phase::Final),
            _ => None,
        }
    }

    /// Whether the bracket has reached the given knockout phase. Matches of
    /// reached phases may still be corrected.
    pub fn has_reached(self, phase: Phase) -> bool {
        self >= TournamentState::for_phase(phase)
    }
}
