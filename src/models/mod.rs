//! Data structures for the cup tournament: teams, matches, standings, state.

mod game;
mod standings;
mod team;
mod tournament;

pub use game::{Match, MatchId, Phase};
pub use standings::StandingRow;
pub use team::{Team, TeamId};
pub use tournament::{TournamentError, TournamentState};
