//! Knockout cup tournament web app: library with models, engine, and store.

pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod store;

pub use config::TournamentRules;
pub use engine::TournamentEngine;
pub use logic::{BracketMatch, BracketRound, BracketSnapshot};
pub use models::{
    Match, MatchId, Phase, StandingRow, Team, TeamId, TournamentError, TournamentState,
};
pub use store::{MemoryStore, TournamentStore};
