//! Tournament logic: fixture generation, standings, seeding, bracket tree.

pub mod bracket;
pub mod fixtures;
pub mod seeding;
pub mod standings;

pub use bracket::{successor, BracketMatch, BracketRound, BracketSnapshot, Side};
pub use fixtures::round_robin;
pub use seeding::{seed_bracket, ZoneQualifiers};
pub use standings::compute_standings;
