//! Persistence boundary: the narrow data-access contract the engine consumes.
//!
//! The store is pure data access with uniqueness and referential-integrity
//! enforcement; all tournament rules live in the engine and logic modules.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Match, MatchId, Phase, Team, TeamId, TournamentError};

/// Config keys for the persisted state-machine flags.
pub const KEY_TEAMS_LOCKED: &str = "teams_locked";
pub const KEY_GROUP_STAGE_LOCKED: &str = "group_stage_locked";
pub const KEY_CURRENT_PHASE: &str = "current_phase";

/// Data-access contract for teams, matches, and the config key-value store.
pub trait TournamentStore {
    // --- teams ---

    /// Insert a team. Name (case-insensitive) and color must be unique.
    fn insert_team(&mut self, team: Team) -> Result<(), TournamentError>;
    fn team(&self, id: TeamId) -> Option<Team>;
    /// All teams, ordered by (zone, name).
    fn teams(&self) -> Vec<Team>;
    /// Teams of one zone, ordered by name.
    fn teams_in_zone(&self, zone: &str) -> Vec<Team>;
    /// Rename / move a team; same uniqueness rules as insert.
    fn update_team(&mut self, id: TeamId, name: &str, zone: &str) -> Result<Team, TournamentError>;
    /// Delete a team. Rejected with `TeamInUse` while any match references it.
    fn delete_team(&mut self, id: TeamId) -> Result<(), TournamentError>;
    /// Whether any match references the team in any role.
    fn team_referenced(&self, id: TeamId) -> bool;
    fn color_in_use(&self, color: &str) -> bool;

    // --- matches ---

    /// Insert a batch of matches, all or nothing. Every referenced team must
    /// exist; on any error no match of the batch is persisted.
    fn insert_matches(&mut self, matches: Vec<Match>) -> Result<(), TournamentError>;
    fn find_match(&self, id: MatchId) -> Option<Match>;
    fn update_match(&mut self, game: Match) -> Result<(), TournamentError>;
    /// All matches in insertion order.
    fn matches(&self) -> Vec<Match>;
    /// Matches of one phase: group matches by (zone, matchday), knockout
    /// matches by slot.
    fn matches_in_phase(&self, phase: Phase) -> Vec<Match>;
    /// Group matches of one zone, by matchday.
    fn group_matches(&self, zone: &str) -> Vec<Match>;
    fn delete_group_matches(&mut self);
    fn delete_knockout_matches(&mut self);

    // --- config ---

    fn config_get(&self, key: &str) -> Option<String>;
    fn config_set(&mut self, key: &str, value: &str);
    fn config_delete(&mut self, key: &str);

    /// Wipe everything: teams, matches, config.
    fn clear_all(&mut self);
}
