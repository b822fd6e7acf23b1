//! In-memory store implementation. Matches live in insertion order; teams are
//! sorted on read so listings are stable regardless of creation order.

use crate::models::{Match, MatchId, Phase, Team, TeamId, TournamentError};
use crate::store::TournamentStore;
use std::collections::HashMap;

/// In-memory implementation of [`TournamentStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    teams: Vec<Team>,
    matches: Vec<Match>,
    config: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn name_taken(&self, name: &str, except: Option<TeamId>) -> bool {
        self.teams
            .iter()
            .any(|t| Some(t.id) != except && t.name.eq_ignore_ascii_case(name))
    }
}

impl TournamentStore for MemoryStore {
    fn insert_team(&mut self, team: Team) -> Result<(), TournamentError> {
        if self.name_taken(&team.name, None) {
            return Err(TournamentError::DuplicateTeamName);
        }
        if self.color_in_use(&team.color) {
            return Err(TournamentError::DuplicateTeamColor);
        }
        self.teams.push(team);
        Ok(())
    }

    fn team(&self, id: TeamId) -> Option<Team> {
        self.teams.iter().find(|t| t.id == id).cloned()
    }

    fn teams(&self) -> Vec<Team> {
        let mut all = self.teams.clone();
        all.sort_by(|a, b| a.zone.cmp(&b.zone).then(a.name.cmp(&b.name)));
        all
    }

    fn teams_in_zone(&self, zone: &str) -> Vec<Team> {
        let mut in_zone: Vec<Team> = self
            .teams
            .iter()
            .filter(|t| t.zone == zone)
            .cloned()
            .collect();
        in_zone.sort_by(|a, b| a.name.cmp(&b.name));
        in_zone
    }

    fn update_team(&mut self, id: TeamId, name: &str, zone: &str) -> Result<Team, TournamentError> {
        if self.name_taken(name, Some(id)) {
            return Err(TournamentError::DuplicateTeamName);
        }
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::TeamNotFound(id))?;
        team.name = name.to_string();
        team.zone = zone.to_string();
        Ok(team.clone())
    }

    fn delete_team(&mut self, id: TeamId) -> Result<(), TournamentError> {
        if !self.teams.iter().any(|t| t.id == id) {
            return Err(TournamentError::TeamNotFound(id));
        }
        if self.team_referenced(id) {
            return Err(TournamentError::TeamInUse(id));
        }
        self.teams.retain(|t| t.id != id);
        Ok(())
    }

    fn team_referenced(&self, id: TeamId) -> bool {
        self.matches.iter().any(|m| m.references(id))
    }

    fn color_in_use(&self, color: &str) -> bool {
        self.teams.iter().any(|t| t.color.eq_ignore_ascii_case(color))
    }

    fn insert_matches(&mut self, matches: Vec<Match>) -> Result<(), TournamentError> {
        // Validate the whole batch before touching storage.
        for game in &matches {
            for team in [game.home, game.away, game.winner].into_iter().flatten() {
                if !self.teams.iter().any(|t| t.id == team) {
                    return Err(TournamentError::TeamNotFound(team));
                }
            }
        }
        self.matches.extend(matches);
        Ok(())
    }

    fn find_match(&self, id: MatchId) -> Option<Match> {
        self.matches.iter().find(|m| m.id == id).cloned()
    }

    fn update_match(&mut self, game: Match) -> Result<(), TournamentError> {
        for team in [game.home, game.away, game.winner].into_iter().flatten() {
            if !self.teams.iter().any(|t| t.id == team) {
                return Err(TournamentError::TeamNotFound(team));
            }
        }
        let stored = self
            .matches
            .iter_mut()
            .find(|m| m.id == game.id)
            .ok_or(TournamentError::MatchNotFound(game.id))?;
        *stored = game;
        Ok(())
    }

    fn matches(&self) -> Vec<Match> {
        self.matches.clone()
    }

    fn matches_in_phase(&self, phase: Phase) -> Vec<Match> {
        let mut in_phase: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| m.phase == phase)
            .cloned()
            .collect();
        in_phase.sort_by(|a, b| {
            a.zone
                .cmp(&b.zone)
                .then(a.matchday.cmp(&b.matchday))
                .then(a.slot.cmp(&b.slot))
        });
        in_phase
    }

    fn group_matches(&self, zone: &str) -> Vec<Match> {
        let mut in_zone: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| m.phase == Phase::Group && m.zone.as_deref() == Some(zone))
            .cloned()
            .collect();
        in_zone.sort_by_key(|m| m.matchday);
        in_zone
    }

    fn delete_group_matches(&mut self) {
        self.matches.retain(|m| m.phase != Phase::Group);
    }

    fn delete_knockout_matches(&mut self) {
        self.matches.retain(|m| m.phase == Phase::Group);
    }

    fn config_get(&self, key: &str) -> Option<String> {
        self.config.get(key).cloned()
    }

    fn config_set(&mut self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    fn config_delete(&mut self, key: &str) {
        self.config.remove(key);
    }

    fn clear_all(&mut self) {
        self.teams.clear();
        self.matches.clear();
        self.config.clear();
    }
}
