//! Tournament engine: the state machine gating every mutation.
//!
//! Every operation goes through here; the engine delegates to the logic
//! modules (fixtures, standings, seeding, bracket) and persists through the
//! [`TournamentStore`] contract. Multi-step mutations (fixture generation,
//! seeding) validate fully before persisting, so an error never leaves a
//! half-written phase behind.

use crate::config::TournamentRules;
use crate::logic::bracket::{successor, BracketMatch, BracketRound, BracketSnapshot, Side};
use crate::logic::fixtures::round_robin;
use crate::logic::seeding::{seed_bracket, ZoneQualifiers};
use crate::logic::standings::compute_standings;
use crate::models::{
    Match, MatchId, Phase, StandingRow, Team, TeamId, TournamentError, TournamentState,
};
use crate::store::{
    TournamentStore, KEY_CURRENT_PHASE, KEY_GROUP_STAGE_LOCKED, KEY_TEAMS_LOCKED,
};
use rand::Rng;

/// The tournament engine over a persistence backend.
pub struct TournamentEngine<S: TournamentStore> {
    store: S,
    rules: TournamentRules,
}

impl<S: TournamentStore> TournamentEngine<S> {
    pub fn new(store: S, rules: TournamentRules) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &TournamentRules {
        &self.rules
    }

    /// Current state, read from the persisted `current_phase` flag.
    pub fn state(&self) -> TournamentState {
        self.store
            .config_get(KEY_CURRENT_PHASE)
            .and_then(|v| TournamentState::parse(&v))
            .unwrap_or_default()
    }

    fn set_state(&mut self, state: TournamentState) {
        self.store.config_set(KEY_CURRENT_PHASE, state.as_str());
    }

    fn teams_locked(&self) -> bool {
        self.store.config_get(KEY_TEAMS_LOCKED).as_deref() == Some("1")
    }

    fn group_stage_locked(&self) -> bool {
        self.store.config_get(KEY_GROUP_STAGE_LOCKED).as_deref() == Some("1")
    }

    // --- team management ---

    /// Add a team to a zone with a fresh unique color.
    pub fn add_team(&mut self, name: &str, zone: &str) -> Result<Team, TournamentError> {
        if self.teams_locked() {
            return Err(TournamentError::TeamsLocked);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidTeamName);
        }
        if !self.rules.has_zone(zone) {
            return Err(TournamentError::UnknownZone(zone.to_string()));
        }
        if self.store.teams_in_zone(zone).len() >= self.rules.max_teams_per_zone {
            return Err(TournamentError::ZoneFull {
                zone: zone.to_string(),
                capacity: self.rules.max_teams_per_zone,
            });
        }
        let color = self.unique_color();
        let team = Team::new(name, zone, color);
        self.store.insert_team(team.clone())?;
        log::info!(
            "team '{}' added to zone {} with color {}",
            team.name,
            team.zone,
            team.color
        );
        Ok(team)
    }

    /// Rename a team and/or move it to another zone. A zone move is rejected
    /// while any match references the team: the generated fixtures would no
    /// longer line up with either zone's team set.
    pub fn update_team(
        &mut self,
        id: TeamId,
        name: &str,
        zone: &str,
    ) -> Result<Team, TournamentError> {
        if self.teams_locked() {
            return Err(TournamentError::TeamsLocked);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidTeamName);
        }
        if !self.rules.has_zone(zone) {
            return Err(TournamentError::UnknownZone(zone.to_string()));
        }
        let current = self.store.team(id).ok_or(TournamentError::TeamNotFound(id))?;
        if current.zone != zone && self.store.team_referenced(id) {
            return Err(TournamentError::TeamInUse(id));
        }
        if current.zone != zone
            && self.store.teams_in_zone(zone).len() >= self.rules.max_teams_per_zone
        {
            return Err(TournamentError::ZoneFull {
                zone: zone.to_string(),
                capacity: self.rules.max_teams_per_zone,
            });
        }
        let team = self.store.update_team(id, name, zone)?;
        log::info!("team {} updated: name='{}', zone={}", id, name, zone);
        Ok(team)
    }

    /// Remove a team. Fails while any match references it.
    pub fn remove_team(&mut self, id: TeamId) -> Result<(), TournamentError> {
        if self.teams_locked() {
            return Err(TournamentError::TeamsLocked);
        }
        self.store.delete_team(id)?;
        log::info!("team {} removed", id);
        Ok(())
    }

    pub fn teams(&self) -> Vec<Team> {
        self.store.teams()
    }

    pub fn team(&self, id: TeamId) -> Option<Team> {
        self.store.team(id)
    }

    /// Random color not yet taken by any team. The space is 16M colors and
    /// team counts stay in the tens, so the retry loop terminates quickly.
    fn unique_color(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let color = format!("#{:06x}", rng.gen_range(0..=0xFF_FF_FFu32));
            if !self.store.color_in_use(&color) {
                return color;
            }
        }
    }

    // --- fixtures ---

    /// Generate a zone's round robin. Idempotency: a second call for the same
    /// zone fails rather than duplicating matches. The whole set is persisted
    /// atomically.
    pub fn generate_zone_fixtures(&mut self, zone: &str) -> Result<Vec<Match>, TournamentError> {
        match self.state() {
            TournamentState::Setup | TournamentState::GroupStage => {}
            _ => return Err(TournamentError::GroupStageLocked),
        }
        if !self.rules.has_zone(zone) {
            return Err(TournamentError::UnknownZone(zone.to_string()));
        }
        if !self.store.group_matches(zone).is_empty() {
            return Err(TournamentError::FixturesAlreadyGenerated {
                zone: zone.to_string(),
            });
        }
        let teams = self.store.teams_in_zone(zone);
        if teams.len() < 2 {
            return Err(TournamentError::NotEnoughTeams {
                zone: zone.to_string(),
                have: teams.len(),
                need: 2,
            });
        }
        let ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
        let matches: Vec<Match> = round_robin(&ids)
            .into_iter()
            .map(|(day, home, away)| Match::group(zone, day, home, away))
            .collect();
        self.store.insert_matches(matches.clone())?;
        log::info!(
            "generated {} fixtures for zone {} ({} teams)",
            matches.len(),
            zone,
            teams.len()
        );
        Ok(matches)
    }

    // --- standings ---

    /// Ranked table for a zone, recomputed from the match set on every call.
    pub fn get_standings(&self, zone: &str) -> Result<Vec<StandingRow>, TournamentError> {
        if !self.rules.has_zone(zone) {
            return Err(TournamentError::UnknownZone(zone.to_string()));
        }
        Ok(compute_standings(
            &self.store.teams_in_zone(zone),
            &self.store.group_matches(zone),
        ))
    }

    // --- results ---

    /// Record (or correct) a match result.
    ///
    /// Group matches accept draws and stay editable until the knockout phase
    /// starts. Knockout matches reject draws, resolve a winner, and write it
    /// into the successor slot; a changed result re-propagates and invalidates
    /// any downstream results that used the stale team.
    pub fn record_result(
        &mut self,
        id: MatchId,
        home_goals: u32,
        away_goals: u32,
    ) -> Result<Match, TournamentError> {
        let state = self.state();
        if state == TournamentState::ChampionDecided {
            return Err(TournamentError::TournamentOver);
        }
        let mut game = self
            .store
            .find_match(id)
            .ok_or(TournamentError::MatchNotFound(id))?;

        if game.phase == Phase::Group {
            if self.group_stage_locked() {
                return Err(TournamentError::GroupStageLocked);
            }
            if state != TournamentState::GroupStage {
                return Err(TournamentError::InvalidState);
            }
            let (Some(home), Some(away)) = (game.home, game.away) else {
                return Err(TournamentError::MatchNotReady(id));
            };
            game.home_goals = Some(home_goals);
            game.away_goals = Some(away_goals);
            game.winner = if home_goals > away_goals {
                Some(home)
            } else if away_goals > home_goals {
                Some(away)
            } else {
                None
            };
            self.store.update_match(game.clone())?;
            log::info!(
                "group result recorded: {:?} matchday {:?}, {}-{}",
                game.zone,
                game.matchday,
                home_goals,
                away_goals
            );
            Ok(game)
        } else {
            if !state.has_reached(game.phase) {
                return Err(TournamentError::PhaseNotStarted(game.phase));
            }
            if home_goals == away_goals {
                return Err(TournamentError::KnockoutDraw);
            }
            let (Some(home), Some(away)) = (game.home, game.away) else {
                return Err(TournamentError::MatchNotReady(id));
            };
            let winner = if home_goals > away_goals { home } else { away };
            game.home_goals = Some(home_goals);
            game.away_goals = Some(away_goals);
            game.winner = Some(winner);
            self.store.update_match(game.clone())?;
            log::info!(
                "knockout result recorded: {:?} slot {:?}, {}-{}",
                game.phase,
                game.slot,
                home_goals,
                away_goals
            );
            self.propagate(&game)?;
            Ok(game)
        }
    }

    /// Write the winner into the successor slot. When the slot already held a
    /// different team and the successor was decided, the stale result is
    /// cleared and the invalidation cascades downstream.
    fn propagate(&mut self, game: &Match) -> Result<(), TournamentError> {
        let (Some(winner), Some(slot)) = (game.winner, game.slot) else {
            return Ok(());
        };
        let Some((next, next_slot, side)) = successor(game.phase, slot) else {
            return Ok(()); // the final: its winner is the champion
        };
        let mut succ = self
            .find_knockout(next, next_slot)
            .ok_or(TournamentError::BracketSlotMissing {
                phase: next,
                slot: next_slot,
            })?;
        let occupant = match side {
            Side::Home => succ.home,
            Side::Away => succ.away,
        };
        if occupant == Some(winner) {
            return Ok(());
        }
        let had_result = succ.is_scored();
        match side {
            Side::Home => succ.home = Some(winner),
            Side::Away => succ.away = Some(winner),
        }
        if had_result {
            succ.clear_score();
            log::warn!(
                "result of {:?} slot {} invalidated by a corrected feeder",
                next,
                next_slot
            );
        }
        self.store.update_match(succ)?;
        if had_result {
            self.retract(next, next_slot)?;
        }
        Ok(())
    }

    /// Clear the successor slot fed by (phase, slot), cascading through any
    /// decided matches downstream.
    fn retract(&mut self, phase: Phase, slot: u32) -> Result<(), TournamentError> {
        let Some((next, next_slot, side)) = successor(phase, slot) else {
            return Ok(());
        };
        let Some(mut succ) = self.find_knockout(next, next_slot) else {
            return Ok(());
        };
        let occupant = match side {
            Side::Home => succ.home.take(),
            Side::Away => succ.away.take(),
        };
        if occupant.is_none() {
            return Ok(());
        }
        let had_result = succ.is_scored();
        if had_result {
            succ.clear_score();
            log::warn!(
                "result of {:?} slot {} invalidated by a corrected feeder",
                next,
                next_slot
            );
        }
        self.store.update_match(succ)?;
        if had_result {
            self.retract(next, next_slot)?;
        }
        Ok(())
    }

    fn find_knockout(&self, phase: Phase, slot: u32) -> Option<Match> {
        self.store
            .matches_in_phase(phase)
            .into_iter()
            .find(|m| m.slot == Some(slot))
    }

    // --- phase transitions ---

    /// Validate the guard for the current state and perform the transition.
    /// No phase is ever skipped; each guard failure names the unmet
    /// precondition.
    pub fn advance_phase(&mut self) -> Result<TournamentState, TournamentError> {
        match self.state() {
            TournamentState::Setup => self.start_group_stage(),
            TournamentState::GroupStage => self.start_knockout(),
            TournamentState::RoundOf16 => self.advance_knockout(Phase::RoundOf16),
            TournamentState::Quarterfinal => self.advance_knockout(Phase::Quarterfinal),
            TournamentState::Semifinal => self.advance_knockout(Phase::Semifinal),
            TournamentState::Final => self.advance_knockout(Phase::Final),
            TournamentState::ChampionDecided => Err(TournamentError::TournamentOver),
        }
    }

    /// Setup -> GroupStage: every zone staffed and with generated fixtures.
    /// Locks the team list.
    fn start_group_stage(&mut self) -> Result<TournamentState, TournamentError> {
        let need = self.rules.min_teams_per_zone();
        for zone in self.rules.zones.clone() {
            let have = self.store.teams_in_zone(&zone).len();
            if have < need {
                return Err(TournamentError::NotEnoughTeams { zone, have, need });
            }
            if self.store.group_matches(&zone).is_empty() {
                return Err(TournamentError::FixturesMissing { zone });
            }
        }
        self.store.config_set(KEY_TEAMS_LOCKED, "1");
        self.set_state(TournamentState::GroupStage);
        log::info!("group stage started; team list locked");
        Ok(TournamentState::GroupStage)
    }

    /// GroupStage -> opening knockout round: every group match scored. Locks
    /// group results, computes standings per zone, seeds the bracket. The
    /// whole bracket is persisted in one batch, so a seeding error leaves no
    /// partial round behind.
    fn start_knockout(&mut self) -> Result<TournamentState, TournamentError> {
        if self
            .store
            .matches_in_phase(Phase::Group)
            .iter()
            .any(|m| !m.is_scored())
        {
            return Err(TournamentError::IncompleteResults { phase: Phase::Group });
        }

        let q = self.rules.qualifiers_per_zone;
        let mut qualifiers = Vec::with_capacity(self.rules.zones.len());
        for zone in self.rules.zones.clone() {
            let table = self.get_standings(&zone)?;
            if table.len() < q {
                return Err(TournamentError::NotEnoughTeams {
                    zone,
                    have: table.len(),
                    need: q,
                });
            }
            log::debug!(
                "zone {} qualifiers: {:?}",
                zone,
                table[..q].iter().map(|r| r.team.as_str()).collect::<Vec<_>>()
            );
            qualifiers.push(ZoneQualifiers {
                zone,
                teams: table[..q].iter().map(|r| r.team_id).collect(),
            });
        }

        let bracket = seed_bracket(&qualifiers)?;
        let opening = bracket
            .first()
            .map(|m| m.phase)
            .ok_or(TournamentError::QualifierCountMismatch { total: 0 })?;
        self.store.insert_matches(bracket)?;
        self.store.config_set(KEY_GROUP_STAGE_LOCKED, "1");
        let state = TournamentState::for_phase(opening);
        self.set_state(state);
        log::info!("group stage locked; knockout opens at {:?}", opening);
        Ok(state)
    }

    /// Knockout round -> next round (or ChampionDecided after the final):
    /// every match of the current round must be decided.
    fn advance_knockout(&mut self, phase: Phase) -> Result<TournamentState, TournamentError> {
        if self
            .store
            .matches_in_phase(phase)
            .iter()
            .any(|m| !m.is_decided())
        {
            return Err(TournamentError::IncompleteResults { phase });
        }
        let state = match phase.next_knockout() {
            Some(next) => TournamentState::for_phase(next),
            None => TournamentState::ChampionDecided,
        };
        self.set_state(state);
        log::info!("{:?} complete; advancing to {:?}", phase, state);
        Ok(state)
    }

    // --- views ---

    pub fn matches(&self) -> Vec<Match> {
        self.store.matches()
    }

    /// Snapshot of the elimination tree with team references resolved.
    pub fn get_bracket(&self) -> BracketSnapshot {
        let mut rounds = Vec::new();
        for phase in Phase::KNOCKOUT {
            let in_phase = self.store.matches_in_phase(phase);
            if in_phase.is_empty() {
                continue;
            }
            let matches = in_phase
                .iter()
                .map(|m| BracketMatch {
                    id: m.id,
                    slot: m.slot.unwrap_or(0),
                    home: self.resolve(m.home),
                    away: self.resolve(m.away),
                    home_goals: m.home_goals,
                    away_goals: m.away_goals,
                    winner: self.resolve(m.winner),
                })
                .collect();
            rounds.push(BracketRound { phase, matches });
        }
        BracketSnapshot {
            rounds,
            champion: self.get_champion(),
        }
    }

    /// The final match's winner, once decided.
    pub fn get_champion(&self) -> Option<Team> {
        self.store
            .matches_in_phase(Phase::Final)
            .first()
            .and_then(|m| m.winner)
            .and_then(|id| self.store.team(id))
    }

    fn resolve(&self, id: Option<TeamId>) -> Option<Team> {
        id.and_then(|i| self.store.team(i))
    }

    // --- resets ---

    /// Unlock the team list again. Only possible right after the group stage
    /// started, before any result is in; the generated fixtures are discarded
    /// because team edits would invalidate them.
    pub fn unlock_teams(&mut self) -> Result<(), TournamentError> {
        if self.state() != TournamentState::GroupStage {
            return Err(TournamentError::InvalidState);
        }
        if self
            .store
            .matches_in_phase(Phase::Group)
            .iter()
            .any(|m| m.is_scored())
        {
            return Err(TournamentError::InvalidState);
        }
        self.store.delete_group_matches();
        self.store.config_delete(KEY_TEAMS_LOCKED);
        self.set_state(TournamentState::Setup);
        log::warn!("team list unlocked; generated fixtures discarded");
        Ok(())
    }

    /// Wipe all group results (and any knockout matches built on them) and
    /// reopen the group stage.
    pub fn reset_group_stage(&mut self) -> Result<(), TournamentError> {
        if self.state() == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        for mut game in self.store.matches_in_phase(Phase::Group) {
            game.clear_score();
            self.store.update_match(game)?;
        }
        self.store.delete_knockout_matches();
        self.store.config_delete(KEY_GROUP_STAGE_LOCKED);
        self.set_state(TournamentState::GroupStage);
        log::warn!("group-stage results reset; knockout bracket discarded");
        Ok(())
    }

    /// Discard the knockout bracket and return to the (completed) group
    /// stage, e.g. to re-run seeding after a group-result correction.
    pub fn reset_knockout(&mut self) -> Result<(), TournamentError> {
        if self.state().knockout_phase().is_none()
            && self.state() != TournamentState::ChampionDecided
        {
            return Err(TournamentError::InvalidState);
        }
        self.store.delete_knockout_matches();
        self.store.config_delete(KEY_GROUP_STAGE_LOCKED);
        self.set_state(TournamentState::GroupStage);
        log::warn!("knockout bracket reset");
        Ok(())
    }

    /// Destructive full reset: teams, matches, and all state flags.
    pub fn reset_all(&mut self) {
        self.store.clear_all();
        log::warn!("all tournament data wiped");
    }
}
