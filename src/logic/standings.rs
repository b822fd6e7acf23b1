//! Standings computation: a pure function of a zone's match set.

use crate::models::{Match, StandingRow, Team, TeamId};
use std::collections::HashMap;

/// Compute the ranked table for a zone.
///
/// Every team gets a row, all zeros when it has not played. Unscored matches
/// are ignored, so the table is valid at any point of the group stage.
///
/// Ranking: points, then goal difference, then goals for, all descending.
/// Remaining ties break on team name ascending so the order is total and the
/// function is deterministic (no head-to-head lookup; see DESIGN.md).
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = teams
        .iter()
        .map(|t| StandingRow::new(t.id, t.name.clone()))
        .collect();
    let index: HashMap<TeamId, usize> = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    for m in matches {
        let (Some(home), Some(away)) = (m.home, m.away) else {
            continue;
        };
        let (Some(hg), Some(ag)) = (m.home_goals, m.away_goals) else {
            continue;
        };
        // Skip matches referencing teams outside this zone's list.
        let (Some(&hi), Some(&ai)) = (index.get(&home), index.get(&away)) else {
            continue;
        };
        rows[hi].record(hg, ag);
        rows[ai].record(ag, hg);
    }

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(a.team.cmp(&b.team))
    });
    rows
}
