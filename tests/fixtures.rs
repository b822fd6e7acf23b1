//! Integration tests for fixture generation: round-robin construction and the
//! engine-level generation guards.

use cup_tournament_web::logic::round_robin;
use cup_tournament_web::{
    MemoryStore, TeamId, TournamentEngine, TournamentError, TournamentRules,
};
use std::collections::HashSet;
use uuid::Uuid;

fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn engine_with(zone_sizes: &[(&str, usize)], qualifiers: usize) -> TournamentEngine<MemoryStore> {
    let zones = zone_sizes.iter().map(|(z, _)| z.to_string()).collect();
    let rules = TournamentRules::with_zones(zones, qualifiers);
    let mut engine = TournamentEngine::new(MemoryStore::new(), rules);
    for (zone, n) in zone_sizes {
        for i in 0..*n {
            engine.add_team(&format!("{zone}{i}"), zone).unwrap();
        }
    }
    engine
}

#[test]
fn round_robin_covers_every_pair_exactly_once() {
    for n in 2..=8 {
        let teams = team_ids(n);
        let pairings = round_robin(&teams);
        assert_eq!(pairings.len(), n * (n - 1) / 2, "n = {n}");

        let mut seen: HashSet<(TeamId, TeamId)> = HashSet::new();
        let mut appearances = vec![0usize; n];
        for (_, home, away) in &pairings {
            assert_ne!(home, away, "self-pairing for n = {n}");
            let key = if home < away {
                (*home, *away)
            } else {
                (*away, *home)
            };
            assert!(seen.insert(key), "duplicate pair for n = {n}");
            for (i, t) in teams.iter().enumerate() {
                if t == home || t == away {
                    appearances[i] += 1;
                }
            }
        }
        for count in appearances {
            assert_eq!(count, n - 1, "each team meets every other, n = {n}");
        }
    }
}

#[test]
fn odd_team_count_sits_one_team_out_per_matchday() {
    let teams = team_ids(5);
    let pairings = round_robin(&teams);
    assert_eq!(pairings.len(), 10);
    // 5 teams pad to 6 slots: 5 matchdays of 2 real pairings each.
    for day in 1..=5u32 {
        let on_day: Vec<_> = pairings.iter().filter(|(d, _, _)| *d == day).collect();
        assert_eq!(on_day.len(), 2, "matchday {day}");
    }
}

#[test]
fn round_robin_is_stable_for_a_given_input_order() {
    let teams = team_ids(6);
    assert_eq!(round_robin(&teams), round_robin(&teams));
}

#[test]
fn round_robin_needs_two_teams() {
    assert!(round_robin(&team_ids(1)).is_empty());
    assert!(round_robin(&[]).is_empty());
}

#[test]
fn generate_requires_at_least_two_teams() {
    let mut engine = engine_with(&[("A", 1), ("B", 4)], 2);
    assert!(matches!(
        engine.generate_zone_fixtures("A"),
        Err(TournamentError::NotEnoughTeams { have: 1, need: 2, .. })
    ));
}

#[test]
fn generate_twice_never_duplicates_matches() {
    let mut engine = engine_with(&[("A", 4), ("B", 4)], 2);
    let first = engine.generate_zone_fixtures("A").unwrap();
    assert_eq!(first.len(), 6);
    assert!(matches!(
        engine.generate_zone_fixtures("A"),
        Err(TournamentError::FixturesAlreadyGenerated { .. })
    ));
    let group_a: Vec<_> = engine
        .matches()
        .into_iter()
        .filter(|m| m.zone.as_deref() == Some("A"))
        .collect();
    assert_eq!(group_a.len(), 6);
}

#[test]
fn generate_rejects_unknown_zone() {
    let mut engine = engine_with(&[("A", 4), ("B", 4)], 2);
    assert!(matches!(
        engine.generate_zone_fixtures("C"),
        Err(TournamentError::UnknownZone(_))
    ));
}
