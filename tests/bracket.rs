//! Integration tests for bracket seeding and the successor mapping.

use cup_tournament_web::logic::bracket::{successor, Side};
use cup_tournament_web::logic::seeding::ZoneQualifiers;
use cup_tournament_web::logic::seed_bracket;
use cup_tournament_web::{Phase, TeamId, TournamentError};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn zone_qualifiers(layout: &[(&str, usize)]) -> Vec<ZoneQualifiers> {
    layout
        .iter()
        .map(|(zone, q)| ZoneQualifiers {
            zone: zone.to_string(),
            teams: (0..*q).map(|_| Uuid::new_v4()).collect(),
        })
        .collect()
}

fn zone_of(zones: &[ZoneQualifiers]) -> HashMap<TeamId, String> {
    zones
        .iter()
        .flat_map(|z| z.teams.iter().map(|t| (*t, z.zone.clone())))
        .collect()
}

#[test]
fn seeding_never_pairs_same_zone_in_opening_round() {
    for layout in [
        vec![("A", 2), ("B", 2)],
        vec![("A", 4), ("B", 4)],
        vec![("A", 8), ("B", 8)],
        vec![("A", 2), ("B", 2), ("C", 2), ("D", 2)],
        vec![("A", 4), ("B", 4), ("C", 4), ("D", 4)],
        vec![("A", 1), ("B", 1), ("C", 1), ("D", 1)],
    ] {
        let zones = zone_qualifiers(&layout);
        let membership = zone_of(&zones);
        let total: usize = layout.iter().map(|(_, q)| q).sum();
        let opening = Phase::opening_round(total).unwrap();

        let bracket = seed_bracket(&zones).unwrap();
        let opening_matches: Vec<_> =
            bracket.iter().filter(|m| m.phase == opening).collect();
        assert_eq!(opening_matches.len(), total / 2, "layout {layout:?}");

        let mut used: HashSet<TeamId> = HashSet::new();
        for m in &opening_matches {
            let home = m.home.unwrap();
            let away = m.away.unwrap();
            assert_ne!(
                membership[&home], membership[&away],
                "same-zone pairing in {layout:?}"
            );
            assert!(used.insert(home), "qualifier used twice in {layout:?}");
            assert!(used.insert(away), "qualifier used twice in {layout:?}");
        }
        assert_eq!(used.len(), total);
    }
}

#[test]
fn two_zone_cross_pairs_rank_one_against_rank_two() {
    let zones = zone_qualifiers(&[("A", 2), ("B", 2)]);
    let bracket = seed_bracket(&zones).unwrap();
    let opening: Vec<_> = bracket
        .iter()
        .filter(|m| m.phase == Phase::Semifinal)
        .collect();
    assert_eq!(opening.len(), 2);
    // Slot 0: A rank 1 vs B rank 2; slot 1: B rank 1 vs A rank 2.
    assert_eq!(opening[0].home, Some(zones[0].teams[0]));
    assert_eq!(opening[0].away, Some(zones[1].teams[1]));
    assert_eq!(opening[1].home, Some(zones[1].teams[0]));
    assert_eq!(opening[1].away, Some(zones[0].teams[1]));
}

#[test]
fn bracket_includes_placeholder_rounds_down_to_the_final() {
    let zones = zone_qualifiers(&[("A", 4), ("B", 4)]);
    let bracket = seed_bracket(&zones).unwrap();
    assert_eq!(bracket.len(), 7); // 4 QF + 2 SF + 1 F

    let count = |phase| bracket.iter().filter(|m| m.phase == phase).count();
    assert_eq!(count(Phase::Quarterfinal), 4);
    assert_eq!(count(Phase::Semifinal), 2);
    assert_eq!(count(Phase::Final), 1);

    for m in bracket.iter().filter(|m| m.phase != Phase::Quarterfinal) {
        assert_eq!(m.home, None);
        assert_eq!(m.away, None);
    }
}

#[test]
fn qualifier_total_must_fit_a_bracket() {
    let zones = zone_qualifiers(&[("A", 2), ("B", 2), ("C", 2)]);
    assert!(matches!(
        seed_bracket(&zones),
        Err(TournamentError::QualifierCountMismatch { total: 6 })
    ));

    let too_many = zone_qualifiers(&[("A", 16), ("B", 16)]);
    assert!(matches!(
        seed_bracket(&too_many),
        Err(TournamentError::QualifierCountMismatch { total: 32 })
    ));
}

#[test]
fn seeding_requires_at_least_two_zones() {
    let zones = zone_qualifiers(&[("A", 4)]);
    assert!(matches!(
        seed_bracket(&zones),
        Err(TournamentError::SeedingInfeasible { zones: 1, .. })
    ));
}

#[test]
fn seeding_rejects_uneven_and_odd_zone_layouts() {
    let uneven = zone_qualifiers(&[("A", 2), ("B", 4)]);
    assert!(matches!(
        seed_bracket(&uneven),
        Err(TournamentError::SeedingInfeasible {
            zones: 2,
            qualifiers_per_zone: 2,
        })
    ));

    // An odd count above 1 cannot be split for the cross-zone rotation.
    let odd = zone_qualifiers(&[("A", 3), ("B", 3)]);
    assert!(matches!(
        seed_bracket(&odd),
        Err(TournamentError::SeedingInfeasible {
            zones: 2,
            qualifiers_per_zone: 3,
        })
    ));
}

#[test]
fn successor_mapping_halves_slots() {
    assert_eq!(
        successor(Phase::RoundOf16, 0),
        Some((Phase::Quarterfinal, 0, Side::Home))
    );
    assert_eq!(
        successor(Phase::RoundOf16, 5),
        Some((Phase::Quarterfinal, 2, Side::Away))
    );
    assert_eq!(
        successor(Phase::Semifinal, 1),
        Some((Phase::Final, 0, Side::Away))
    );
    assert_eq!(successor(Phase::Final, 0), None);
    assert_eq!(successor(Phase::Group, 0), None);
}
