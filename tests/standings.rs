//! Integration tests for standings computation: arithmetic, ranking order,
//! and purity.

use cup_tournament_web::logic::compute_standings;
use cup_tournament_web::{Match, Team};

fn teams(names: &[&str]) -> Vec<Team> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| Team::new(*n, "A", format!("#{:06x}", i)))
        .collect()
}

fn scored(home: &Team, away: &Team, home_goals: u32, away_goals: u32) -> Match {
    let mut m = Match::group("A", 1, home.id, away.id);
    m.home_goals = Some(home_goals);
    m.away_goals = Some(away_goals);
    m.winner = if home_goals > away_goals {
        Some(home.id)
    } else if away_goals > home_goals {
        Some(away.id)
    } else {
        None
    };
    m
}

#[test]
fn teams_without_matches_get_zero_rows_sorted_by_name() {
    let ts = teams(&["Quilmes", "Alumni", "Porvenir"]);
    let table = compute_standings(&ts, &[]);
    let names: Vec<_> = table.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(names, vec!["Alumni", "Porvenir", "Quilmes"]);
    for row in &table {
        assert_eq!(row.played, 0);
        assert_eq!(row.points, 0);
        assert_eq!(row.goal_difference, 0);
    }
}

#[test]
fn points_wins_draws_and_goal_difference_add_up() {
    let ts = teams(&["W", "X", "Y", "Z"]);
    let (x, y, z, w) = (&ts[1], &ts[2], &ts[3], &ts[0]);
    let matches = vec![
        scored(x, y, 3, 1),
        scored(z, w, 2, 2),
        scored(x, z, 1, 1),
        scored(y, w, 2, 0),
    ];
    let table = compute_standings(&ts, &matches);

    let names: Vec<_> = table.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(names, vec!["X", "Y", "Z", "W"]);

    let rx = &table[0];
    assert_eq!((rx.played, rx.won, rx.drawn, rx.lost), (2, 1, 1, 0));
    assert_eq!((rx.goals_for, rx.goals_against), (4, 2));
    assert_eq!(rx.goal_difference, 2);
    assert_eq!(rx.points, 4);

    for row in &table {
        assert_eq!(row.points, 3 * row.won + row.drawn);
        assert_eq!(
            row.goal_difference,
            i64::from(row.goals_for) - i64::from(row.goals_against)
        );
        assert_eq!(row.played, row.won + row.drawn + row.lost);
    }
}

#[test]
fn unscored_matches_are_excluded() {
    let ts = teams(&["X", "Y"]);
    let unplayed = Match::group("A", 1, ts[0].id, ts[1].id);
    let table = compute_standings(&ts, &[unplayed]);
    assert_eq!(table[0].played, 0);
    assert_eq!(table[1].played, 0);
}

#[test]
fn identical_records_break_on_name_for_a_total_order() {
    let ts = teams(&["Bravo", "Alfa", "Delta", "Carlos"]);
    // Two disjoint 1-0 results: two winners and two losers with equal records.
    let matches = vec![scored(&ts[0], &ts[1], 1, 0), scored(&ts[2], &ts[3], 1, 0)];
    let table = compute_standings(&ts, &matches);
    let names: Vec<_> = table.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(names, vec!["Bravo", "Delta", "Alfa", "Carlos"]);
}

#[test]
fn computation_is_pure_and_repeatable() {
    let ts = teams(&["X", "Y", "Z"]);
    let matches = vec![scored(&ts[0], &ts[1], 2, 1), scored(&ts[1], &ts[2], 0, 0)];
    assert_eq!(
        compute_standings(&ts, &matches),
        compute_standings(&ts, &matches)
    );
}
