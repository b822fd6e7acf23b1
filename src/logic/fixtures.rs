//! Group-stage fixture generation: circle-method round robin.

use crate::models::TeamId;

/// One generated pairing: (matchday, home, away). Matchdays are 1-based.
pub type Pairing = (u32, TeamId, TeamId);

/// All round-robin pairings for the given teams, every unordered pair exactly
/// once, no self-pairings.
///
/// Circle method: index 0 stays fixed while the rest rotate one step per
/// matchday, giving n-1 matchdays for even n. Odd team counts get a phantom
/// bye slot; pairings against the bye are skipped, so each team sits out
/// exactly one of the n matchdays. Home/away alternates by matchday parity,
/// which keeps the output stable and reproducible for a given input order.
///
/// Returns an empty vec for fewer than 2 teams; the engine rejects that case
/// before calling here.
pub fn round_robin(teams: &[TeamId]) -> Vec<Pairing> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut ring: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None); // bye
    }
    let m = ring.len();

    let mut pairings = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for day in 0..m - 1 {
        for i in 0..m / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[m - 1 - i]) {
                let (home, away) = if day % 2 == 0 { (a, b) } else { (b, a) };
                pairings.push((day as u32 + 1, home, away));
            }
        }
        ring[1..].rotate_right(1);
    }
    pairings
}
