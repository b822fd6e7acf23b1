//! Cross-zone bracket seeding: qualifiers into the opening knockout round.

use crate::models::{Match, Phase, TeamId, TournamentError};

/// One zone's qualifiers, best rank first (rank 1 at index 0).
#[derive(Clone, Debug)]
pub struct ZoneQualifiers {
    pub zone: String,
    pub teams: Vec<TeamId>,
}

/// Build the complete knockout bracket.
///
/// The opening round is fully seeded; every later round down to the final is
/// created as placeholder matches with open slots, to be filled by the
/// advancer as feeders decide.
///
/// Cross-zone rule, so no two qualifiers of the same zone meet in the opening
/// round: for zones 0..m in configured order, each with q qualifiers, the
/// rank-r qualifier of zone i (r < q/2) meets the rank (q-1-r) qualifier of
/// zone (i+1) mod m. With two zones of two this is the classic cross:
/// A1 vs B2 and B1 vs A2. For q == 1, adjacent zone pairs meet directly.
///
/// Errors: fewer than 2 zones, uneven zone sizes, or an odd qualifier count
/// above 1 give `SeedingInfeasible`; a feasible layout whose total is not a
/// power of two in 2..=16 gives `QualifierCountMismatch`. Nothing is
/// persisted here, so a failed seeding leaves no partial bracket behind.
pub fn seed_bracket(zones: &[ZoneQualifiers]) -> Result<Vec<Match>, TournamentError> {
    let m = zones.len();
    let q = zones.first().map(|z| z.teams.len()).unwrap_or(0);

    let uneven = zones.iter().any(|z| z.teams.len() != q);
    if m < 2 || uneven || (q > 1 && q % 2 == 1) {
        return Err(TournamentError::SeedingInfeasible {
            zones: m,
            qualifiers_per_zone: q,
        });
    }
    let total: usize = zones.iter().map(|z| z.teams.len()).sum();
    let opening = Phase::opening_round(total)
        .ok_or(TournamentError::QualifierCountMismatch { total })?;

    let mut matches = Vec::new();
    let mut slot = 0u32;
    if q == 1 {
        // A power-of-two total with one qualifier each means an even zone
        // count; adjacent zones meet directly.
        for pair in zones.chunks(2) {
            matches.push(Match::knockout_seeded(
                opening,
                slot,
                pair[0].teams[0],
                pair[1].teams[0],
            ));
            slot += 1;
        }
    } else {
        for i in 0..m {
            let next = &zones[(i + 1) % m];
            for r in 0..q / 2 {
                matches.push(Match::knockout_seeded(
                    opening,
                    slot,
                    zones[i].teams[r],
                    next.teams[q - 1 - r],
                ));
                slot += 1;
            }
        }
    }

    // Placeholder rounds down to the final.
    let mut count = total / 2;
    let mut phase = opening;
    while let Some(next) = phase.next_knockout() {
        count /= 2;
        for s in 0..count {
            matches.push(Match::knockout(next, s as u32));
        }
        phase = next;
    }

    Ok(matches)
}
