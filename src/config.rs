//! Tournament structure configuration: zones, qualifier count, zone capacity.

use serde::{Deserialize, Serialize};

/// Structural rules of a tournament. These are configuration, not data: they
/// stay fixed for the lifetime of a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentRules {
    /// Zone (group) names, e.g. ["A", "B"].
    pub zones: Vec<String>,
    /// Teams promoted from each zone into the knockout bracket. The total
    /// across zones must be a power of two between 2 and 16.
    pub qualifiers_per_zone: usize,
    /// Hard cap on teams per zone during team management.
    pub max_teams_per_zone: usize,
}

impl Default for TournamentRules {
    /// Two zones of eight qualifiers (a full round of 16), with room for
    /// twice the qualifier count per zone.
    fn default() -> Self {
        Self {
            zones: vec!["A".into(), "B".into()],
            qualifiers_per_zone: 8,
            max_teams_per_zone: 16,
        }
    }
}

impl TournamentRules {
    /// Rules with the given layout; capacity defaults to twice the qualifiers.
    pub fn with_zones(zones: Vec<String>, qualifiers_per_zone: usize) -> Self {
        Self {
            max_teams_per_zone: qualifiers_per_zone.max(1) * 2,
            zones,
            qualifiers_per_zone,
        }
    }

    pub fn has_zone(&self, zone: &str) -> bool {
        self.zones.iter().any(|z| z == zone)
    }

    /// Minimum teams a zone needs before the group stage can start: enough to
    /// promote the configured qualifiers, and never fewer than 2.
    pub fn min_teams_per_zone(&self) -> usize {
        self.qualifiers_per_zone.max(2)
    }

    /// Qualifiers entering the knockout bracket across all zones.
    pub fn total_qualifiers(&self) -> usize {
        self.zones.len() * self.qualifiers_per_zone
    }
}
