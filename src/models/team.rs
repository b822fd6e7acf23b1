//! Team data structure: identity, zone assignment, display color.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// A team in the tournament.
///
/// Names are unique case-insensitively; the display color is unique across
/// all teams and is assigned at creation. Teams are immutable once the group
/// stage locks the team list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Zone (group) the team plays its round robin in, e.g. "A".
    pub zone: String,
    /// Display color in "#rrggbb" form.
    pub color: String,
}

impl Team {
    /// Create a new team. The caller is responsible for name/color uniqueness.
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            zone: zone.into(),
            color: color.into(),
        }
    }
}
