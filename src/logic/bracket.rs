//! Bracket tree: successor mapping and the snapshot the presentation layer
//! renders. The tree is an indexed arena of (phase, slot) positions, not a
//! widget layout.

use crate::models::{MatchId, Phase, Team};
use serde::{Deserialize, Serialize};

/// Side of a successor match a winner advances into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Home,
    Away,
}

/// Successor position of a knockout match: slots 2k and 2k+1 of a phase feed
/// home and away of slot k in the next phase. The final has no successor.
pub fn successor(phase: Phase, slot: u32) -> Option<(Phase, u32, Side)> {
    let next = phase.next_knockout()?;
    let side = if slot % 2 == 0 { Side::Home } else { Side::Away };
    Some((next, slot / 2, side))
}

/// One knockout match with team references resolved for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub slot: u32,
    /// None while the feeding match is undecided.
    pub home: Option<Team>,
    pub away: Option<Team>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub winner: Option<Team>,
}

/// All matches of one knockout phase, in slot order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub phase: Phase,
    pub matches: Vec<BracketMatch>,
}

/// Snapshot of the whole elimination tree.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSnapshot {
    pub rounds: Vec<BracketRound>,
    pub champion: Option<Team>,
}
