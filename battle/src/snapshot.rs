//! Battle snapshot - the unit of speculative state

use crate::types::{FieldConditions, SideId, SideState};

/// The full battle state at a point in speculative time
///
/// A snapshot owns both sides and the field outright, so cloning one yields a
/// fully independent copy. The simulation core treats snapshots as immutable
/// once produced: anything that "changes" a snapshot clones it first and
/// returns the clone.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    /// First participant's side
    pub p1: SideState,

    /// Second participant's side
    pub p2: SideState,

    /// Global field conditions
    pub field: FieldConditions,
}

impl BattleSnapshot {
    /// Create a snapshot from two sides with an empty field
    pub fn new(p1: SideState, p2: SideState) -> Self {
        Self {
            p1,
            p2,
            field: FieldConditions::new(),
        }
    }

    /// Get a side by id
    pub fn side(&self, id: SideId) -> &SideState {
        match id {
            SideId::P1 => &self.p1,
            SideId::P2 => &self.p2,
        }
    }

    /// Get a side mutably by id
    pub fn side_mut(&mut self, id: SideId) -> &mut SideState {
        match id {
            SideId::P1 => &mut self.p1,
            SideId::P2 => &mut self.p2,
        }
    }

    /// Iterate over both sides
    pub fn sides(&self) -> impl Iterator<Item = &SideState> {
        [&self.p1, &self.p2].into_iter()
    }

    /// Check whether either side has lost every combatant
    pub fn is_decided(&self) -> bool {
        self.p1.all_fainted() || self.p2.all_fainted()
    }
}
