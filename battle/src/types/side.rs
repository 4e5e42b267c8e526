//! Side (player) state

use std::collections::HashMap;

use super::combatant::Combatant;
use super::conditions::{SideCondition, SideConditionState};

/// One of the two participants in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideId {
    P1,
    P2,
}

impl SideId {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(SideId::P1),
            "p2" => Some(SideId::P2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SideId::P1 => "p1",
            SideId::P2 => "p2",
        }
    }

    /// The other side
    pub fn opponent(&self) -> SideId {
        match self {
            SideId::P1 => SideId::P2,
            SideId::P2 => SideId::P1,
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One player's side of the battle
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    /// Which participant this side belongs to
    pub id: SideId,

    /// Combatants on this side (party order)
    pub roster: Vec<Combatant>,

    /// Index of the currently active combatant
    pub active_index: Option<usize>,

    /// Side conditions (hazards, screens, etc.)
    pub conditions: HashMap<SideCondition, SideConditionState>,
}

impl SideState {
    /// Create a new empty side
    pub fn new(id: SideId) -> Self {
        Self {
            id,
            roster: Vec::new(),
            active_index: None,
            conditions: HashMap::new(),
        }
    }

    /// Get the active combatant
    pub fn active(&self) -> Option<&Combatant> {
        self.active_index.and_then(|idx| self.roster.get(idx))
    }

    /// Get the active combatant mutably
    pub fn active_mut(&mut self) -> Option<&mut Combatant> {
        if let Some(idx) = self.active_index {
            self.roster.get_mut(idx)
        } else {
            None
        }
    }

    /// Get the active combatant only if it can still act
    pub fn able_active(&self) -> Option<&Combatant> {
        self.active().filter(|c| c.is_able())
    }

    /// Iterate over bench combatants (not active, not fainted)
    pub fn bench(&self) -> impl Iterator<Item = (usize, &Combatant)> {
        let active = self.active_index;
        self.roster
            .iter()
            .enumerate()
            .filter(move |(idx, c)| Some(*idx) != active && c.is_able())
    }

    /// Indices of combatants eligible to replace the active one
    pub fn replacement_candidates(&self) -> Vec<usize> {
        self.bench().map(|(idx, _)| idx).collect()
    }

    /// Count non-fainted combatants
    pub fn alive_count(&self) -> usize {
        self.roster.iter().filter(|c| c.is_able()).count()
    }

    /// Check if every combatant has fainted
    pub fn all_fainted(&self) -> bool {
        !self.roster.is_empty() && self.roster.iter().all(|c| c.fainted)
    }

    /// Set the active combatant, clearing the outgoing one's battle state
    pub fn set_active(&mut self, index: Option<usize>) {
        if let Some(old_idx) = self.active_index {
            if let Some(old) = self.roster.get_mut(old_idx) {
                old.on_switch_out();
            }
        }
        self.active_index = index;
    }

    /// Get a combatant by index
    pub fn get(&self, index: usize) -> Option<&Combatant> {
        self.roster.get(index)
    }

    /// Check if side has a condition
    pub fn has_condition(&self, cond: SideCondition) -> bool {
        self.conditions.contains_key(&cond)
    }

    /// Add a side condition
    /// Returns true if the condition was added (false if already at max layers)
    pub fn add_condition(&mut self, cond: SideCondition) -> bool {
        if let Some(state) = self.conditions.get_mut(&cond) {
            state.add_layer(cond)
        } else {
            self.conditions.insert(cond, SideConditionState::new());
            true
        }
    }

    /// Remove a side condition
    pub fn remove_condition(&mut self, cond: SideCondition) -> bool {
        self.conditions.remove(&cond).is_some()
    }
}
