//! Pending decisions and the suspension queue
//!
//! Any effect whose outcome cannot be resolved from metadata alone is
//! recorded here instead of guessed: which replacement enters, whether a
//! chance effect occurs, how many times a multi-hit move connects. The queue
//! is the model's only suspension point: a session refuses to advance until
//! every entry has been resolved by the caller.

use foresight_battle::SideId;

use crate::error::EngineError;

/// What kind of external input a decision needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionKind {
    /// Which bench combatant enters (roster indices)
    Replacement { candidates: Vec<usize> },

    /// Does a chance effect occur, and on whom does it land
    Probabilistic {
        chance: u8,
        effect: String,
        afflicts: SideId,
    },

    /// How many times a multi-hit move connects
    HitCount { min: u8, max: u8 },

    /// Does a held item activate
    ItemActivation { item: String },

    /// Does an ability trigger
    AbilityTrigger { ability: String },
}

impl DecisionKind {
    /// Short tag for logs and prompts
    pub fn label(&self) -> &'static str {
        match self {
            DecisionKind::Replacement { .. } => "replacement",
            DecisionKind::Probabilistic { .. } => "probabilistic",
            DecisionKind::HitCount { .. } => "hit-count",
            DecisionKind::ItemActivation { .. } => "item",
            DecisionKind::AbilityTrigger { .. } => "ability",
        }
    }
}

/// A recorded need for external input before the turn can be finalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDecision {
    /// Side the decision belongs to
    pub side: SideId,

    /// Human-readable prompt for the caller
    pub prompt: String,

    pub kind: DecisionKind,
}

impl PendingDecision {
    pub fn replacement(side: SideId, candidates: Vec<usize>) -> Self {
        Self {
            side,
            prompt: format!("select a replacement for {side}"),
            kind: DecisionKind::Replacement { candidates },
        }
    }

    pub fn probabilistic(side: SideId, chance: u8, effect: impl Into<String>, afflicts: SideId) -> Self {
        let effect = effect.into();
        Self {
            side,
            prompt: format!("{chance}% chance of {effect} on {afflicts}"),
            kind: DecisionKind::Probabilistic {
                chance,
                effect,
                afflicts,
            },
        }
    }

    pub fn hit_count(side: SideId, min: u8, max: u8) -> Self {
        Self {
            side,
            prompt: format!("hits {min}-{max} times"),
            kind: DecisionKind::HitCount { min, max },
        }
    }

    pub fn item_activation(side: SideId, item: impl Into<String>) -> Self {
        let item = item.into();
        Self {
            side,
            prompt: format!("does {item} activate for {side}"),
            kind: DecisionKind::ItemActivation { item },
        }
    }

    pub fn ability_trigger(side: SideId, ability: impl Into<String>) -> Self {
        let ability = ability.into();
        Self {
            side,
            prompt: format!("does {ability} trigger for {side}"),
            kind: DecisionKind::AbilityTrigger { ability },
        }
    }
}

/// The caller's answer to one pending decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionResolution {
    /// Roster index of the chosen replacement
    Replacement(usize),

    /// Whether a probabilistic effect occurred
    Occurred(bool),

    /// Chosen hit count
    HitCount(u8),

    /// Whether the item/ability activated
    Triggered(bool),
}

/// FIFO of unresolved branch points
#[derive(Debug, Clone, Default)]
pub struct DecisionQueue {
    entries: Vec<PendingDecision>,
}

impl DecisionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decision to the back of the queue
    pub fn enqueue(&mut self, decision: PendingDecision) {
        self.entries.push(decision);
    }

    /// Append several decisions in order
    pub fn extend(&mut self, decisions: impl IntoIterator<Item = PendingDecision>) {
        self.entries.extend(decisions);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PendingDecision> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingDecision> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Resolve the entry at `index`, removing it from the queue
    ///
    /// The resolution must match the entry's kind and fall within its declared
    /// bounds (a listed candidate index, a hit count inside the range). A
    /// mismatch rejects the call and leaves the queue unchanged. Later entries
    /// shift down one index.
    pub fn resolve(
        &mut self,
        index: usize,
        resolution: &DecisionResolution,
    ) -> Result<PendingDecision, EngineError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(EngineError::InvalidDecisionResolution { index })?;

        let matches = match (&entry.kind, resolution) {
            (DecisionKind::Replacement { candidates }, DecisionResolution::Replacement(chosen)) => {
                candidates.contains(chosen)
            }
            (DecisionKind::Probabilistic { .. }, DecisionResolution::Occurred(_)) => true,
            (DecisionKind::HitCount { min, max }, DecisionResolution::HitCount(n)) => {
                (*min..=*max).contains(n)
            }
            (DecisionKind::ItemActivation { .. }, DecisionResolution::Triggered(_)) => true,
            (DecisionKind::AbilityTrigger { .. }, DecisionResolution::Triggered(_)) => true,
            _ => false,
        };

        if !matches {
            return Err(EngineError::InvalidDecisionResolution { index });
        }

        Ok(self.entries.remove(index))
    }
}
