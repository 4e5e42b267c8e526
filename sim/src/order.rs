//! Execution order resolution
//!
//! Decides which of the two selected actions runs first and records why.
//! Pure apart from the injected random source, which only matters on a full
//! priority-and-speed tie.

use foresight_battle::{Combatant, FieldConditions, SideId};
use rand::Rng;

use crate::metadata::MoveMetadata;

/// The rule that determined execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderReason {
    /// Priority brackets differed
    Priority,
    /// Equal priority, speeds differed
    Speed,
    /// Equal priority, speeds differed, field inverts the comparison
    ReversedField,
    /// Full tie broken by the random source
    Random,
}

impl OrderReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderReason::Priority => "priority",
            OrderReason::Speed => "speed",
            OrderReason::ReversedField => "reversed-field",
            OrderReason::Random => "random",
        }
    }
}

impl std::fmt::Display for OrderReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which action goes first and the diagnostics behind the call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDecision {
    /// Side whose action executes first
    pub first: SideId,

    /// Rule that decided it
    pub reason: OrderReason,

    pub p1_priority: i8,
    pub p2_priority: i8,

    /// Effective speeds at resolution time, recorded even when priority
    /// decided the order
    pub p1_speed: u32,
    pub p2_speed: u32,
}

impl OrderDecision {
    /// Side whose action executes second
    pub fn second(&self) -> SideId {
        self.first.opponent()
    }

    pub fn priority_of(&self, side: SideId) -> i8 {
        match side {
            SideId::P1 => self.p1_priority,
            SideId::P2 => self.p2_priority,
        }
    }

    pub fn speed_of(&self, side: SideId) -> u32 {
        match side {
            SideId::P1 => self.p1_speed,
            SideId::P2 => self.p2_speed,
        }
    }
}

/// Resolve execution order for one turn's two actions
///
/// Higher priority always acts first. On a priority tie the higher effective
/// speed acts first, unless the field's speed inversion is active, in which
/// case the lower speed does. A full tie goes to the random source.
pub fn resolve_order<R: Rng>(
    p1: &Combatant,
    p1_move: &MoveMetadata,
    p2: &Combatant,
    p2_move: &MoveMetadata,
    field: &FieldConditions,
    rng: &mut R,
) -> OrderDecision {
    let p1_priority = p1_move.priority;
    let p2_priority = p2_move.priority;
    let p1_speed = p1.effective_speed();
    let p2_speed = p2.effective_speed();

    let (first, reason) = if p1_priority != p2_priority {
        let first = if p1_priority > p2_priority {
            SideId::P1
        } else {
            SideId::P2
        };
        (first, OrderReason::Priority)
    } else if p1_speed != p2_speed {
        if field.speed_inverted {
            let first = if p1_speed < p2_speed {
                SideId::P1
            } else {
                SideId::P2
            };
            (first, OrderReason::ReversedField)
        } else {
            let first = if p1_speed > p2_speed {
                SideId::P1
            } else {
                SideId::P2
            };
            (first, OrderReason::Speed)
        }
    } else {
        let first = if rng.gen_bool(0.5) {
            SideId::P1
        } else {
            SideId::P2
        };
        (first, OrderReason::Random)
    };

    tracing::debug!(
        first = first.as_str(),
        reason = reason.as_str(),
        p1_priority,
        p2_priority,
        p1_speed,
        p2_speed,
        "resolved order"
    );

    OrderDecision {
        first,
        reason,
        p1_priority,
        p2_priority,
        p1_speed,
        p2_speed,
    }
}
