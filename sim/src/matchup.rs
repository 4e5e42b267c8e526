//! Matchup outcome types and the calculator interface
//!
//! The engine consumes damage numbers, it never computes them. A
//! [`MatchupJudge`] implementation wraps whatever damage calculator the
//! application uses; the engine only decides how to collapse a reported
//! range into the single amount it applies.

use std::collections::HashMap;

use foresight_battle::{Combatant, FieldConditions};

use crate::metadata::MoveMetadata;

/// A damage range reported by the external calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRange {
    pub low: u32,
    pub high: u32,
}

impl DamageRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// A range collapsed to a single value
    pub fn exact(value: u32) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    /// Arithmetic midpoint, rounded down
    pub fn midpoint(&self) -> u32 {
        (self.low + self.high) / 2
    }
}

/// Knockout likelihood descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KoChance {
    /// Even the high roll leaves the defender standing
    None,
    /// The high roll knocks out, the low roll does not
    Possible,
    /// Even the low roll knocks out
    Guaranteed,
}

/// One resolved matchup: what the calculator says this move would do
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupOutcome {
    /// Damage range; absent for non-damaging moves
    pub damage: Option<DamageRange>,

    /// Human-readable summary from the calculator
    pub summary: String,

    /// Knockout likelihood
    pub ko: KoChance,
}

impl MatchupOutcome {
    /// Outcome for a move that deals no direct damage
    pub fn non_damaging() -> Self {
        Self {
            damage: None,
            summary: String::new(),
            ko: KoChance::None,
        }
    }

    /// Outcome from a damage range against a defender's current HP
    pub fn from_range(range: DamageRange, defender_hp: u32) -> Self {
        let ko = if range.low >= defender_hp {
            KoChance::Guaranteed
        } else if range.high >= defender_hp {
            KoChance::Possible
        } else {
            KoChance::None
        };
        Self {
            damage: Some(range),
            summary: format!("{}-{} damage", range.low, range.high),
            ko,
        }
    }
}

/// How a damage range collapses to the single applied amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DamagePolicy {
    /// Arithmetic midpoint, rounded down
    #[default]
    Midpoint,
    /// Low roll
    Minimum,
    /// High roll
    Maximum,
}

impl DamagePolicy {
    /// Collapse a range per this policy
    pub fn collapse(&self, range: &DamageRange) -> u32 {
        match self {
            DamagePolicy::Midpoint => range.midpoint(),
            DamagePolicy::Minimum => range.low,
            DamagePolicy::Maximum => range.high,
        }
    }
}

/// External damage/matchup calculator
pub trait MatchupJudge {
    /// Assess one attacker/defender/move matchup under the given field
    fn assess(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        mv: &MoveMetadata,
        field: &FieldConditions,
    ) -> MatchupOutcome;
}

/// Table-backed judge for tests and examples
///
/// Reports a fixed range per move name; damaging moves without an entry deal
/// nothing, non-damaging moves always report no damage.
#[derive(Debug, Clone, Default)]
pub struct FixedJudge {
    ranges: HashMap<String, DamageRange>,
}

impl FixedJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the reported range for a move name
    pub fn set(&mut self, move_name: impl Into<String>, range: DamageRange) {
        self.ranges.insert(move_name.into(), range);
    }
}

impl MatchupJudge for FixedJudge {
    fn assess(
        &self,
        _attacker: &Combatant,
        defender: &Combatant,
        mv: &MoveMetadata,
        _field: &FieldConditions,
    ) -> MatchupOutcome {
        if !mv.is_damaging() {
            return MatchupOutcome::non_damaging();
        }
        match self.ranges.get(&mv.name) {
            Some(range) => MatchupOutcome::from_range(*range, defender.current_hp),
            None => MatchupOutcome::non_damaging(),
        }
    }
}
