//! Move metadata types and the provider interface
//!
//! The engine never hardcodes move behavior; everything it knows about a move
//! comes from a [`MoveDex`] lookup. Every field of [`MoveMetadata`] beyond
//! name/priority/category may be absent, and absence always means "no
//! effect", never an error.

use std::collections::HashMap;

use foresight_battle::{Stat, StatusCondition, Terrain, Weather};

/// Damage category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    /// Whether this category deals direct damage
    pub fn is_damaging(&self) -> bool {
        !matches!(self, MoveCategory::Status)
    }
}

/// A ratio used for recoil and drain amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub num: u32,
    pub den: u32,
}

impl Fraction {
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Apply the fraction to an amount, rounding down
    pub fn of(&self, amount: u32) -> u32 {
        if self.den == 0 {
            return 0;
        }
        ((amount as u64 * self.num as u64) / self.den as u64) as u32
    }
}

/// Who an effect applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Foe,
}

/// A declared stat stage delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChange {
    pub applies_to: EffectTarget,
    pub stat: Stat,
    pub delta: i8,
}

/// A declared field mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEffect {
    SetWeather(Weather),
    SetTerrain(Terrain),
    InvertSpeed,
}

/// A secondary effect with a percentage chance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryEffect {
    /// Chance in percent (1-100)
    pub chance: u8,
    /// Effect token (e.g. a status token like "par")
    pub effect: String,
}

/// Everything the engine knows about one move
///
/// Only name, priority, and category are always present. The provider may
/// omit any of the effect fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveMetadata {
    pub name: String,

    /// Priority bracket, conventionally -7..+5
    pub priority: i8,

    pub category: MoveCategory,

    /// Fraction of damage dealt taken as recoil
    pub recoil: Option<Fraction>,

    /// Fraction of damage dealt restored to the user
    pub drain: Option<Fraction>,

    /// Guaranteed stat stage deltas
    pub stat_changes: Vec<StatChange>,

    /// Guaranteed inflicted status
    pub status: Option<(EffectTarget, StatusCondition)>,

    /// Field mutation payload
    pub field: Option<FieldEffect>,

    /// Whether the user switches out after a successful use
    pub self_switch: bool,

    /// Chance-gated secondary effect
    pub secondary: Option<SecondaryEffect>,

    /// Hit count range for multi-hit moves
    pub multi_hit: Option<(u8, u8)>,
}

impl MoveMetadata {
    /// Create metadata with no effects beyond its category
    pub fn new(name: impl Into<String>, category: MoveCategory) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            category,
            recoil: None,
            drain: None,
            stat_changes: Vec::new(),
            status: None,
            field: None,
            self_switch: false,
            secondary: None,
            multi_hit: None,
        }
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_recoil(mut self, num: u32, den: u32) -> Self {
        self.recoil = Some(Fraction::new(num, den));
        self
    }

    pub fn with_drain(mut self, num: u32, den: u32) -> Self {
        self.drain = Some(Fraction::new(num, den));
        self
    }

    pub fn with_stat_change(mut self, applies_to: EffectTarget, stat: Stat, delta: i8) -> Self {
        self.stat_changes.push(StatChange {
            applies_to,
            stat,
            delta,
        });
        self
    }

    pub fn with_status(mut self, applies_to: EffectTarget, status: StatusCondition) -> Self {
        self.status = Some((applies_to, status));
        self
    }

    pub fn with_field(mut self, effect: FieldEffect) -> Self {
        self.field = Some(effect);
        self
    }

    pub fn with_self_switch(mut self) -> Self {
        self.self_switch = true;
        self
    }

    pub fn with_secondary(mut self, chance: u8, effect: impl Into<String>) -> Self {
        self.secondary = Some(SecondaryEffect {
            chance,
            effect: effect.into(),
        });
        self
    }

    pub fn with_multi_hit(mut self, min: u8, max: u8) -> Self {
        self.multi_hit = Some((min, max));
        self
    }

    /// Whether this move deals direct damage
    pub fn is_damaging(&self) -> bool {
        self.category.is_damaging()
    }
}

/// Source of move metadata, keyed by move name and ruleset/format tag
pub trait MoveDex {
    /// Look up a move. `None` means the identifier is unknown in this format.
    fn lookup(&self, name: &str, format: &str) -> Option<MoveMetadata>;
}

/// In-memory metadata table
///
/// Backs tests and examples; a real deployment would wrap whatever external
/// metadata source the application ships with.
#[derive(Debug, Clone, Default)]
pub struct StaticMoveDex {
    moves: HashMap<String, MoveMetadata>,
}

impl StaticMoveDex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a move, replacing any existing entry with the same name
    pub fn insert(&mut self, meta: MoveMetadata) {
        self.moves.insert(meta.name.clone(), meta);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl MoveDex for StaticMoveDex {
    fn lookup(&self, name: &str, _format: &str) -> Option<MoveMetadata> {
        self.moves.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_floors() {
        assert_eq!(Fraction::new(1, 3).of(90), 30);
        assert_eq!(Fraction::new(1, 3).of(100), 33);
        assert_eq!(Fraction::new(1, 2).of(87), 43);
        assert_eq!(Fraction::new(1, 4).of(3), 0);
        assert_eq!(Fraction::new(1, 0).of(50), 0);
    }

    #[test]
    fn test_category() {
        assert!(MoveCategory::Physical.is_damaging());
        assert!(MoveCategory::Special.is_damaging());
        assert!(!MoveCategory::Status.is_damaging());
    }

    #[test]
    fn test_metadata_defaults() {
        let meta = MoveMetadata::new("Tackle", MoveCategory::Physical);
        assert_eq!(meta.priority, 0);
        assert!(meta.recoil.is_none());
        assert!(meta.drain.is_none());
        assert!(meta.stat_changes.is_empty());
        assert!(!meta.self_switch);
        assert!(meta.is_damaging());
    }

    #[test]
    fn test_metadata_builder() {
        let meta = MoveMetadata::new("Double-Edge", MoveCategory::Physical)
            .with_recoil(1, 3)
            .with_priority(0);
        assert_eq!(meta.recoil, Some(Fraction::new(1, 3)));

        let meta = MoveMetadata::new("Quick Attack", MoveCategory::Physical).with_priority(1);
        assert_eq!(meta.priority, 1);
    }

    #[test]
    fn test_static_dex_lookup() {
        let mut dex = StaticMoveDex::new();
        assert!(dex.is_empty());

        dex.insert(MoveMetadata::new("Surf", MoveCategory::Special));
        assert_eq!(dex.len(), 1);

        assert!(dex.lookup("Surf", "gen9ou").is_some());
        assert!(dex.lookup("Nonexistent", "gen9ou").is_none());
    }
}
