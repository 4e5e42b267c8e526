//! Base stats, stat identifiers, and stage modifiers

/// A named stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }
}

/// Fully-computed base stats for a combatant (after level/nature/EVs,
/// before in-battle stage modifiers)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl BaseStats {
    /// Get the value for a battle stat (accuracy/evasion have no base value)
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy | Stat::Evasion => 100,
        }
    }
}

/// Stat stages (-6 to +6)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    /// Create new stat stages (all at 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get stage for a stat
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(-6, 6);
        match stat {
            Stat::Atk => self.atk = clamped,
            Stat::Def => self.def = clamped,
            Stat::Spa => self.spa = clamped,
            Stat::Spd => self.spd = clamped,
            Stat::Spe => self.spe = clamped,
            Stat::Accuracy => self.accuracy = clamped,
            Stat::Evasion => self.evasion = clamped,
        }
    }

    /// Apply a boost to a stat, returns actual change applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = (current + amount).clamp(-6, 6);
        let actual_change = new_value - current;
        self.set(stat, new_value);
        actual_change
    }

    /// Apply an unboost (negative boost) to a stat, returns actual change applied
    pub fn unboost(&mut self, stat: Stat, amount: i8) -> i8 {
        self.boost(stat, -amount)
    }

    /// Reset all stages to 0
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Get the multiplier for a stat stage (for atk/def/spa/spd/spe)
    /// +1 = 1.5x, +2 = 2x, ..., +6 = 4x
    /// -1 = 0.67x, -2 = 0.5x, ..., -6 = 0.25x
    pub fn multiplier(stage: i8) -> f32 {
        let stage = stage.clamp(-6, 6);
        if stage >= 0 {
            (2 + stage as i32) as f32 / 2.0
        } else {
            2.0 / (2 - stage as i32) as f32
        }
    }

    /// Get the multiplier for accuracy/evasion stages (different formula)
    /// +1 = 1.33x, +2 = 1.67x, ..., +6 = 3x
    /// -1 = 0.75x, -2 = 0.6x, ..., -6 = 0.33x
    pub fn accuracy_multiplier(stage: i8) -> f32 {
        let stage = stage.clamp(-6, 6);
        if stage >= 0 {
            (3 + stage as i32) as f32 / 3.0
        } else {
            3.0 / (3 - stage as i32) as f32
        }
    }

    /// Check if all stats are at 0
    pub fn is_clear(&self) -> bool {
        self.atk == 0
            && self.def == 0
            && self.spa == 0
            && self.spd == 0
            && self.spe == 0
            && self.accuracy == 0
            && self.evasion == 0
    }
}
