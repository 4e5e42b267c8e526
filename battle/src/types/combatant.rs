//! Combatant state

use super::stats::{BaseStats, StatStages};
use super::status::StatusCondition;

/// One battler's full state
///
/// Owned by exactly one [`SideState`](super::SideState); never shared between
/// snapshots. The effect pipeline is the only code that mutates a combatant,
/// and it always does so on a fresh copy.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    /// Species or display name
    pub name: String,

    /// Level (1-100)
    pub level: u8,

    /// Current HP (exact value)
    pub current_hp: u32,

    /// Maximum HP
    pub max_hp: u32,

    /// Computed stats before in-battle modifiers
    pub base_stats: BaseStats,

    /// Stat stage modifiers
    pub stages: StatStages,

    /// Non-volatile status condition
    pub status: Option<StatusCondition>,

    /// Known move names
    pub moves: Vec<String>,

    /// Whether this combatant has fainted
    pub fainted: bool,
}

impl Combatant {
    /// Create a new combatant at full HP
    pub fn new(name: impl Into<String>, level: u8, max_hp: u32, speed: u32) -> Self {
        Self {
            name: name.into(),
            level,
            current_hp: max_hp,
            max_hp,
            base_stats: BaseStats {
                hp: max_hp,
                spe: speed,
                ..BaseStats::default()
            },
            stages: StatStages::new(),
            status: None,
            moves: Vec::new(),
            fainted: false,
        }
    }

    /// Set the full base stat spread
    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.base_stats = stats;
        self
    }

    /// Add a known move
    pub fn with_move(mut self, name: impl Into<String>) -> Self {
        self.moves.push(name.into());
        self
    }

    /// Get HP as percentage (0-100)
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        (self.current_hp * 100) / self.max_hp
    }

    /// Check if this combatant can still act
    pub fn is_able(&self) -> bool {
        !self.fainted && self.current_hp > 0
    }

    /// Speed stat after stage modifiers and status penalties
    pub fn effective_speed(&self) -> u32 {
        let staged = self.base_stats.spe as f32 * StatStages::multiplier(self.stages.spe);
        let status_mult = self.status.map_or(1.0, |s| s.speed_multiplier());
        (staged * status_mult) as u32
    }

    /// Subtract damage, clamped at zero. Returns the amount actually applied
    /// and marks the combatant fainted when HP reaches zero.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current_hp);
        self.current_hp -= applied;
        if self.current_hp == 0 {
            self.fainted = true;
        }
        applied
    }

    /// Add HP, clamped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.max_hp.saturating_sub(self.current_hp));
        self.current_hp += applied;
        applied
    }

    /// Check if a move name is in this combatant's known set
    pub fn knows_move(&self, name: &str) -> bool {
        self.moves.iter().any(|m| m == name)
    }

    /// Called when this combatant leaves the field
    pub fn on_switch_out(&mut self) {
        self.stages.clear();
    }
}
