//! Domain types for battle state

mod combatant;
mod conditions;
mod field;
mod side;
mod stats;
mod status;

pub use combatant::Combatant;
pub use conditions::{SideCondition, SideConditionState, Terrain, Weather};
pub use field::FieldConditions;
pub use side::{SideId, SideState};
pub use stats::{BaseStats, Stat, StatStages};
pub use status::StatusCondition;
