//! Battle state domain types for speculative turn simulation.
//!
//! This crate provides the data model shared by everything that inspects or
//! advances a 1v1 battle: combatants, sides, stat stages, status conditions,
//! field state, and the snapshot that bundles them.
//!
//! # Overview
//!
//! `foresight-battle` sits below the simulation core:
//!
//! ```text
//! foresight-battle (domain types + snapshot) ← THIS CRATE
//!        │
//!        └─> foresight-sim (order resolution, effect pipeline, sessions)
//! ```
//!
//! # Main Types
//!
//! - [`Combatant`] - One battler: HP, base stats, stages, status, moves
//! - [`SideId`] - Which of the two players a value belongs to
//! - [`SideState`] - One player's roster, active slot, and side conditions
//! - [`FieldConditions`] - Weather, terrain, speed inversion, turn count
//! - [`BattleSnapshot`] - Both sides plus the field at a point in time
//! - [`StatStages`] - Stat stage modifiers (-6 to +6)
//! - [`StatusCondition`] - Non-volatile status (Burn, Paralysis, etc.)
//!
//! # Copy Discipline
//!
//! Every type here owns its data, so `Clone` on a [`BattleSnapshot`] is a
//! full deep copy. The simulation core relies on that: engine calls clone
//! their input snapshot and mutate only the clone, which is what makes
//! speculative turns safe to discard.
//!
//! # Example Usage
//!
//! ```
//! use foresight_battle::{BattleSnapshot, Combatant, SideId, SideState};
//!
//! let mut ours = SideState::new(SideId::P1);
//! ours.roster.push(Combatant::new("Jolteon", 100, 270, 110));
//! ours.set_active(Some(0));
//!
//! let mut theirs = SideState::new(SideId::P2);
//! theirs.roster.push(Combatant::new("Snorlax", 100, 520, 96));
//! theirs.set_active(Some(0));
//!
//! let snapshot = BattleSnapshot::new(ours, theirs);
//! assert_eq!(snapshot.side(SideId::P1).active().unwrap().name, "Jolteon");
//! ```

pub mod snapshot;
pub mod types;

pub use snapshot::BattleSnapshot;
pub use types::{
    BaseStats, Combatant, FieldConditions, SideCondition, SideConditionState, SideId, SideState,
    Stat, StatStages, StatusCondition, Terrain, Weather,
};
