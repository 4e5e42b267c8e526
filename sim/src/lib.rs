//! Speculative turn simulation for 1v1 battles.
//!
//! This crate is the simulation core: given a battle snapshot and one action
//! per side, it resolves execution order, applies each action's effects to a
//! private copy of the state, and chains speculative turns in a session the
//! caller can advance or throw away.
//!
//! # Overview
//!
//! `foresight-sim` sits on top of the domain types and below whatever drives
//! it (a UI, a bot, a test harness):
//!
//! ```text
//! foresight-battle (domain types + snapshot)
//!        │
//!        ▼
//! foresight-sim (order, effects, turns, sessions) ← THIS CRATE
//!        │
//!        └─> caller (selection UI, bots, analysis)
//! ```
//!
//! # Main Types
//!
//! - [`TurnEngine`] - Orchestrates one turn: order resolution + effects
//! - [`SimulationSession`] - Chains turns with start/execute/advance/reset
//! - [`SessionRegistry`] - In-memory sessions keyed by battle id
//! - [`OrderDecision`] - Who acts first and why
//! - [`EffectReport`] - One action's consequences on a fresh snapshot
//! - [`PendingDecision`] / [`DecisionQueue`] - Suspension points needing
//!   external input before a turn may be committed
//! - [`MoveDex`] / [`MatchupJudge`] - The two consumed external services:
//!   move metadata and damage calculation
//!
//! # Design Notes
//!
//! The engine never mutates an input snapshot; every application clones and
//! returns. Randomness exists only in the order tie-break and is injected,
//! so tests seed it. Effects whose outcome metadata cannot determine
//! (replacements, chance effects, hit counts) become queued decisions, and a
//! session refuses to advance until its queue is drained.
//!
//! # Example Usage
//!
//! ```
//! use foresight_battle::{BattleSnapshot, Combatant, SideId, SideState};
//! use foresight_sim::{
//!     DamageRange, FixedJudge, MoveCategory, MoveMetadata, SimulationSession, StaticMoveDex,
//!     TurnEngine,
//! };
//!
//! let mut dex = StaticMoveDex::new();
//! dex.insert(MoveMetadata::new("Body Slam", MoveCategory::Physical));
//! let mut judge = FixedJudge::new();
//! judge.set("Body Slam", DamageRange::new(80, 95));
//!
//! let mut p1 = SideState::new(SideId::P1);
//! p1.roster.push(Combatant::new("Tauros", 100, 300, 110));
//! p1.set_active(Some(0));
//! let mut p2 = SideState::new(SideId::P2);
//! p2.roster.push(Combatant::new("Snorlax", 100, 520, 30));
//! p2.set_active(Some(0));
//! let live = BattleSnapshot::new(p1, p2);
//!
//! let mut session = SimulationSession::new("battle-1", TurnEngine::new(dex, judge));
//! session.start(&live).unwrap();
//! session.select_move(SideId::P1, "Body Slam").unwrap();
//! session.select_move(SideId::P2, "Body Slam").unwrap();
//! session.execute().unwrap();
//! session.advance().unwrap();
//! assert_eq!(session.turn(), 1);
//! ```

pub mod decision;
pub mod effect;
pub mod error;
pub mod matchup;
pub mod metadata;
pub mod order;
pub mod session;
pub mod turn;

// Re-export main types at crate root for convenience
pub use decision::{DecisionKind, DecisionQueue, DecisionResolution, PendingDecision};
pub use effect::{apply_move, EffectKind, EffectReport};
pub use error::EngineError;
pub use matchup::{DamagePolicy, DamageRange, FixedJudge, KoChance, MatchupJudge, MatchupOutcome};
pub use metadata::{
    EffectTarget, FieldEffect, Fraction, MoveCategory, MoveDex, MoveMetadata, SecondaryEffect,
    StatChange, StaticMoveDex,
};
pub use order::{resolve_order, OrderDecision, OrderReason};
pub use session::{SessionPhase, SessionRegistry, SimulationSession, TurnRecord};
pub use turn::{ActionSpec, MoveOutcome, TurnEngine, TurnResult};
