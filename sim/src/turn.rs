//! Turn orchestration
//!
//! Composes order resolution and effect application into one full two-action
//! turn: resolve who goes first, apply the first action, short-circuit if
//! either combatant left play, otherwise apply the second action against the
//! already-mutated working state.

use foresight_battle::{BattleSnapshot, SideId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::decision::PendingDecision;
use crate::effect::apply_move;
use crate::error::EngineError;
use crate::matchup::{DamagePolicy, MatchupJudge, MatchupOutcome};
use crate::metadata::{MoveCategory, MoveDex, MoveMetadata};
use crate::order::{resolve_order, OrderDecision};

/// A (side, move) selection for one upcoming turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub side: SideId,
    pub move_name: String,
}

impl ActionSpec {
    pub fn new(side: SideId, move_name: impl Into<String>) -> Self {
        Self {
            side,
            move_name: move_name.into(),
        }
    }
}

/// Immutable record of one resolved action within a turn
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Acting side
    pub side: SideId,

    pub move_name: String,

    /// Execution rank within the turn (1 or 2)
    pub order: u8,

    /// Priority used for ordering
    pub priority: i8,

    /// Effective speed used for ordering
    pub speed: u32,

    /// Damage dealt to the target
    pub damage: u32,

    /// Actor HP change over this action (negative = lost HP)
    pub actor_hp_delta: i64,

    /// Target HP change over this action
    pub target_hp_delta: i64,

    pub target_removed: bool,
    pub actor_removed: bool,

    /// Rendered account of the action
    pub description: String,
}

/// Everything one orchestrated turn produced
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// The order call; absent when the turn could not start at all
    pub order: Option<OrderDecision>,

    /// One or two outcomes in execution order
    pub outcomes: Vec<MoveOutcome>,

    /// Output snapshot, independent of the input
    pub snapshot: BattleSnapshot,

    /// Branch points raised during the turn; surfaced, never blocking here
    pub pending: Vec<PendingDecision>,

    /// Soft failures recorded along the way
    pub errors: Vec<EngineError>,
}

impl TurnResult {
    /// Whether the second action was skipped because a combatant left play
    pub fn short_circuited(&self) -> bool {
        self.outcomes.len() == 1
    }

    fn aborted(snapshot: &BattleSnapshot, errors: Vec<EngineError>) -> Self {
        Self {
            order: None,
            outcomes: Vec::new(),
            snapshot: snapshot.clone(),
            pending: Vec::new(),
            errors,
        }
    }
}

/// One action's application, folded back into the turn loop
struct Applied {
    snapshot: BattleSnapshot,
    outcome: Option<MoveOutcome>,
    pending: Vec<PendingDecision>,
    errors: Vec<EngineError>,
    stop: bool,
}

/// The turn engine: metadata source, matchup calculator, random source, and
/// range-collapse policy bundled behind one orchestration entry point
///
/// The random source only feeds full order ties. Production callers use
/// [`TurnEngine::new`]; tests seed it for reproducible tie-breaks.
#[derive(Debug)]
pub struct TurnEngine<D, J, R = SmallRng> {
    dex: D,
    judge: J,
    rng: R,
    policy: DamagePolicy,
    format: String,
}

impl<D: MoveDex, J: MatchupJudge> TurnEngine<D, J, SmallRng> {
    /// Engine with an entropy-seeded random source
    pub fn new(dex: D, judge: J) -> Self {
        Self::with_rng(dex, judge, SmallRng::from_entropy())
    }

    /// Engine with a deterministic random source
    pub fn with_seed(dex: D, judge: J, seed: u64) -> Self {
        Self::with_rng(dex, judge, SmallRng::seed_from_u64(seed))
    }
}

impl<D: MoveDex, J: MatchupJudge, R: Rng> TurnEngine<D, J, R> {
    /// Engine with a caller-supplied random source
    pub fn with_rng(dex: D, judge: J, rng: R) -> Self {
        Self {
            dex,
            judge,
            rng,
            policy: DamagePolicy::default(),
            format: "standard".to_string(),
        }
    }

    pub fn with_policy(mut self, policy: DamagePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn policy(&self) -> DamagePolicy {
        self.policy
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Resolve one full turn against a snapshot
    ///
    /// The input is never mutated; the returned snapshot is fully
    /// independent. Exactly one action per side is required.
    pub fn run_turn(
        &mut self,
        snapshot: &BattleSnapshot,
        p1_action: &ActionSpec,
        p2_action: &ActionSpec,
    ) -> TurnResult {
        if p1_action.side != SideId::P1 || p2_action.side != SideId::P2 {
            return TurnResult::aborted(
                snapshot,
                vec![EngineError::InvalidSideReference(
                    "turn requires exactly one action per side".to_string(),
                )],
            );
        }

        let mut working = snapshot.clone();
        working.field.turn += 1;

        let mut errors = Vec::new();
        if working.p1.able_active().is_none() {
            errors.push(EngineError::NoActiveCombatant(SideId::P1));
        }
        if working.p2.able_active().is_none() {
            errors.push(EngineError::NoActiveCombatant(SideId::P2));
        }
        if !errors.is_empty() {
            return TurnResult::aborted(snapshot, errors);
        }

        // Unknown moves order at the default priority 0 and fail later in
        // the pipeline, which records the error.
        let p1_meta = self.meta_or_placeholder(&p1_action.move_name);
        let p2_meta = self.meta_or_placeholder(&p2_action.move_name);

        let order = {
            let p1_active = working.p1.able_active().unwrap();
            let p2_active = working.p2.able_active().unwrap();
            resolve_order(
                p1_active,
                &p1_meta,
                p2_active,
                &p2_meta,
                &working.field,
                &mut self.rng,
            )
        };

        let (first, second) = if order.first == SideId::P1 {
            (p1_action, p2_action)
        } else {
            (p2_action, p1_action)
        };

        let mut outcomes = Vec::new();
        let mut pending = Vec::new();

        let applied = self.perform(&working, first, 1, &order);
        working = applied.snapshot;
        outcomes.extend(applied.outcome);
        pending.extend(applied.pending);
        errors.extend(applied.errors);

        if applied.stop {
            tracing::debug!(
                first = first.side.as_str(),
                "turn short-circuited after the first action"
            );
        } else {
            let applied = self.perform(&working, second, 2, &order);
            working = applied.snapshot;
            outcomes.extend(applied.outcome);
            pending.extend(applied.pending);
            errors.extend(applied.errors);
        }

        tracing::debug!(
            turn = working.field.turn,
            outcomes = outcomes.len(),
            pending = pending.len(),
            "turn resolved"
        );

        TurnResult {
            order: Some(order),
            outcomes,
            snapshot: working,
            pending,
            errors,
        }
    }

    fn meta_or_placeholder(&self, move_name: &str) -> MoveMetadata {
        self.dex
            .lookup(move_name, &self.format)
            .unwrap_or_else(|| MoveMetadata::new(move_name, MoveCategory::Status))
    }

    /// Assess and apply one action against the working snapshot
    fn perform(
        &self,
        working: &BattleSnapshot,
        action: &ActionSpec,
        rank: u8,
        order: &OrderDecision,
    ) -> Applied {
        let target = action.side.opponent();

        let outcome = match (
            self.dex.lookup(&action.move_name, &self.format),
            working.side(action.side).able_active(),
            working.side(target).able_active(),
        ) {
            (Some(meta), Some(attacker), Some(defender)) => {
                self.judge.assess(attacker, defender, &meta, &working.field)
            }
            _ => MatchupOutcome::non_damaging(),
        };

        let actor_before = active_hp(working, action.side);
        let target_before = active_hp(working, target);

        let report = apply_move(
            working,
            action.side,
            target,
            &action.move_name,
            &outcome,
            &self.dex,
            &self.format,
            self.policy,
        );

        let stop = report.target_removed || report.actor_removed;
        let outcome = report.errors.is_empty().then(|| MoveOutcome {
            side: action.side,
            move_name: action.move_name.clone(),
            order: rank,
            priority: order.priority_of(action.side),
            speed: order.speed_of(action.side),
            damage: report.damage_dealt,
            actor_hp_delta: active_hp(&report.snapshot, action.side) as i64 - actor_before as i64,
            target_hp_delta: active_hp(&report.snapshot, target) as i64 - target_before as i64,
            target_removed: report.target_removed,
            actor_removed: report.actor_removed,
            description: report.description,
        });

        Applied {
            snapshot: report.snapshot,
            outcome,
            pending: report.pending,
            errors: report.errors,
            stop,
        }
    }
}

fn active_hp(snapshot: &BattleSnapshot, side: SideId) -> u32 {
    snapshot.side(side).active().map_or(0, |c| c.current_hp)
}
