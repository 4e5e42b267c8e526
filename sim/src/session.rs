//! Simulation sessions and the in-memory session registry
//!
//! A [`SimulationSession`] chains speculative turns against a private copy of
//! the battle state: start from a live snapshot, select one action per side,
//! execute the turn, resolve any pending decisions, advance, repeat, and
//! finally reset to throw the whole speculation away. Every operation runs to
//! completion synchronously; the only suspension point is the precondition
//! that [`advance`](SimulationSession::advance) refuses to run while the
//! decision queue is non-empty.

use std::collections::HashMap;

use foresight_battle::{BattleSnapshot, SideId, StatusCondition};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::decision::{DecisionKind, DecisionQueue, DecisionResolution, PendingDecision};
use crate::error::EngineError;
use crate::matchup::MatchupJudge;
use crate::metadata::MoveDex;
use crate::turn::{ActionSpec, TurnEngine, TurnResult};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No snapshot; nothing to simulate
    Inactive,
    /// Snapshot present, waiting for both action selections
    Selecting,
    /// Both actions selected, ready to execute
    Ready,
    /// Turn executed, waiting for decisions and/or advance
    Resolved,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Inactive => "inactive",
            SessionPhase::Selecting => "selecting",
            SessionPhase::Ready => "ready",
            SessionPhase::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One committed speculative turn
#[derive(Debug, Clone)]
pub struct TurnRecord {
    /// 1-based turn index within the session
    pub turn: u32,

    pub p1_move: String,
    pub p2_move: String,

    pub result: TurnResult,
}

/// A stateful speculative simulation over one battle
///
/// Owns exactly one working snapshot at a time. Snapshots handed in are deep
/// copied, so the session never holds a reference into caller state.
#[derive(Debug)]
pub struct SimulationSession<D, J, R = SmallRng> {
    battle_id: String,
    engine: TurnEngine<D, J, R>,

    phase: SessionPhase,
    snapshot: Option<BattleSnapshot>,

    /// Completed speculative turns in this session
    turn: u32,

    p1_pick: Option<String>,
    p2_pick: Option<String>,

    /// Result of the executed-but-not-yet-advanced turn
    latest: Option<TurnResult>,

    queue: DecisionQueue,

    /// Append-only log of committed turns
    history: Vec<TurnRecord>,

    /// Soft failures accumulated across executions
    errors: Vec<EngineError>,

    /// Rendered notes from resolved decisions
    notes: Vec<String>,
}

impl<D: MoveDex, J: MatchupJudge, R: Rng> SimulationSession<D, J, R> {
    /// Create an inactive session for a battle id
    pub fn new(battle_id: impl Into<String>, engine: TurnEngine<D, J, R>) -> Self {
        Self {
            battle_id: battle_id.into(),
            engine,
            phase: SessionPhase::Inactive,
            snapshot: None,
            turn: 0,
            p1_pick: None,
            p2_pick: None,
            latest: None,
            queue: DecisionQueue::new(),
            history: Vec::new(),
            errors: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Begin speculating from a live snapshot
    ///
    /// The snapshot is deep copied; the caller's copy is never touched again.
    pub fn start(&mut self, live: &BattleSnapshot) -> Result<(), EngineError> {
        if self.phase != SessionPhase::Inactive {
            return Err(EngineError::rejected(
                "start",
                format!("session already active (phase {})", self.phase),
            ));
        }
        self.snapshot = Some(live.clone());
        self.phase = SessionPhase::Selecting;
        self.turn = 0;
        tracing::debug!(battle = %self.battle_id, "session started");
        Ok(())
    }

    /// Select one side's move for the upcoming turn
    pub fn select_move(
        &mut self,
        side: SideId,
        move_name: impl Into<String>,
    ) -> Result<(), EngineError> {
        if !matches!(self.phase, SessionPhase::Selecting | SessionPhase::Ready) {
            return Err(EngineError::rejected(
                "select_move",
                format!("phase is {}", self.phase),
            ));
        }
        let move_name = move_name.into();
        match side {
            SideId::P1 => self.p1_pick = Some(move_name),
            SideId::P2 => self.p2_pick = Some(move_name),
        }
        self.phase = if self.p1_pick.is_some() && self.p2_pick.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Selecting
        };
        Ok(())
    }

    /// Execute the selected turn
    ///
    /// Runs the orchestrator against the working snapshot, adopts the result
    /// snapshot, and moves any raised decisions into the queue.
    pub fn execute(&mut self) -> Result<&TurnResult, EngineError> {
        if self.phase != SessionPhase::Ready {
            return Err(EngineError::rejected(
                "execute",
                format!("phase is {}", self.phase),
            ));
        }

        let p1_action = ActionSpec::new(SideId::P1, self.p1_pick.clone().unwrap());
        let p2_action = ActionSpec::new(SideId::P2, self.p2_pick.clone().unwrap());
        let snapshot = self.snapshot.as_ref().unwrap();

        let result = self.engine.run_turn(snapshot, &p1_action, &p2_action);

        self.snapshot = Some(result.snapshot.clone());
        self.queue.extend(result.pending.iter().cloned());
        self.errors.extend(result.errors.iter().cloned());
        self.latest = Some(result);
        self.phase = SessionPhase::Resolved;

        tracing::debug!(
            battle = %self.battle_id,
            pending = self.queue.len(),
            "turn executed"
        );
        Ok(self.latest.as_ref().unwrap())
    }

    /// Resolve one pending decision and apply its concrete consequence to the
    /// working snapshot
    pub fn resolve_decision(
        &mut self,
        index: usize,
        resolution: DecisionResolution,
    ) -> Result<(), EngineError> {
        let entry = self.queue.resolve(index, &resolution)?;
        let Some(snapshot) = self.snapshot.as_mut() else {
            return Ok(());
        };

        match (&entry.kind, &resolution) {
            (DecisionKind::Replacement { .. }, DecisionResolution::Replacement(chosen)) => {
                let side = snapshot.side_mut(entry.side);
                side.set_active(Some(*chosen));
                let name = side.active().map(|c| c.name.clone()).unwrap_or_default();
                self.notes.push(format!("{} sent in {name}", entry.side));
            }
            (
                DecisionKind::Probabilistic {
                    effect, afflicts, ..
                },
                DecisionResolution::Occurred(true),
            ) => {
                // A status token lands on the afflicted side's active; any
                // other effect token is only recorded.
                match StatusCondition::from_token(effect) {
                    Some(status) => {
                        if let Some(combatant) = snapshot.side_mut(*afflicts).active_mut() {
                            if combatant.status.is_none() {
                                combatant.status = Some(status);
                                self.notes
                                    .push(format!("{} was {}", combatant.name, status.as_str()));
                            }
                        }
                    }
                    None => self.notes.push(format!("{effect} occurred")),
                }
            }
            (DecisionKind::Probabilistic { effect, .. }, DecisionResolution::Occurred(false)) => {
                self.notes.push(format!("{effect} did not occur"));
            }
            (DecisionKind::HitCount { .. }, DecisionResolution::HitCount(count)) => {
                self.notes.push(format!("connected {count} times"));
            }
            (DecisionKind::ItemActivation { item }, DecisionResolution::Triggered(triggered)) => {
                let verb = if *triggered { "activated" } else { "did not activate" };
                self.notes.push(format!("{item} {verb}"));
            }
            (DecisionKind::AbilityTrigger { ability }, DecisionResolution::Triggered(triggered)) => {
                let verb = if *triggered { "triggered" } else { "did not trigger" };
                self.notes.push(format!("{ability} {verb}"));
            }
            // The queue already validated the pairing
            _ => {}
        }
        Ok(())
    }

    /// Commit the executed turn into history and return to selecting
    ///
    /// Refused while any decision is still pending; resolving the queue is
    /// how the caller un-pauses the simulation.
    pub fn advance(&mut self) -> Result<u32, EngineError> {
        if self.phase != SessionPhase::Resolved {
            return Err(EngineError::rejected(
                "advance",
                format!("phase is {}", self.phase),
            ));
        }
        if !self.queue.is_empty() {
            return Err(EngineError::rejected(
                "advance",
                format!("{} pending decisions", self.queue.len()),
            ));
        }

        let result = self.latest.take().unwrap();
        self.turn += 1;
        self.history.push(TurnRecord {
            turn: self.turn,
            p1_move: self.p1_pick.take().unwrap_or_default(),
            p2_move: self.p2_pick.take().unwrap_or_default(),
            result,
        });
        self.phase = SessionPhase::Selecting;

        tracing::debug!(battle = %self.battle_id, turn = self.turn, "turn committed");
        Ok(self.turn)
    }

    /// Discard the speculation entirely
    ///
    /// Unconditional: valid from any phase, idempotent when already inactive.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Inactive;
        self.snapshot = None;
        self.turn = 0;
        self.p1_pick = None;
        self.p2_pick = None;
        self.latest = None;
        self.queue.clear();
        self.history.clear();
        self.errors.clear();
        self.notes.clear();
        tracing::debug!(battle = %self.battle_id, "session reset");
    }

    // === Read-only accessors ===

    pub fn battle_id(&self) -> &str {
        &self.battle_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The current working snapshot
    pub fn snapshot(&self) -> Option<&BattleSnapshot> {
        self.snapshot.as_ref()
    }

    /// The most recent turn result: the uncommitted one if a turn was just
    /// executed, otherwise the last committed turn's
    pub fn latest_result(&self) -> Option<&TurnResult> {
        self.latest
            .as_ref()
            .or_else(|| self.history.last().map(|record| &record.result))
    }

    /// Number of committed speculative turns
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_decisions(&self) -> impl Iterator<Item = &PendingDecision> {
        self.queue.iter()
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn errors(&self) -> &[EngineError] {
        &self.errors
    }

    /// Notes rendered while resolving decisions
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// The move currently selected for a side
    pub fn selected(&self, side: SideId) -> Option<&str> {
        match side {
            SideId::P1 => self.p1_pick.as_deref(),
            SideId::P2 => self.p2_pick.as_deref(),
        }
    }
}

/// In-memory mapping of open sessions keyed by opaque battle id
///
/// Nothing here persists: closing or dropping the registry discards every
/// session.
pub struct SessionRegistry<D, J, R = SmallRng> {
    sessions: HashMap<String, SimulationSession<D, J, R>>,
}

impl<D: MoveDex, J: MatchupJudge, R: Rng> SessionRegistry<D, J, R> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Open a session for a battle id; duplicate ids are rejected
    pub fn open(
        &mut self,
        battle_id: impl Into<String>,
        engine: TurnEngine<D, J, R>,
    ) -> Result<&mut SimulationSession<D, J, R>, EngineError> {
        let battle_id = battle_id.into();
        if self.sessions.contains_key(&battle_id) {
            return Err(EngineError::rejected(
                "open",
                format!("battle {battle_id} already has a session"),
            ));
        }
        Ok(self
            .sessions
            .entry(battle_id.clone())
            .or_insert_with(|| SimulationSession::new(battle_id, engine)))
    }

    pub fn get(&self, battle_id: &str) -> Option<&SimulationSession<D, J, R>> {
        self.sessions.get(battle_id)
    }

    pub fn get_mut(&mut self, battle_id: &str) -> Option<&mut SimulationSession<D, J, R>> {
        self.sessions.get_mut(battle_id)
    }

    /// Close and discard a session; returns whether one existed
    pub fn close(&mut self, battle_id: &str) -> bool {
        self.sessions.remove(battle_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }
}

impl<D: MoveDex, J: MatchupJudge, R: Rng> Default for SessionRegistry<D, J, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::{DamageRange, FixedJudge};
    use crate::metadata::{MoveCategory, MoveMetadata, StaticMoveDex};
    use foresight_battle::{Combatant, SideState};

    fn live_snapshot() -> BattleSnapshot {
        let mut p1 = SideState::new(SideId::P1);
        p1.roster.push(Combatant::new("Tauros", 100, 300, 110));
        p1.roster.push(Combatant::new("Starmie", 100, 260, 115));
        p1.set_active(Some(0));

        let mut p2 = SideState::new(SideId::P2);
        p2.roster.push(Combatant::new("Snorlax", 100, 520, 30));
        p2.set_active(Some(0));

        BattleSnapshot::new(p1, p2)
    }

    fn session() -> SimulationSession<StaticMoveDex, FixedJudge> {
        let mut dex = StaticMoveDex::new();
        dex.insert(MoveMetadata::new("Body Slam", MoveCategory::Physical));
        dex.insert(MoveMetadata::new("Earthquake", MoveCategory::Physical));
        dex.insert(MoveMetadata::new("U-turn", MoveCategory::Physical).with_self_switch());
        dex.insert(MoveMetadata::new("Ice Beam", MoveCategory::Special).with_secondary(10, "frz"));

        let mut judge = FixedJudge::new();
        judge.set("Body Slam", DamageRange::new(80, 95));
        judge.set("Earthquake", DamageRange::new(100, 120));
        judge.set("U-turn", DamageRange::exact(30));
        judge.set("Ice Beam", DamageRange::exact(60));

        SimulationSession::new("battle-1", TurnEngine::with_seed(dex, judge, 1))
    }

    fn ready_session() -> SimulationSession<StaticMoveDex, FixedJudge> {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "Body Slam").unwrap();
        s.select_move(SideId::P2, "Earthquake").unwrap();
        s
    }

    #[test]
    fn test_lifecycle_phases() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Inactive);
        assert!(!s.is_active());

        s.start(&live_snapshot()).unwrap();
        assert_eq!(s.phase(), SessionPhase::Selecting);
        assert!(s.is_active());
        assert_eq!(s.turn(), 0);

        s.select_move(SideId::P1, "Body Slam").unwrap();
        assert_eq!(s.phase(), SessionPhase::Selecting);

        s.select_move(SideId::P2, "Earthquake").unwrap();
        assert_eq!(s.phase(), SessionPhase::Ready);
        assert_eq!(s.selected(SideId::P1), Some("Body Slam"));

        s.execute().unwrap();
        assert_eq!(s.phase(), SessionPhase::Resolved);

        s.advance().unwrap();
        assert_eq!(s.phase(), SessionPhase::Selecting);
        assert_eq!(s.turn(), 1);
    }

    #[test]
    fn test_select_before_start_rejected() {
        let mut s = session();
        let err = s.select_move(SideId::P1, "Body Slam").unwrap_err();
        assert!(matches!(err, EngineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        assert!(s.start(&live_snapshot()).is_err());
    }

    #[test]
    fn test_execute_requires_both_picks() {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "Body Slam").unwrap();

        let err = s.execute().unwrap_err();
        assert!(matches!(err, EngineError::InvalidStateTransition { .. }));
        // Rejection left the phase alone
        assert_eq!(s.phase(), SessionPhase::Selecting);
    }

    #[test]
    fn test_execute_updates_working_snapshot() {
        let mut s = ready_session();
        let result = s.execute().unwrap();
        assert_eq!(result.outcomes.len(), 2);

        // Tauros (faster) hit Snorlax for the 87 midpoint, Snorlax hit back for 110
        let snap = s.snapshot().unwrap();
        assert_eq!(snap.p2.active().unwrap().current_hp, 433);
        assert_eq!(snap.p1.active().unwrap().current_hp, 190);
        assert_eq!(snap.field.turn, 1);
    }

    #[test]
    fn test_advance_commits_history_and_clears_picks() {
        let mut s = ready_session();
        s.execute().unwrap();

        let turn = s.advance().unwrap();
        assert_eq!(turn, 1);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].turn, 1);
        assert_eq!(s.history()[0].p1_move, "Body Slam");
        assert_eq!(s.history()[0].p2_move, "Earthquake");
        assert!(s.selected(SideId::P1).is_none());
        assert!(s.selected(SideId::P2).is_none());

        // The committed result stays reachable
        assert!(s.latest_result().is_some());
    }

    #[test]
    fn test_advance_without_execute_rejected() {
        let mut s = ready_session();
        assert!(s.advance().is_err());
    }

    #[test]
    fn test_advance_blocked_until_queue_drains() {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "U-turn").unwrap();
        s.select_move(SideId::P2, "Body Slam").unwrap();
        s.execute().unwrap();

        assert_eq!(s.pending_count(), 1);

        // Blocked while the replacement decision is open
        let err = s.advance().unwrap_err();
        assert!(matches!(err, EngineError::InvalidStateTransition { .. }));
        assert_eq!(s.phase(), SessionPhase::Resolved);
        assert_eq!(s.turn(), 0);
        assert!(s.history().is_empty());

        // Resolving the queue un-pauses the session
        s.resolve_decision(0, DecisionResolution::Replacement(1))
            .unwrap();
        assert_eq!(s.pending_count(), 0);
        assert_eq!(s.advance().unwrap(), 1);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_resolve_replacement_switches_active() {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "U-turn").unwrap();
        s.select_move(SideId::P2, "Body Slam").unwrap();
        s.execute().unwrap();

        s.resolve_decision(0, DecisionResolution::Replacement(1))
            .unwrap();
        assert_eq!(s.snapshot().unwrap().p1.active().unwrap().name, "Starmie");
        assert!(s.notes()[0].contains("Starmie"));
    }

    #[test]
    fn test_resolve_probabilistic_status_lands() {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "Ice Beam").unwrap();
        s.select_move(SideId::P2, "Body Slam").unwrap();
        s.execute().unwrap();

        assert_eq!(s.pending_count(), 1);
        s.resolve_decision(0, DecisionResolution::Occurred(true))
            .unwrap();

        let snorlax = s.snapshot().unwrap().p2.active().unwrap();
        assert_eq!(snorlax.status, Some(StatusCondition::Freeze));
    }

    #[test]
    fn test_resolve_probabilistic_declined_changes_nothing() {
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "Ice Beam").unwrap();
        s.select_move(SideId::P2, "Body Slam").unwrap();
        s.execute().unwrap();

        s.resolve_decision(0, DecisionResolution::Occurred(false))
            .unwrap();
        assert!(s.snapshot().unwrap().p2.active().unwrap().status.is_none());
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn test_multi_turn_chaining() {
        let mut s = ready_session();
        s.execute().unwrap();
        s.advance().unwrap();

        s.select_move(SideId::P1, "Body Slam").unwrap();
        s.select_move(SideId::P2, "Earthquake").unwrap();
        s.execute().unwrap();
        s.advance().unwrap();

        assert_eq!(s.turn(), 2);
        assert_eq!(s.history().len(), 2);
        // Damage accumulated across both speculative turns
        assert_eq!(s.snapshot().unwrap().p2.active().unwrap().current_hp, 346);
        assert_eq!(s.snapshot().unwrap().field.turn, 2);
    }

    #[test]
    fn test_reset_from_any_phase() {
        // From Selecting
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Inactive);
        assert!(!s.is_active());

        // From Resolved with a non-empty queue
        let mut s = session();
        s.start(&live_snapshot()).unwrap();
        s.select_move(SideId::P1, "U-turn").unwrap();
        s.select_move(SideId::P2, "Body Slam").unwrap();
        s.execute().unwrap();
        assert_eq!(s.pending_count(), 1);

        s.reset();
        assert_eq!(s.phase(), SessionPhase::Inactive);
        assert_eq!(s.pending_count(), 0);
        assert!(s.history().is_empty());
        assert_eq!(s.turn(), 0);
        assert!(s.snapshot().is_none());

        // Idempotent when already inactive
        s.reset();
        assert_eq!(s.phase(), SessionPhase::Inactive);

        // Reusable after reset
        s.start(&live_snapshot()).unwrap();
        assert_eq!(s.phase(), SessionPhase::Selecting);
    }

    #[test]
    fn test_session_owns_independent_copy() {
        let live = live_snapshot();
        let mut s = session();
        s.start(&live).unwrap();
        s.select_move(SideId::P1, "Body Slam").unwrap();
        s.select_move(SideId::P2, "Earthquake").unwrap();
        s.execute().unwrap();

        // The caller's snapshot is untouched by the speculation
        assert_eq!(live.p2.active().unwrap().current_hp, 520);
        assert_eq!(live.field.turn, 0);
    }

    fn registry_engine() -> TurnEngine<StaticMoveDex, FixedJudge> {
        TurnEngine::with_seed(StaticMoveDex::new(), FixedJudge::new(), 1)
    }

    #[test]
    fn test_registry_open_get_close() {
        let mut registry = SessionRegistry::new();
        assert!(registry.is_empty());

        registry.open("battle-1", registry_engine()).unwrap();
        registry.open("battle-2", registry_engine()).unwrap();
        assert_eq!(registry.len(), 2);

        assert!(registry.get("battle-1").is_some());
        assert!(registry.get("battle-9").is_none());

        let s = registry.get_mut("battle-1").unwrap();
        s.start(&live_snapshot()).unwrap();
        assert!(registry.get("battle-1").unwrap().is_active());

        assert!(registry.close("battle-1"));
        assert!(!registry.close("battle-1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let mut registry = SessionRegistry::new();
        registry.open("battle-1", registry_engine()).unwrap();

        let err = registry.open("battle-1", registry_engine()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidStateTransition { .. }));
    }
}
