//! Speculative Turn Example
//!
//! Builds a small move dex and a fixed-range matchup judge, opens a session
//! through the registry, and walks two speculative turns: a plain exchange,
//! then a pivot move that raises a replacement decision which must be
//! resolved before the session will advance.
//!
//! Run with `RUST_LOG=foresight_sim=debug` to watch the engine's decisions.

use anyhow::Result;
use foresight_battle::{BattleSnapshot, Combatant, SideId, SideState};
use foresight_sim::{
    DamageRange, DecisionResolution, FixedJudge, MoveCategory, MoveMetadata, SessionRegistry,
    StaticMoveDex, TurnEngine,
};

fn build_dex() -> StaticMoveDex {
    let mut dex = StaticMoveDex::new();
    dex.insert(MoveMetadata::new("Body Slam", MoveCategory::Physical));
    dex.insert(MoveMetadata::new("Double-Edge", MoveCategory::Physical).with_recoil(1, 3));
    dex.insert(MoveMetadata::new("U-turn", MoveCategory::Physical).with_self_switch());
    dex.insert(MoveMetadata::new("Quick Attack", MoveCategory::Physical).with_priority(1));
    dex
}

fn build_judge() -> FixedJudge {
    let mut judge = FixedJudge::new();
    judge.set("Body Slam", DamageRange::new(80, 95));
    judge.set("Double-Edge", DamageRange::new(120, 142));
    judge.set("U-turn", DamageRange::new(28, 34));
    judge.set("Quick Attack", DamageRange::new(35, 42));
    judge
}

fn build_live_snapshot() -> BattleSnapshot {
    let mut p1 = SideState::new(SideId::P1);
    p1.roster.push(
        Combatant::new("Tauros", 100, 291, 318)
            .with_move("Body Slam")
            .with_move("Double-Edge")
            .with_move("U-turn"),
    );
    p1.roster.push(Combatant::new("Starmie", 100, 261, 328).with_move("Body Slam"));
    p1.set_active(Some(0));

    let mut p2 = SideState::new(SideId::P2);
    p2.roster.push(
        Combatant::new("Snorlax", 100, 521, 96)
            .with_move("Body Slam")
            .with_move("Quick Attack"),
    );
    p2.set_active(Some(0));

    BattleSnapshot::new(p1, p2)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut registry = SessionRegistry::new();
    let session = registry.open("example-battle", TurnEngine::new(build_dex(), build_judge()))?;

    session.start(&build_live_snapshot())?;

    // Turn 1: a plain exchange
    session.select_move(SideId::P1, "Double-Edge")?;
    session.select_move(SideId::P2, "Body Slam")?;
    let result = session.execute()?;

    println!("turn 1 (first: {}, reason: {})",
        result.order.as_ref().map(|o| o.first.as_str()).unwrap_or("-"),
        result.order.as_ref().map(|o| o.reason.as_str()).unwrap_or("-"),
    );
    for outcome in &result.outcomes {
        println!("  [{}] {} used {}: {}",
            outcome.order, outcome.side, outcome.move_name, outcome.description);
    }
    session.advance()?;

    // Turn 2: a pivot move that suspends the session on a replacement choice
    session.select_move(SideId::P1, "U-turn")?;
    session.select_move(SideId::P2, "Body Slam")?;
    let result = session.execute()?;

    println!("turn 2 raised {} pending decision(s)", result.pending.len());
    for decision in session.pending_decisions() {
        println!("  [{}] {}", decision.kind.label(), decision.prompt);
    }

    // Advancing is refused until the queue drains
    assert!(session.advance().is_err());
    session.resolve_decision(0, DecisionResolution::Replacement(1))?;
    session.advance()?;

    let snapshot = session.snapshot().expect("session is active");
    println!(
        "after {} turns: {} at {} HP vs {} at {} HP",
        session.turn(),
        snapshot.p1.active().map(|c| c.name.as_str()).unwrap_or("-"),
        snapshot.p1.active().map(|c| c.current_hp).unwrap_or(0),
        snapshot.p2.active().map(|c| c.name.as_str()).unwrap_or("-"),
        snapshot.p2.active().map(|c| c.current_hp).unwrap_or(0),
    );

    // Done speculating: throw it all away
    session.reset();
    registry.close("example-battle");
    Ok(())
}
