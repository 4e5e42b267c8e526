//! Effect application pipeline
//!
//! Applies one resolved action to a battle snapshot. The pipeline is an
//! ordered table of stage handlers keyed by [`EffectKind`]; each stage
//! inspects the move's metadata and either acts or stays a silent no-op, so
//! new stages are additive. Anything whose outcome metadata alone cannot
//! determine is recorded as a [`PendingDecision`] instead of guessed.
//!
//! The input snapshot is never mutated: every call clones it and works on
//! the clone. Failures (unknown move, no able combatant) are recorded in the
//! report's error list with the input returned unchanged.

use foresight_battle::{BattleSnapshot, SideId};

use crate::decision::PendingDecision;
use crate::error::EngineError;
use crate::matchup::{DamagePolicy, MatchupOutcome};
use crate::metadata::{EffectTarget, FieldEffect, MoveDex, MoveMetadata};

/// Tag identifying one pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Damage,
    Recoil,
    Drain,
    StatStages,
    Status,
    Field,
    SelfSwitch,
    Secondary,
    MultiHit,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Damage => "damage",
            EffectKind::Recoil => "recoil",
            EffectKind::Drain => "drain",
            EffectKind::StatStages => "stat-stages",
            EffectKind::Status => "status",
            EffectKind::Field => "field",
            EffectKind::SelfSwitch => "self-switch",
            EffectKind::Secondary => "secondary",
            EffectKind::MultiHit => "multi-hit",
        }
    }
}

type StageFn = for<'a, 'b> fn(&'a mut EffectContext<'b>);

/// Fixed stage order. Adding an effect means adding a row here and its
/// handler below; dispatch never changes.
const STAGES: &[(EffectKind, StageFn)] = &[
    (EffectKind::Damage, stage_damage),
    (EffectKind::Recoil, stage_recoil),
    (EffectKind::Drain, stage_drain),
    (EffectKind::StatStages, stage_stat_changes),
    (EffectKind::Status, stage_status),
    (EffectKind::Field, stage_field),
    (EffectKind::SelfSwitch, stage_self_switch),
    (EffectKind::Secondary, stage_secondary),
    (EffectKind::MultiHit, stage_multi_hit),
];

/// Working state threaded through the stages of one application
struct EffectContext<'a> {
    snapshot: BattleSnapshot,
    actor: SideId,
    target: SideId,
    meta: &'a MoveMetadata,
    outcome: &'a MatchupOutcome,
    policy: DamagePolicy,

    /// Damage actually dealt by the damage stage (post-clamp)
    damage_dealt: u32,
    target_removed: bool,
    actor_removed: bool,

    clauses: Vec<String>,
    pending: Vec<PendingDecision>,

    /// Set when no further stage may run (the actor left play)
    halted: bool,
}

/// Result of applying one action
#[derive(Debug, Clone)]
pub struct EffectReport {
    /// The new snapshot; independent of the input
    pub snapshot: BattleSnapshot,

    /// Damage dealt to the target by this application
    pub damage_dealt: u32,

    /// The target was removed from play
    pub target_removed: bool,

    /// The actor was removed from play (recoil)
    pub actor_removed: bool,

    /// Human-readable account of what happened
    pub description: String,

    /// Branch points raised during application
    pub pending: Vec<PendingDecision>,

    /// Soft failures; non-empty means the snapshot came back unchanged
    pub errors: Vec<EngineError>,
}

impl EffectReport {
    fn failed(snapshot: &BattleSnapshot, error: EngineError) -> Self {
        tracing::warn!(%error, "effect application rejected");
        Self {
            snapshot: snapshot.clone(),
            damage_dealt: 0,
            target_removed: false,
            actor_removed: false,
            description: String::new(),
            pending: Vec::new(),
            errors: vec![error],
        }
    }
}

/// Apply one action to a snapshot, producing a fresh snapshot
///
/// `outcome` is whatever the external matchup calculator reported for this
/// action; the pipeline collapses its damage range per `policy` and never
/// computes damage itself.
#[allow(clippy::too_many_arguments)]
pub fn apply_move(
    snapshot: &BattleSnapshot,
    actor: SideId,
    target: SideId,
    move_name: &str,
    outcome: &MatchupOutcome,
    dex: &dyn MoveDex,
    format: &str,
    policy: DamagePolicy,
) -> EffectReport {
    if actor == target {
        return EffectReport::failed(
            snapshot,
            EngineError::InvalidSideReference(format!("{actor} cannot act against itself")),
        );
    }
    let Some(meta) = dex.lookup(move_name, format) else {
        return EffectReport::failed(snapshot, EngineError::UnknownMove(move_name.to_string()));
    };
    if snapshot.side(actor).able_active().is_none() {
        return EffectReport::failed(snapshot, EngineError::NoActiveCombatant(actor));
    }
    if snapshot.side(target).able_active().is_none() {
        return EffectReport::failed(snapshot, EngineError::NoActiveCombatant(target));
    }

    let mut ctx = EffectContext {
        snapshot: snapshot.clone(),
        actor,
        target,
        meta: &meta,
        outcome,
        policy,
        damage_dealt: 0,
        target_removed: false,
        actor_removed: false,
        clauses: Vec::new(),
        pending: Vec::new(),
        halted: false,
    };

    for (kind, stage) in STAGES {
        if ctx.halted {
            break;
        }
        stage(&mut ctx);
        tracing::trace!(stage = kind.as_str(), move_name, "stage done");
    }

    EffectReport {
        snapshot: ctx.snapshot,
        damage_dealt: ctx.damage_dealt,
        target_removed: ctx.target_removed,
        actor_removed: ctx.actor_removed,
        description: ctx.clauses.join("; "),
        pending: ctx.pending,
        errors: Vec::new(),
    }
}

/// Collapse the reported range and subtract it from the target, clamped at
/// zero. Zero HP removes the target from play; stages that only concern a
/// still-active target are skipped afterwards, self-facing stages still run.
fn stage_damage(ctx: &mut EffectContext) {
    if !ctx.meta.is_damaging() {
        return;
    }
    let Some(range) = ctx.outcome.damage else {
        return;
    };
    let amount = ctx.policy.collapse(&range);

    let Some(defender) = ctx.snapshot.side_mut(ctx.target).active_mut() else {
        return;
    };
    let before = defender.current_hp;
    let applied = defender.take_damage(amount);
    let after = defender.current_hp;
    let name = defender.name.clone();
    let removed = !defender.is_able();

    ctx.damage_dealt = applied;
    ctx.clauses
        .push(format!("{name} took {applied} damage ({before} -> {after} HP)"));
    if removed {
        ctx.target_removed = true;
        ctx.clauses.push(format!("{name} fainted"));
    }
}

/// Recoil comes out of the actor as a fraction of damage dealt, minimum 1.
/// An actor knocked out by its own recoil halts the pipeline.
fn stage_recoil(ctx: &mut EffectContext) {
    let Some(fraction) = ctx.meta.recoil else {
        return;
    };
    if ctx.damage_dealt == 0 {
        return;
    }
    let amount = fraction.of(ctx.damage_dealt).max(1);

    let Some(actor) = ctx.snapshot.side_mut(ctx.actor).active_mut() else {
        return;
    };
    let applied = actor.take_damage(amount);
    let name = actor.name.clone();
    let removed = !actor.is_able();

    ctx.clauses
        .push(format!("{name} took {applied} recoil damage"));
    if removed {
        ctx.actor_removed = true;
        ctx.halted = true;
        ctx.clauses.push(format!("{name} fainted"));
    }
}

/// Drain restores a fraction of damage dealt, minimum 1, capped at max HP.
fn stage_drain(ctx: &mut EffectContext) {
    let Some(fraction) = ctx.meta.drain else {
        return;
    };
    if ctx.damage_dealt == 0 {
        return;
    }
    let amount = fraction.of(ctx.damage_dealt).max(1);

    let Some(actor) = ctx.snapshot.side_mut(ctx.actor).active_mut() else {
        return;
    };
    let restored = actor.heal(amount);
    let name = actor.name.clone();

    ctx.clauses.push(format!("{name} drained {restored} HP"));
}

/// Declared stat deltas; foe-facing deltas are skipped once the target has
/// left play.
fn stage_stat_changes(ctx: &mut EffectContext) {
    for change in &ctx.meta.stat_changes {
        let side = match change.applies_to {
            EffectTarget::User => ctx.actor,
            EffectTarget::Foe => {
                if ctx.target_removed {
                    continue;
                }
                ctx.target
            }
        };
        let Some(combatant) = ctx.snapshot.side_mut(side).active_mut() else {
            continue;
        };
        let applied = combatant.stages.boost(change.stat, change.delta);
        if applied != 0 {
            let verb = if applied > 0 { "rose" } else { "fell" };
            ctx.clauses.push(format!(
                "{}'s {} {} by {}",
                combatant.name,
                change.stat.as_str(),
                verb,
                applied.abs()
            ));
        }
    }
}

/// Guaranteed status infliction; fails silently on an already-statused or
/// removed target.
fn stage_status(ctx: &mut EffectContext) {
    let Some((applies_to, status)) = ctx.meta.status else {
        return;
    };
    let side = match applies_to {
        EffectTarget::User => ctx.actor,
        EffectTarget::Foe => {
            if ctx.target_removed {
                return;
            }
            ctx.target
        }
    };
    let Some(combatant) = ctx.snapshot.side_mut(side).active_mut() else {
        return;
    };
    if combatant.status.is_some() {
        return;
    }
    combatant.status = Some(status);
    ctx.clauses
        .push(format!("{} was {}", combatant.name, status.as_str()));
}

/// Field payload mutates the working snapshot's field directly.
fn stage_field(ctx: &mut EffectContext) {
    let Some(effect) = ctx.meta.field else {
        return;
    };
    let field = &mut ctx.snapshot.field;
    match effect {
        FieldEffect::SetWeather(weather) => {
            field.weather = Some(weather);
            ctx.clauses.push(format!("the weather became {weather}"));
        }
        FieldEffect::SetTerrain(terrain) => {
            field.terrain = Some(terrain);
            ctx.clauses.push(format!("{terrain} covered the field"));
        }
        FieldEffect::InvertSpeed => {
            field.speed_inverted = !field.speed_inverted;
            let state = if field.speed_inverted {
                "inverted"
            } else {
                "restored"
            };
            ctx.clauses.push(format!("the speed order was {state}"));
        }
    }
}

/// A self-switching move needs the caller to pick the replacement.
fn stage_self_switch(ctx: &mut EffectContext) {
    if !ctx.meta.self_switch {
        return;
    }
    let candidates = ctx.snapshot.side(ctx.actor).replacement_candidates();
    if candidates.is_empty() {
        return;
    }
    let name = ctx
        .snapshot
        .side(ctx.actor)
        .active()
        .map(|c| c.name.clone())
        .unwrap_or_default();
    ctx.clauses.push(format!("{name} is ready to switch out"));
    ctx.pending
        .push(PendingDecision::replacement(ctx.actor, candidates));
}

/// A chance-gated secondary effect is never guessed.
fn stage_secondary(ctx: &mut EffectContext) {
    let Some(secondary) = &ctx.meta.secondary else {
        return;
    };
    if ctx.target_removed {
        return;
    }
    ctx.clauses.push(format!(
        "{} may follow ({}% chance)",
        secondary.effect, secondary.chance
    ));
    ctx.pending.push(PendingDecision::probabilistic(
        ctx.actor,
        secondary.chance,
        secondary.effect.clone(),
        ctx.target,
    ));
}

/// The hit count of a multi-hit move is external input.
fn stage_multi_hit(ctx: &mut EffectContext) {
    let Some((min, max)) = ctx.meta.multi_hit else {
        return;
    };
    if ctx.damage_dealt == 0 || ctx.target_removed {
        return;
    }
    ctx.clauses
        .push(format!("hit count undetermined ({min}-{max})"));
    ctx.pending
        .push(PendingDecision::hit_count(ctx.actor, min, max));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::DecisionKind;
    use crate::matchup::DamageRange;
    use crate::metadata::{MoveCategory, StaticMoveDex};
    use foresight_battle::{Combatant, SideState, Stat, StatusCondition, Weather};

    const FORMAT: &str = "gen9ou";

    fn snapshot() -> BattleSnapshot {
        let mut p1 = SideState::new(SideId::P1);
        p1.roster.push(Combatant::new("Tauros", 100, 150, 110));
        p1.roster.push(Combatant::new("Starmie", 100, 260, 115));
        p1.set_active(Some(0));

        let mut p2 = SideState::new(SideId::P2);
        p2.roster.push(Combatant::new("Snorlax", 100, 100, 30));
        p2.set_active(Some(0));

        BattleSnapshot::new(p1, p2)
    }

    fn dex() -> StaticMoveDex {
        let mut dex = StaticMoveDex::new();
        dex.insert(MoveMetadata::new("Body Slam", MoveCategory::Physical));
        dex.insert(MoveMetadata::new("Double-Edge", MoveCategory::Physical).with_recoil(1, 3));
        dex.insert(MoveMetadata::new("Giga Drain", MoveCategory::Special).with_drain(1, 2));
        dex.insert(
            MoveMetadata::new("Thunder Wave", MoveCategory::Status)
                .with_status(crate::metadata::EffectTarget::Foe, StatusCondition::Paralysis),
        );
        dex.insert(
            MoveMetadata::new("Swords Dance", MoveCategory::Status).with_stat_change(
                crate::metadata::EffectTarget::User,
                Stat::Atk,
                2,
            ),
        );
        dex.insert(
            MoveMetadata::new("Crunch", MoveCategory::Physical).with_stat_change(
                crate::metadata::EffectTarget::Foe,
                Stat::Def,
                -1,
            ),
        );
        dex.insert(MoveMetadata::new("U-turn", MoveCategory::Physical).with_self_switch());
        dex.insert(MoveMetadata::new("Ice Beam", MoveCategory::Special).with_secondary(10, "frz"));
        dex.insert(MoveMetadata::new("Rock Blast", MoveCategory::Physical).with_multi_hit(2, 5));
        dex.insert(
            MoveMetadata::new("Rain Dance", MoveCategory::Status)
                .with_field(FieldEffect::SetWeather(Weather::Rain)),
        );
        dex
    }

    fn damaging(range: DamageRange, defender_hp: u32) -> MatchupOutcome {
        MatchupOutcome::from_range(range, defender_hp)
    }

    #[test]
    fn test_damage_midpoint_applied() {
        let snap = snapshot();
        let outcome = damaging(DamageRange::new(80, 95), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Body Slam",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        assert!(report.errors.is_empty());
        assert_eq!(report.damage_dealt, 87);
        assert_eq!(report.snapshot.side(SideId::P2).active().unwrap().current_hp, 13);
        assert!(!report.target_removed);
        assert!(report.description.contains("took 87 damage"));

        // Input snapshot untouched
        assert_eq!(snap.side(SideId::P2).active().unwrap().current_hp, 100);
    }

    #[test]
    fn test_damage_clamps_and_removes() {
        let snap = snapshot();
        let outcome = damaging(DamageRange::new(100, 110), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Body Slam",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        // Midpoint 105 clamps at 0 HP
        let defender = report.snapshot.side(SideId::P2).active().unwrap();
        assert_eq!(defender.current_hp, 0);
        assert!(defender.fainted);
        assert!(report.target_removed);
        assert!(report.description.contains("fainted"));
    }

    #[test]
    fn test_recoil_fraction() {
        let snap = snapshot();
        let outcome = damaging(DamageRange::exact(90), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Double-Edge",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        // floor(90 / 3) = 30 recoil off 150
        let actor = report.snapshot.side(SideId::P1).active().unwrap();
        assert_eq!(actor.current_hp, 120);
        assert!(!report.actor_removed);
        assert!(report.description.contains("30 recoil"));
    }

    #[test]
    fn test_recoil_minimum_one() {
        let snap = snapshot();
        let outcome = damaging(DamageRange::exact(2), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Double-Edge",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        // floor(2 / 3) = 0, floored up to 1
        assert_eq!(report.snapshot.side(SideId::P1).active().unwrap().current_hp, 149);
    }

    #[test]
    fn test_recoil_faint_halts_pipeline() {
        let mut snap = snapshot();
        snap.p1.active_mut().unwrap().current_hp = 20;

        // Recoil plus a self boost; the boost must not run after the faint
        let mut dex = dex();
        dex.insert(
            MoveMetadata::new("Reckless Blow", MoveCategory::Physical)
                .with_recoil(1, 3)
                .with_stat_change(crate::metadata::EffectTarget::User, Stat::Atk, 2),
        );
        let outcome = damaging(DamageRange::exact(90), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Reckless Blow",
            &outcome,
            &dex,
            FORMAT,
            DamagePolicy::Midpoint,
        );

        let actor = report.snapshot.side(SideId::P1).active().unwrap();
        assert_eq!(actor.current_hp, 0);
        assert!(report.actor_removed);
        assert!(actor.stages.is_clear());
    }

    #[test]
    fn test_drain_caps_at_max_hp() {
        let mut snap = snapshot();
        snap.p1.active_mut().unwrap().current_hp = 100;

        let outcome = damaging(DamageRange::exact(87), 100);
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Giga Drain",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        // floor(87 / 2) = 43 restored
        assert_eq!(report.snapshot.side(SideId::P1).active().unwrap().current_hp, 143);

        // Near full HP the heal clamps
        let mut snap = snapshot();
        snap.p1.active_mut().unwrap().current_hp = 140;
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Giga Drain",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert_eq!(report.snapshot.side(SideId::P1).active().unwrap().current_hp, 150);
    }

    #[test]
    fn test_drain_minimum_one() {
        let snap = snapshot();
        let outcome = damaging(DamageRange::exact(1), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Giga Drain",
            &outcome,
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert!(report.description.contains("drained 1 HP"));
    }

    #[test]
    fn test_ko_skips_target_facing_stages_but_not_recoil() {
        let mut dex = dex();
        dex.insert(
            MoveMetadata::new("Wrecking Ball", MoveCategory::Physical)
                .with_recoil(1, 3)
                .with_stat_change(crate::metadata::EffectTarget::Foe, Stat::Def, -1),
        );
        let snap = snapshot();
        let outcome = damaging(DamageRange::exact(120), 100);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Wrecking Ball",
            &outcome,
            &dex,
            FORMAT,
            DamagePolicy::Midpoint,
        );

        assert!(report.target_removed);
        // Recoil on damage dealt (clamped to 100): floor(100/3) = 33
        assert_eq!(report.snapshot.side(SideId::P1).active().unwrap().current_hp, 117);
        // The fainted target's stages were never touched
        assert!(report.snapshot.side(SideId::P2).active().unwrap().stages.is_clear());
    }

    #[test]
    fn test_status_infliction() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Thunder Wave",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        let defender = report.snapshot.side(SideId::P2).active().unwrap();
        assert_eq!(defender.status, Some(StatusCondition::Paralysis));
        assert!(report.description.contains("paralyzed"));
    }

    #[test]
    fn test_status_does_not_overwrite() {
        let mut snap = snapshot();
        snap.p2.active_mut().unwrap().status = Some(StatusCondition::Burn);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Thunder Wave",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        let defender = report.snapshot.side(SideId::P2).active().unwrap();
        assert_eq!(defender.status, Some(StatusCondition::Burn));
    }

    #[test]
    fn test_stat_changes() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Swords Dance",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert_eq!(report.snapshot.side(SideId::P1).active().unwrap().stages.atk, 2);
        assert!(report.description.contains("atk rose by 2"));

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Crunch",
            &damaging(DamageRange::exact(40), 100),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert_eq!(report.snapshot.side(SideId::P2).active().unwrap().stages.def, -1);
    }

    #[test]
    fn test_field_mutation() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Rain Dance",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert_eq!(report.snapshot.field.weather, Some(Weather::Rain));
        assert!(snap.field.weather.is_none());
    }

    #[test]
    fn test_self_switch_raises_replacement_decision() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "U-turn",
            &damaging(DamageRange::exact(40), 100),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        assert_eq!(report.pending.len(), 1);
        let decision = &report.pending[0];
        assert_eq!(decision.side, SideId::P1);
        assert_eq!(
            decision.kind,
            DecisionKind::Replacement {
                candidates: vec![1]
            }
        );
    }

    #[test]
    fn test_self_switch_without_bench_is_silent() {
        // P2 has no bench, so its U-turn raises nothing
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P2,
            SideId::P1,
            "U-turn",
            &damaging(DamageRange::exact(40), 150),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert!(report.pending.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_secondary_raises_probabilistic_decision() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Ice Beam",
            &damaging(DamageRange::exact(40), 100),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        assert_eq!(report.pending.len(), 1);
        assert_eq!(
            report.pending[0].kind,
            DecisionKind::Probabilistic {
                chance: 10,
                effect: "frz".to_string(),
                afflicts: SideId::P2,
            }
        );
    }

    #[test]
    fn test_secondary_skipped_when_target_removed() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Ice Beam",
            &damaging(DamageRange::exact(150), 100),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert!(report.target_removed);
        assert!(report.pending.is_empty());
    }

    #[test]
    fn test_multi_hit_raises_hit_count_decision() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Rock Blast",
            &damaging(DamageRange::exact(25), 100),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        assert_eq!(report.pending.len(), 1);
        assert_eq!(
            report.pending[0].kind,
            DecisionKind::HitCount { min: 2, max: 5 }
        );
    }

    #[test]
    fn test_unknown_move_is_soft_error() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Splash",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );

        assert_eq!(report.errors, vec![EngineError::UnknownMove("Splash".to_string())]);
        assert_eq!(report.snapshot.side(SideId::P2).active().unwrap().current_hp, 100);
        assert!(report.description.is_empty());
    }

    #[test]
    fn test_no_active_combatant_is_soft_error() {
        let mut snap = snapshot();
        snap.p2.set_active(None);

        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P2,
            "Body Slam",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert_eq!(report.errors, vec![EngineError::NoActiveCombatant(SideId::P2)]);
    }

    #[test]
    fn test_self_target_is_invalid_reference() {
        let snap = snapshot();
        let report = apply_move(
            &snap,
            SideId::P1,
            SideId::P1,
            "Body Slam",
            &MatchupOutcome::non_damaging(),
            &dex(),
            FORMAT,
            DamagePolicy::Midpoint,
        );
        assert!(matches!(
            report.errors[0],
            EngineError::InvalidSideReference(_)
        ));
    }
}
