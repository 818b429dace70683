//! Hit resolution and the force push
//!
//! The only two channels through which the duelists affect each other:
//! a swing's single hit-frame check, and the player's push.

use glam::Vec2;

use super::effects::{Burst, colors, shake};
use super::state::{CombatState, Duelist, TickCtx};
use crate::audio::AudioCue;

/// Outcome of a swing that reached its hit frame in range and facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exchange {
    /// Defender was guarding; attacker recoils
    Blocked,
    /// Both mid-swing; both stunned
    Clash,
    /// Clean hit for `damage`
    Hit { damage: f32 },
}

/// Outcome of a push activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Not enough force; nothing happened
    Insufficient,
    /// Released, but the opponent was out of reach
    Missed,
    /// Opponent knocked back and stunned
    Staggered,
    /// Opponent was guarding; reduced knockback only
    Deflected,
}

/// True on the single tick of a swing where the hit check fires
pub fn is_hit_frame(attacker: &Duelist, hit_frame: u32) -> bool {
    attacker.state == CombatState::Attacking && attacker.state_timer == hit_frame
}

/// Resolve one attacker -> defender pair
pub fn resolve_attack(
    attacker: &mut Duelist,
    defender: &mut Duelist,
    ctx: &mut TickCtx,
) -> Option<Exchange> {
    if attacker.is_defeated() || !is_hit_frame(attacker, ctx.tuning.hit_frame()) {
        return None;
    }
    ctx.stats.hit_checks += 1;

    if attacker.distance_to(defender) >= ctx.tuning.attack_range || !attacker.is_facing(defender) {
        return None;
    }

    let contact = Vec2::new(
        (attacker.pos.x + defender.pos.x) / 2.0 + 30.0,
        attacker.pos.y + 50.0,
    );

    let exchange = match defender.state {
        CombatState::Blocking => {
            ctx.effects.burst(contact, Burst::PARRY, ctx.rng);
            ctx.cue(AudioCue::Clash);
            ctx.effects.shake(shake::BLOCK);
            attacker.enter(CombatState::Stunned, ctx.tuning.block_recoil_ticks);
            defender.drain_force(ctx.tuning.block_force_cost);
            if !defender.is_player() {
                defender.ai_cooldown = ctx.tuning.block_ai_cooldown;
            }
            ctx.stats.blocks += 1;
            Exchange::Blocked
        }
        CombatState::Attacking => {
            ctx.effects.burst(contact, Burst::CLASH, ctx.rng);
            ctx.cue(AudioCue::Clash);
            ctx.effects.shake(shake::CLASH);
            attacker.enter(CombatState::Stunned, ctx.tuning.clash_stun_ticks);
            defender.enter(CombatState::Stunned, ctx.tuning.clash_stun_ticks);
            ctx.stats.clashes += 1;
            Exchange::Clash
        }
        _ => {
            let damage = if attacker.is_player() {
                ctx.tuning.player_damage
            } else {
                ctx.tuning.ai_damage
            };
            defender.take_damage(damage);
            defender.enter(CombatState::Hit, ctx.tuning.hit_stun_ticks);
            defender.vel.x = attacker.direction as f32 * ctx.tuning.hit_knockback;
            let at = Vec2::new(defender.pos.x + defender.width / 2.0, defender.pos.y + 50.0);
            ctx.effects.burst(at, Burst::hit(defender.saber_color), ctx.rng);
            ctx.cue(AudioCue::Hit);
            ctx.effects.shake(shake::HIT);
            ctx.stats.hits += 1;
            Exchange::Hit { damage }
        }
    };

    log::debug!(
        "{:?} -> {:?}: {:?} (defender hp {:.0})",
        attacker.side,
        defender.side,
        exchange,
        defender.health
    );
    Some(exchange)
}

/// Run both pairs: player -> enemy, then enemy -> player
pub fn resolve(
    player: &mut Duelist,
    enemy: &mut Duelist,
    ctx: &mut TickCtx,
) -> [Option<Exchange>; 2] {
    let first = resolve_attack(player, enemy, ctx);
    let second = resolve_attack(enemy, player, ctx);
    [first, second]
}

/// Release a force push from `caster` toward `target`
///
/// Gated purely by force; there is no other cooldown.
pub fn force_push(caster: &mut Duelist, target: &mut Duelist, ctx: &mut TickCtx) -> PushOutcome {
    if caster.force < ctx.tuning.push_cost {
        return PushOutcome::Insufficient;
    }
    caster.drain_force(ctx.tuning.push_cost);
    ctx.cue(AudioCue::Push);
    ctx.stats.pushes += 1;

    let origin = caster.front(ctx.tuning.push_offset);
    ctx.effects.shockwave(origin, colors::PUSH);
    ctx.effects.burst(origin, Burst::PUSH, ctx.rng);
    ctx.effects.shake(shake::PUSH);

    if caster.distance_to(target) >= ctx.tuning.push_radius {
        log::debug!("{:?} push missed", caster.side);
        return PushOutcome::Missed;
    }

    let dir = caster.direction as f32;
    let outcome = if target.state == CombatState::Blocking {
        target.vel.x = dir * ctx.tuning.push_blocked_knockback;
        ctx.cue(AudioCue::Clash);
        PushOutcome::Deflected
    } else {
        target.vel.x = dir * ctx.tuning.push_knockback;
        target.enter(CombatState::Stunned, ctx.tuning.push_stun_ticks);
        ctx.cue(AudioCue::Hit);
        PushOutcome::Staggered
    };
    log::debug!("{:?} push: {:?}", caster.side, outcome);
    outcome
}
