//! Duelist state machine
//!
//! Timed states (ATTACKING, BLOCKING, STUNNED, HIT) count down once per tick
//! and fall back to IDLE. Free states (IDLE, MOVING) are re-derived every tick
//! from the player's input or the AI policy.

use super::ai::{self, AiAction, AiRolls};
use super::combat;
use super::input::InputSnapshot;
use super::state::{CombatState, Duelist, TickCtx};
use crate::audio::AudioCue;

/// Count down the current timed state; expiry returns to IDLE
///
/// An AI swing that runs out opens the recovery window.
pub fn step_timer(duelist: &mut Duelist, ai_recovery_ticks: u32) {
    if duelist.state.is_free() {
        return;
    }
    duelist.state_timer = duelist.state_timer.saturating_sub(1);
    if duelist.state_timer == 0 {
        if !duelist.is_player() && duelist.state == CombatState::Attacking {
            duelist.ai_cooldown = ai_recovery_ticks;
        }
        duelist.state = CombatState::Idle;
    }
}

/// Start a swing
fn begin_attack(duelist: &mut Duelist, variant: u8, ctx: &mut TickCtx) {
    duelist.enter(CombatState::Attacking, ctx.tuning.attack_duration);
    duelist.attack_variant = variant;
    ctx.cue(AudioCue::Swing);
}

/// Advance the player-controlled duelist from the sampled input
pub fn advance_player(
    player: &mut Duelist,
    opponent: &mut Duelist,
    input: &InputSnapshot,
    ctx: &mut TickCtx,
) {
    if player.is_defeated() {
        return;
    }
    step_timer(player, ctx.tuning.ai_recovery_ticks);

    if !player.state.is_free() {
        return;
    }

    player.vel.x = input.horizontal() * ctx.tuning.move_speed;
    player.state = if player.vel.x != 0.0 {
        CombatState::Moving
    } else {
        CombatState::Idle
    };

    if input.attack {
        // Cycle 0 -> 1 -> 2 -> 0
        let variant = (player.attack_variant + 1) % 3;
        begin_attack(player, variant, ctx);
    } else if input.block {
        player.enter(CombatState::Blocking, ctx.tuning.player_block_ticks);
    } else if input.ability {
        combat::force_push(player, opponent, ctx);
    }
}

/// Advance the AI-controlled duelist
pub fn advance_enemy(enemy: &mut Duelist, opponent: &Duelist, ctx: &mut TickCtx) {
    if enemy.is_defeated() {
        return;
    }
    step_timer(enemy, ctx.tuning.ai_recovery_ticks);

    if enemy.state.is_free() {
        let rolls = AiRolls::draw(ctx.rng);
        let decision = ai::decide(enemy, opponent, ctx.tuning, rolls);
        enemy.direction = decision.direction;
        match decision.action {
            AiAction::Hold => {
                enemy.state = CombatState::Idle;
                enemy.vel.x = 0.0;
            }
            AiAction::Move { vel_x } => {
                enemy.state = CombatState::Moving;
                enemy.vel.x = vel_x;
            }
            AiAction::Block { ticks } => enemy.enter(CombatState::Blocking, ticks),
            AiAction::Attack { variant } => begin_attack(enemy, variant, ctx),
        }
    }

    enemy.ai_cooldown = enemy.ai_cooldown.saturating_sub(1);
}
