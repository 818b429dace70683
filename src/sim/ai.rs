//! Opponent decision policy
//!
//! A pure function of (self, opponent, tuning, rolls). Randomness is drawn by
//! the caller so tests can pin every branch.
//!
//! Precedence, evaluated every free tick:
//! 1. face the opponent
//! 2. cooling down: back off if close, otherwise stand
//! 3. opponent swinging nearby: block or retreat
//! 4. too far: close the gap
//! 5. in range: maybe attack, otherwise hold

use rand::Rng;

use super::state::{CombatState, Duelist};
use crate::tuning::Tuning;

/// Pre-drawn random values for one decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiRolls {
    /// Compared against `ai_block_chance`
    pub defend: f32,
    /// Compared against `ai_attack_chance`
    pub attack: f32,
    /// Variant used if an attack starts
    pub variant: u8,
}

impl AiRolls {
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            defend: rng.random::<f32>(),
            attack: rng.random::<f32>(),
            variant: rng.random_range(0..3),
        }
    }
}

/// What the AI does this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiAction {
    /// Stand still
    Hold,
    /// Walk with the given horizontal velocity
    Move { vel_x: f32 },
    /// Raise guard for `ticks`
    Block { ticks: u32 },
    /// Start a swing
    Attack { variant: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub direction: i8,
    pub action: AiAction,
}

/// Evaluate the policy for a free (IDLE/MOVING) AI duelist
pub fn decide(me: &Duelist, opponent: &Duelist, tuning: &Tuning, rolls: AiRolls) -> AiDecision {
    let dist = me.pos.x - opponent.pos.x;
    let abs_dist = dist.abs();
    let direction: i8 = if dist > 0.0 { -1 } else { 1 };
    let toward = direction as f32;

    let action = if me.ai_cooldown > 0 {
        // Recovering: never assertive
        if abs_dist < tuning.ai_retreat_distance {
            AiAction::Move {
                vel_x: -toward * tuning.ai_retreat_speed,
            }
        } else {
            AiAction::Hold
        }
    } else if opponent.state == CombatState::Attacking && abs_dist < tuning.ai_defend_distance
    {
        if rolls.defend < tuning.ai_block_chance {
            AiAction::Block {
                ticks: tuning.ai_block_ticks,
            }
        } else {
            AiAction::Move {
                vel_x: -toward * tuning.move_speed,
            }
        }
    } else if abs_dist > tuning.ai_close_range {
        AiAction::Move {
            vel_x: toward * tuning.move_speed * tuning.ai_approach_factor,
        }
    } else if rolls.attack < tuning.ai_attack_chance {
        AiAction::Attack {
            variant: rolls.variant % 3,
        }
    } else {
        AiAction::Hold
    };

    AiDecision { direction, action }
}
