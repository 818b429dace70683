//! Combat balance
//!
//! Every timing, distance and probability the simulation reads. Defaults come
//! from [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{DuelError, Result};

/// Runtime balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    pub move_speed: f32,
    pub force_regen: f32,
    pub stun_friction: f32,

    // === Attacks ===
    /// Attack window length in ticks
    pub attack_duration: u32,
    /// Fraction of `attack_duration` where the hit check fires
    pub hit_frame_fraction: f32,
    pub attack_range: f32,
    pub player_damage: f32,
    pub ai_damage: f32,
    pub hit_stun_ticks: u32,
    pub hit_knockback: f32,

    // === Blocking / clashing ===
    pub player_block_ticks: u32,
    pub ai_block_ticks: u32,
    pub block_recoil_ticks: u32,
    pub block_force_cost: f32,
    pub block_ai_cooldown: u32,
    pub clash_stun_ticks: u32,

    // === AI policy ===
    pub ai_recovery_ticks: u32,
    pub ai_retreat_distance: f32,
    pub ai_retreat_speed: f32,
    pub ai_defend_distance: f32,
    pub ai_block_chance: f32,
    pub ai_close_range: f32,
    pub ai_approach_factor: f32,
    pub ai_attack_chance: f32,

    // === Force push ===
    pub push_cost: f32,
    pub push_radius: f32,
    pub push_knockback: f32,
    pub push_blocked_knockback: f32,
    pub push_stun_ticks: u32,
    pub push_offset: f32,

    // === Layout ===
    pub edge_margin: f32,
    pub min_separation: f32,

    // === Presentation ===
    /// Seconds between the killing blow and the outcome report
    pub outcome_delay_secs: f32,
    /// Particle buffer cap (oldest replaced when full)
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            force_regen: FORCE_REGEN,
            stun_friction: STUN_FRICTION,

            attack_duration: ATTACK_DURATION,
            hit_frame_fraction: HIT_FRAME_FRACTION,
            attack_range: ATTACK_RANGE,
            player_damage: PLAYER_DAMAGE,
            ai_damage: AI_DAMAGE,
            hit_stun_ticks: HIT_STUN_TICKS,
            hit_knockback: HIT_KNOCKBACK,

            player_block_ticks: PLAYER_BLOCK_TICKS,
            ai_block_ticks: AI_BLOCK_TICKS,
            block_recoil_ticks: BLOCK_RECOIL_TICKS,
            block_force_cost: BLOCK_FORCE_COST,
            block_ai_cooldown: BLOCK_AI_COOLDOWN,
            clash_stun_ticks: CLASH_STUN_TICKS,

            ai_recovery_ticks: AI_RECOVERY_TICKS,
            ai_retreat_distance: AI_RETREAT_DISTANCE,
            ai_retreat_speed: AI_RETREAT_SPEED,
            ai_defend_distance: AI_DEFEND_DISTANCE,
            ai_block_chance: AI_BLOCK_CHANCE,
            ai_close_range: AI_CLOSE_RANGE,
            ai_approach_factor: AI_APPROACH_FACTOR,
            ai_attack_chance: AI_ATTACK_CHANCE,

            push_cost: PUSH_COST,
            push_radius: PUSH_RADIUS,
            push_knockback: PUSH_KNOCKBACK,
            push_blocked_knockback: PUSH_BLOCKED_KNOCKBACK,
            push_stun_ticks: PUSH_STUN_TICKS,
            push_offset: PUSH_OFFSET,

            edge_margin: EDGE_MARGIN,
            min_separation: MIN_SEPARATION,

            outcome_delay_secs: OUTCOME_DELAY_SECS,
            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load overrides from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// The stateTimer value at which an attack's single hit check fires
    pub fn hit_frame(&self) -> u32 {
        (self.attack_duration as f32 * self.hit_frame_fraction).floor() as u32
    }

    /// Reject values that would break the one-hit-per-swing guarantee or the AI rolls
    pub fn validate(&self) -> Result<()> {
        if self.attack_duration == 0 {
            return Err(DuelError::InvalidTuning("attack_duration must be > 0".into()));
        }
        let hit_frame = self.hit_frame();
        if hit_frame == 0 || hit_frame >= self.attack_duration {
            return Err(DuelError::InvalidTuning(format!(
                "hit frame {} must lie strictly inside the attack window (1..{})",
                hit_frame, self.attack_duration
            )));
        }

        let probabilities = [
            ("ai_block_chance", self.ai_block_chance),
            ("ai_attack_chance", self.ai_attack_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(DuelError::InvalidTuning(format!("{name} must be in [0, 1], got {p}")));
            }
        }

        let positive = [
            ("move_speed", self.move_speed),
            ("attack_range", self.attack_range),
            ("push_cost", self.push_cost),
            ("push_radius", self.push_radius),
            ("min_separation", self.min_separation),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(DuelError::InvalidTuning(format!("{name} must be > 0, got {v}")));
            }
        }

        if !(0.0..=1.0).contains(&self.stun_friction) {
            return Err(DuelError::InvalidTuning("stun_friction must be in [0, 1]".into()));
        }
        if self.edge_margin < 0.0 || self.outcome_delay_secs < 0.0 {
            return Err(DuelError::InvalidTuning(
                "edge_margin and outcome_delay_secs must not be negative".into(),
            ));
        }
        Ok(())
    }
}
