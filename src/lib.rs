//! Saber Duel - a two-duelist melee combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, AI, physics, combat, effects)
//! - `tuning`: Data-driven combat balance
//! - `audio`: Fire-and-forget cue identifiers emitted by the simulation
//! - `briefing`: Mission briefing / battle report records with fallback text

pub mod audio;
pub mod briefing;
pub mod error;
pub mod sim;
pub mod tuning;

pub use audio::AudioCue;
pub use briefing::{Difficulty, MissionBriefing, battle_report_fallback};
pub use error::{DuelError, Result};
pub use tuning::Tuning;

/// Default balance constants (see [`Tuning`] for the runtime copy)
pub mod consts {
    /// Nominal animation frame rate the tick constants are tuned for
    pub const FRAME_RATE: f32 = 60.0;

    /// Horizontal move speed (px per tick)
    pub const MOVE_SPEED: f32 = 6.0;

    /// Attack window length in ticks
    pub const ATTACK_DURATION: u32 = 25;
    /// Fraction of the attack window at which the hit check fires
    pub const HIT_FRAME_FRACTION: f32 = 0.6;
    /// Maximum horizontal distance for a swing to connect
    pub const ATTACK_RANGE: f32 = 180.0;

    /// Block sustain timers (re-armed every tick the block is held)
    pub const PLAYER_BLOCK_TICKS: u32 = 5;
    pub const AI_BLOCK_TICKS: u32 = 15;

    /// Blocked swing: attacker recoil, defender force loss, AI punish window
    pub const BLOCK_RECOIL_TICKS: u32 = 20;
    pub const BLOCK_FORCE_COST: f32 = 10.0;
    pub const BLOCK_AI_COOLDOWN: u32 = 20;

    /// Both swings connect on the same tick
    pub const CLASH_STUN_TICKS: u32 = 30;

    /// Clean hit
    pub const HIT_STUN_TICKS: u32 = 20;
    pub const HIT_KNOCKBACK: f32 = 20.0;
    pub const PLAYER_DAMAGE: f32 = 15.0;
    pub const AI_DAMAGE: f32 = 10.0;

    /// AI vulnerability window after every swing
    pub const AI_RECOVERY_TICKS: u32 = 50;
    pub const AI_RETREAT_DISTANCE: f32 = 300.0;
    pub const AI_RETREAT_SPEED: f32 = 3.0;
    pub const AI_DEFEND_DISTANCE: f32 = 200.0;
    pub const AI_BLOCK_CHANCE: f32 = 0.25;
    pub const AI_CLOSE_RANGE: f32 = 120.0;
    pub const AI_APPROACH_FACTOR: f32 = 0.6;
    pub const AI_ATTACK_CHANCE: f32 = 0.015;

    /// Force push ability
    pub const PUSH_COST: f32 = 30.0;
    pub const PUSH_RADIUS: f32 = 500.0;
    pub const PUSH_KNOCKBACK: f32 = 30.0;
    pub const PUSH_BLOCKED_KNOCKBACK: f32 = 8.0;
    pub const PUSH_STUN_TICKS: u32 = 60;
    pub const PUSH_OFFSET: f32 = 50.0;

    /// Passive force regeneration per tick
    pub const FORCE_REGEN: f32 = 0.3;
    /// Horizontal velocity multiplier applied each stunned tick
    pub const STUN_FRICTION: f32 = 0.9;

    /// Vitals
    pub const MAX_HEALTH: f32 = 100.0;
    pub const MAX_FORCE: f32 = 100.0;

    /// Layout
    pub const DUELIST_WIDTH: f32 = 60.0;
    pub const DUELIST_HEIGHT: f32 = 140.0;
    pub const FLOOR_LINE: f32 = 0.9;
    pub const EDGE_MARGIN: f32 = 50.0;
    pub const MIN_SEPARATION: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 200.0;
    pub const ENEMY_START_X: f32 = 600.0;

    /// Delay between the killing blow and the outcome report (seconds)
    pub const OUTCOME_DELAY_SECS: f32 = 2.0;
}
