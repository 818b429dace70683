//! Deterministic duel simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed per-tick constants
//! - Seeded RNG only
//! - Fixed step order (player, enemy, physics, combat, effects)
//! - No rendering or platform dependencies

pub mod ai;
pub mod combat;
pub mod effects;
pub mod input;
pub mod machine;
pub mod physics;
pub mod state;
pub mod tick;

pub use ai::{AiAction, AiDecision, AiRolls, decide};
pub use combat::{Exchange, PushOutcome, force_push, resolve, resolve_attack};
pub use effects::{EffectsStore, Particle, Shockwave};
pub use input::{InputSnapshot, KeyBindings};
pub use state::{
    CombatState, DuelState, Duelist, GameEvent, HudSnapshot, MatchOutcome, MatchPhase, MatchStats,
    Side, TickCtx, Viewport,
};
pub use tick::tick;
