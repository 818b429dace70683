//! Duel state and core simulation types
//!
//! The duel state owns both duelists and the effects store for the lifetime of
//! one match. Nothing else keeps mutable references across ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{EffectsStore, colors};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::error::{DuelError, Result};
use crate::tuning::Tuning;

/// Per-duelist combat state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombatState {
    /// Input-driven, no timer
    #[default]
    Idle,
    /// Input-driven, nonzero horizontal velocity this tick
    Moving,
    Attacking,
    Blocking,
    /// Clash / parry recoil / push; velocity decays by friction
    Stunned,
    /// Took damage; carries knockback
    Hit,
}

impl CombatState {
    /// IDLE and MOVING are re-derived every tick; the rest run on `state_timer`
    pub fn is_free(&self) -> bool {
        matches!(self, CombatState::Idle | CombatState::Moving)
    }
}

/// Which side a duelist fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// One combatant. Both sides share this shape; only the control source differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duelist {
    pub side: Side,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// +1 faces right, -1 faces left
    pub direction: i8,
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub force: f32,
    pub max_force: f32,
    pub state: CombatState,
    /// Ticks remaining in a timed state
    pub state_timer: u32,
    /// Swing geometry selector (0..3)
    pub attack_variant: u8,
    /// Ticks before the AI may act assertively again (always 0 for the player)
    pub ai_cooldown: u32,
    /// Blade color for hit particles
    pub saber_color: u32,
}

impl Duelist {
    /// Fresh duelist at its side's default position and facing
    pub fn new(side: Side) -> Self {
        let (x, direction, saber_color) = match side {
            Side::Player => (PLAYER_START_X, 1, colors::PLAYER_SABER),
            Side::Enemy => (ENEMY_START_X, -1, colors::ENEMY_SABER),
        };
        Self {
            side,
            pos: Vec2::new(x, 0.0),
            width: DUELIST_WIDTH,
            height: DUELIST_HEIGHT,
            direction,
            vel: Vec2::ZERO,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            force: MAX_FORCE,
            max_force: MAX_FORCE,
            state: CombatState::Idle,
            state_timer: 0,
            attack_variant: 0,
            ai_cooldown: 0,
            saber_color,
        }
    }

    pub fn is_player(&self) -> bool {
        self.side == Side::Player
    }

    /// Defeated duelists are frozen for the rest of the match
    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    /// Enter a timed state
    pub fn enter(&mut self, state: CombatState, ticks: u32) {
        self.state = state;
        self.state_timer = ticks;
    }

    /// Direction toward `other` along x (+1 / -1)
    pub fn direction_to(&self, other: &Duelist) -> i8 {
        if other.pos.x > self.pos.x { 1 } else { -1 }
    }

    pub fn distance_to(&self, other: &Duelist) -> f32 {
        (self.pos.x - other.pos.x).abs()
    }

    /// Attacker faces the defender: direction sign agrees with defender - attacker
    pub fn is_facing(&self, other: &Duelist) -> bool {
        (self.direction > 0 && other.pos.x > self.pos.x)
            || (self.direction < 0 && other.pos.x < self.pos.x)
    }

    /// Apply damage, floored at zero
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    /// Debit force, floored at zero
    pub fn drain_force(&mut self, amount: f32) {
        self.force = (self.force - amount).clamp(0.0, self.max_force);
    }

    /// Point `offset` px in front of the duelist at chest height
    pub fn front(&self, offset: f32) -> Vec2 {
        Vec2::new(
            self.pos.x + self.direction as f32 * offset,
            self.pos.y + self.height / 2.0,
        )
    }
}

/// Viewport the duel is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both duelists must fit side by side between the edge margins
    pub fn validate(&self, tuning: &Tuning) -> Result<()> {
        let min_width = 2.0 * tuning.edge_margin + DUELIST_WIDTH + tuning.min_separation;
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < min_width
            || self.height < DUELIST_HEIGHT
        {
            return Err(DuelError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Feet line
    pub fn floor_y(&self) -> f32 {
        self.height * FLOOR_LINE
    }

    /// Allowed x range for a duelist's left edge
    pub fn lateral_bounds(&self, duelist_width: f32, margin: f32) -> (f32, f32) {
        (margin, self.width - duelist_width - margin)
    }
}

/// Observable values for the HUD, published every tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub player_health: f32,
    pub enemy_health: f32,
    pub player_force: f32,
}

/// Final result, reported once per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: u32,
    pub won: bool,
}

impl MatchOutcome {
    pub fn from_player(player: &Duelist) -> Self {
        Self {
            score: (player.health.max(0.0) * 10.0).floor() as u32,
            won: player.health > 0.0,
        }
    }
}

/// Events emitted by the simulation for the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget audio cue
    Cue(AudioCue),
    /// Match finished (emitted exactly once per match)
    MatchEnded(MatchOutcome),
}

/// Combat counters for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchStats {
    /// Hit-frame checks evaluated. A clash consumes the defender's swing too,
    /// but only the attacker's check is counted.
    pub hit_checks: u32,
    pub hits: u32,
    pub blocks: u32,
    pub clashes: u32,
    pub pushes: u32,
}

/// Mutable collaborators handed to the per-tick steps
pub struct TickCtx<'a> {
    pub tuning: &'a Tuning,
    pub effects: &'a mut EffectsStore,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
    pub stats: &'a mut MatchStats,
}

impl TickCtx<'_> {
    pub fn cue(&mut self, cue: AudioCue) {
        self.events.push(GameEvent::Cue(cue));
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Both duelists standing, gameplay stepping
    Fighting,
    /// Someone fell; effects keep animating until the outcome is reported
    Finishing { remaining_secs: f32 },
    /// Outcome reported
    Over,
}

/// Complete duel state
#[derive(Debug, Clone)]
pub struct DuelState {
    /// Match seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub player: Duelist,
    pub enemy: Duelist,
    pub effects: EffectsStore,
    pub phase: MatchPhase,
    /// Latest published HUD values
    pub hud: HudSnapshot,
    /// Gameplay ticks since match start
    pub time_ticks: u64,
    pub stats: MatchStats,
    pub(crate) events: Vec<GameEvent>,
}

impl DuelState {
    /// Create a laid-out duel ready to tick
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        if let Err(e) = viewport.validate(&tuning) {
            log::warn!("Rejected viewport {}x{}", viewport.width, viewport.height);
            return Err(e);
        }
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            effects: EffectsStore::new(tuning.max_particles),
            tuning,
            viewport,
            player: Duelist::new(Side::Player),
            enemy: Duelist::new(Side::Enemy),
            phase: MatchPhase::Fighting,
            hud: HudSnapshot::default(),
            time_ticks: 0,
            stats: MatchStats::default(),
            events: Vec::new(),
        };
        state.layout();
        state.publish_hud();
        log::info!("Duel created with seed: {}", seed);
        Ok(state)
    }

    /// Start a new match: full vitals, default positions, no effects, no timers
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.player = Duelist::new(Side::Player);
        self.enemy = Duelist::new(Side::Enemy);
        self.effects.clear();
        self.events.clear();
        self.phase = MatchPhase::Fighting;
        self.time_ticks = 0;
        self.stats = MatchStats::default();
        self.layout();
        self.publish_hud();
        log::info!("Duel reset with seed: {}", seed);
    }

    /// Re-apply layout for a new viewport without touching combat state
    pub fn apply_viewport(&mut self, viewport: Viewport) -> Result<()> {
        if let Err(e) = viewport.validate(&self.tuning) {
            log::warn!("Rejected viewport {}x{}", viewport.width, viewport.height);
            return Err(e);
        }
        self.viewport = viewport;
        self.layout();
        Ok(())
    }

    /// Stand both duelists on the floor line; pull strays back on-screen
    ///
    /// The player always ends up left of the enemy, at least `min_separation`
    /// apart. `Viewport::validate` guarantees the bounds are wide enough.
    fn layout(&mut self) {
        let floor = self.viewport.floor_y();
        self.player.pos.y = floor - self.player.height;
        self.enemy.pos.y = floor - self.enemy.height;

        if self.player.pos.x > self.viewport.width {
            self.player.pos.x = 100.0;
        }
        if self.enemy.pos.x > self.viewport.width {
            self.enemy.pos.x = self.viewport.width - 200.0;
        }
        let (min_x, max_x) = self.viewport.lateral_bounds(DUELIST_WIDTH, self.tuning.edge_margin);
        self.player.pos.x = self.player.pos.x.clamp(min_x, max_x);
        self.enemy.pos.x = self.enemy.pos.x.clamp(min_x, max_x);

        let gap = self.tuning.min_separation;
        if self.enemy.pos.x - self.player.pos.x < gap {
            self.enemy.pos.x = (self.player.pos.x + gap).min(max_x);
            self.player.pos.x = self.player.pos.x.min(self.enemy.pos.x - gap);
        }
    }

    pub(crate) fn publish_hud(&mut self) {
        self.hud = HudSnapshot {
            player_health: self.player.health,
            enemy_health: self.enemy.health,
            player_force: self.player.force,
        };
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}
