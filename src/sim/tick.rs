//! Simulation clock
//!
//! One call per animation frame. Gameplay steps in a fixed order while both
//! duelists stand; afterwards only effects animate until the outcome is
//! reported once, `outcome_delay_secs` of real time later.

use super::combat;
use super::input::InputSnapshot;
use super::machine;
use super::physics;
use super::state::{DuelState, GameEvent, MatchOutcome, MatchPhase, TickCtx};

/// Advance the duel by one animation frame
///
/// `dt` is the real time elapsed since the previous frame (seconds). It only
/// drives the outcome delay; gameplay constants are per tick.
pub fn tick(state: &mut DuelState, input: &InputSnapshot, dt: f32) {
    match state.phase {
        MatchPhase::Fighting => {
            step_gameplay(state, input);
            state.effects.age();
            state.publish_hud();

            if state.player.is_defeated() || state.enemy.is_defeated() {
                log::info!(
                    "Duel decided at tick {}: player {:.0} hp, enemy {:.0} hp",
                    state.time_ticks,
                    state.player.health,
                    state.enemy.health
                );
                state.phase = MatchPhase::Finishing {
                    remaining_secs: state.tuning.outcome_delay_secs,
                };
            }
        }
        MatchPhase::Finishing { remaining_secs } => {
            state.effects.age();
            state.publish_hud();

            let remaining_secs = remaining_secs - dt.max(0.0);
            if remaining_secs <= 0.0 {
                let outcome = MatchOutcome::from_player(&state.player);
                log::info!("Match over: won={} score={}", outcome.won, outcome.score);
                state.events.push(GameEvent::MatchEnded(outcome));
                state.phase = MatchPhase::Over;
            } else {
                state.phase = MatchPhase::Finishing { remaining_secs };
            }
        }
        MatchPhase::Over => {}
    }
}

/// Steps 1-4: both state machines, both integrations, then hit resolution
fn step_gameplay(state: &mut DuelState, input: &InputSnapshot) {
    state.time_ticks += 1;

    let DuelState {
        rng,
        tuning,
        viewport,
        player,
        enemy,
        effects,
        stats,
        events,
        ..
    } = state;
    let mut ctx = TickCtx {
        tuning,
        effects,
        rng,
        events,
        stats,
    };

    machine::advance_player(player, enemy, input, &mut ctx);
    machine::advance_enemy(enemy, player, &mut ctx);

    physics::integrate(player, enemy, viewport, ctx.tuning);
    physics::integrate(enemy, player, viewport, ctx.tuning);

    combat::resolve(player, enemy, &mut ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioCue;
    use crate::sim::state::{CombatState, Viewport};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn duel(seed: u64) -> DuelState {
        DuelState::new(seed, Viewport::new(1000.0, 800.0), Tuning::default()).unwrap()
    }

    /// An AI that never acts on its own
    fn passive_tuning() -> Tuning {
        Tuning {
            ai_attack_chance: 0.0,
            ai_block_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn match_ended(events: &[GameEvent]) -> Vec<MatchOutcome> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::MatchEnded(outcome) => Some(*outcome),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_hud_published_every_tick() {
        let mut state = duel(1);
        state.player.force = 50.0;
        tick(&mut state, &InputSnapshot::default(), DT);
        assert_eq!(state.hud.player_health, 100.0);
        assert_eq!(state.hud.enemy_health, 100.0);
        assert!((state.hud.player_force - 50.3).abs() < 1e-4);
    }

    #[test]
    fn test_single_hit_check_per_swing() {
        let mut state = DuelState::new(3, Viewport::new(1000.0, 800.0), passive_tuning()).unwrap();
        // Far apart: the enemy only walks, the swing whiffs
        state.player.pos.x = 100.0;
        state.enemy.pos.x = 880.0;

        let attack = InputSnapshot {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &attack, DT);
        assert_eq!(state.player.state, CombatState::Attacking);

        let mut checks_per_tick = Vec::new();
        for _ in 0..state.tuning.attack_duration {
            let before = state.stats.hit_checks;
            tick(&mut state, &InputSnapshot::default(), DT);
            checks_per_tick.push(state.stats.hit_checks - before);
        }
        assert_eq!(state.player.state, CombatState::Idle);
        assert_eq!(checks_per_tick.iter().sum::<u32>(), 1);
        // Fires on the tick the timer reaches the hit frame (25 -> 15 is 10 ticks)
        assert_eq!(checks_per_tick[9], 1);
    }

    #[test]
    fn test_landed_swing_deals_damage_once() {
        let mut state = DuelState::new(3, Viewport::new(1000.0, 800.0), passive_tuning()).unwrap();
        state.player.pos.x = 400.0;
        state.enemy.pos.x = 500.0;

        let attack = InputSnapshot {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &attack, DT);
        for _ in 0..30 {
            tick(&mut state, &InputSnapshot::default(), DT);
        }
        assert_eq!(state.enemy.health, 85.0);
        assert_eq!(state.stats.hits, 1);
        let hits = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Cue(AudioCue::Hit))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_player_defeat_reports_loss_after_delay() {
        let mut state = duel(4);
        state.player.health = 0.0;
        state.enemy.health = 60.0;

        tick(&mut state, &InputSnapshot::default(), 0.5);
        assert!(matches!(state.phase, MatchPhase::Finishing { .. }));
        assert!(match_ended(state.pending_events()).is_empty());

        for _ in 0..3 {
            tick(&mut state, &InputSnapshot::default(), 0.5);
            assert!(match_ended(state.pending_events()).is_empty());
        }
        tick(&mut state, &InputSnapshot::default(), 0.5);
        assert_eq!(state.phase, MatchPhase::Over);
        assert_eq!(
            match_ended(&state.drain_events()),
            vec![MatchOutcome { score: 0, won: false }]
        );

        // Reported exactly once
        for _ in 0..10 {
            tick(&mut state, &InputSnapshot::default(), 0.5);
        }
        assert!(match_ended(&state.drain_events()).is_empty());
    }

    #[test]
    fn test_enemy_defeat_reports_win_with_score() {
        let mut state = duel(5);
        state.player.health = 73.0;
        state.enemy.health = 0.0;

        for _ in 0..5 {
            tick(&mut state, &InputSnapshot::default(), 0.5);
        }
        assert_eq!(
            match_ended(&state.drain_events()),
            vec![MatchOutcome { score: 730, won: true }]
        );
    }

    #[test]
    fn test_double_knockout_is_a_loss() {
        let mut state = duel(6);
        state.player.health = 0.0;
        state.enemy.health = 0.0;
        for _ in 0..5 {
            tick(&mut state, &InputSnapshot::default(), 0.5);
        }
        assert_eq!(
            match_ended(&state.drain_events()),
            vec![MatchOutcome { score: 0, won: false }]
        );
    }

    #[test]
    fn test_gameplay_frozen_while_finishing() {
        let mut state = duel(7);
        state.enemy.health = 0.0;
        tick(&mut state, &InputSnapshot::default(), DT);
        let x = state.player.pos.x;
        let ticks = state.time_ticks;

        let right = InputSnapshot {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, DT);
        assert_eq!(state.player.pos.x, x);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_effects_animate_while_finishing() {
        let mut state = duel(8);
        state.player.pos.x = 400.0;
        state.enemy.pos.x = 500.0;
        let push = InputSnapshot {
            ability: true,
            ..Default::default()
        };
        tick(&mut state, &push, DT);
        assert_eq!(state.effects.shockwaves.len(), 1);
        let radius = state.effects.shockwaves[0].radius;

        state.enemy.health = 0.0;
        tick(&mut state, &InputSnapshot::default(), DT);
        tick(&mut state, &InputSnapshot::default(), DT);
        assert!(matches!(state.phase, MatchPhase::Finishing { .. }));
        assert!(state.effects.shockwaves[0].radius > radius);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = duel(9);
        state.player.pos.x = 400.0;
        state.enemy.pos.x = 500.0;
        let push = InputSnapshot {
            ability: true,
            ..Default::default()
        };
        tick(&mut state, &push, DT);
        state.enemy.ai_cooldown = 40;
        state.player.health = 0.0;
        tick(&mut state, &InputSnapshot::default(), DT);

        state.reset(10);
        assert_eq!(state.phase, MatchPhase::Fighting);
        assert!(state.effects.is_empty());
        assert!(state.pending_events().is_empty());
        assert_eq!(state.enemy.ai_cooldown, 0);
        assert_eq!(state.enemy.state, CombatState::Idle);
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.player.force, 100.0);
        assert_eq!(state.player.pos.x, 200.0);
        assert_eq!(state.enemy.pos.x, 600.0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.stats.pushes, 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = duel(99999);
        let mut b = duel(99999);
        let inputs = [
            InputSnapshot {
                right: true,
                ..Default::default()
            },
            InputSnapshot {
                attack: true,
                ..Default::default()
            },
            InputSnapshot::default(),
            InputSnapshot {
                ability: true,
                ..Default::default()
            },
        ];
        for i in 0..600 {
            let input = &inputs[(i / 7) % inputs.len()];
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemy.pos, b.enemy.pos);
        assert_eq!(a.player.health, b.player.health);
        assert_eq!(a.enemy.health, b.enemy.health);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    fn arb_input() -> impl Strategy<Value = InputSnapshot> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, attack, block, ability)| InputSnapshot {
                left,
                right,
                attack,
                block,
                ability,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_vitals_stay_in_bounds(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = duel(seed);
            let (min_x, max_x) = state.viewport.lateral_bounds(state.player.width, state.tuning.edge_margin);
            for input in &inputs {
                tick(&mut state, input, DT);
                for d in [&state.player, &state.enemy] {
                    prop_assert!(d.health >= 0.0 && d.health <= d.max_health);
                    prop_assert!(d.force >= 0.0 && d.force <= d.max_force);
                    prop_assert!(d.pos.x >= min_x && d.pos.x <= max_x);
                }
                prop_assert_eq!(state.player.ai_cooldown, 0);
            }
        }
    }
}
