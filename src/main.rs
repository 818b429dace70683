//! Saber Duel headless runner
//!
//! Plays one match with a scripted player against the AI and logs the
//! outcome.

use std::path::PathBuf;

use clap::Parser;
use saber_duel::sim::{CombatState, DuelState, GameEvent, InputSnapshot, Viewport, tick};
use saber_duel::{Difficulty, MissionBriefing, Tuning, battle_report_fallback};

/// Saber Duel headless runner - scripted player vs the AI
#[derive(Parser, Debug)]
#[command(name = "saber-duel")]
#[command(about = "Play one scripted match against the AI and report the outcome")]
struct Args {
    /// Tuning overrides (JSON); defaults are used when omitted
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Match seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty label shown in the briefing
    #[arg(long, default_value = "knight")]
    difficulty: Difficulty,

    /// Viewport width in px
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in px
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

/// Seed used when none is given
const DEFAULT_SEED: u64 = 0x5ABE_D0E1;

/// Frames before the runner gives up on a match
const MAX_FRAMES: u32 = 60 * 60 * 5;
const FRAME_DT: f32 = 1.0 / saber_duel::consts::FRAME_RATE;

/// Simple scripted opponent for the AI: close in, swing, guard, push
fn autopilot(state: &DuelState) -> InputSnapshot {
    let me = &state.player;
    let foe = &state.enemy;
    let dist = me.distance_to(foe);
    let toward_right = foe.pos.x > me.pos.x;
    let mut input = InputSnapshot::default();

    if foe.state == CombatState::Attacking && dist < 200.0 {
        input.block = true;
    } else if foe.state == CombatState::Stunned || foe.ai_cooldown > 0 {
        if dist < 160.0 {
            input.attack = true;
        } else {
            input.right = toward_right;
            input.left = !toward_right;
        }
    } else if me.force >= state.tuning.push_cost && dist < 140.0 && state.time_ticks % 90 == 0 {
        input.ability = true;
    } else if dist > 150.0 {
        input.right = toward_right;
        input.left = !toward_right;
    } else if state.time_ticks % 40 == 0 {
        input.attack = true;
    }
    input
}

fn run(args: Args) -> saber_duel::Result<()> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or(DEFAULT_SEED);

    let briefing = MissionBriefing::from_json_or_fallback("", args.difficulty);
    log::info!(
        "{} - {} ({}): \"{}\"",
        briefing.title,
        briefing.enemy_name,
        briefing.difficulty.as_str(),
        briefing.taunt
    );

    let mut state = DuelState::new(seed, Viewport::new(args.width, args.height), tuning)?;

    for _ in 0..MAX_FRAMES {
        let input = autopilot(&state);
        tick(&mut state, &input, FRAME_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::Cue(cue) => log::trace!("cue: {}", cue.as_str()),
                GameEvent::MatchEnded(outcome) => {
                    log::info!("Stats: {:?}", state.stats);
                    println!(
                        "{} | score {} | {}",
                        if outcome.won { "VICTORY" } else { "DEFEAT" },
                        outcome.score,
                        battle_report_fallback(outcome.won)
                    );
                    return Ok(());
                }
            }
        }
    }

    log::warn!(
        "No decision after {} frames (player {:.0} hp, enemy {:.0} hp)",
        MAX_FRAMES,
        state.hud.player_health,
        state.hud.enemy_health
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Saber Duel (headless) starting...");

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["saber-duel"]).unwrap();
        assert!(args.tuning.is_none());
        assert!(args.seed.is_none());
        assert_eq!(args.difficulty, Difficulty::Knight);
        assert_eq!((args.width, args.height), (1280.0, 720.0));
    }

    #[test]
    fn test_args_parsed() {
        let args = Args::try_parse_from([
            "saber-duel",
            "--tuning",
            "balance.json",
            "--seed",
            "42",
            "--difficulty",
            "master",
        ])
        .unwrap();
        assert_eq!(args.tuning, Some(PathBuf::from("balance.json")));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.difficulty, Difficulty::Master);
    }

    #[test]
    fn test_malformed_seed_rejected() {
        assert!(Args::try_parse_from(["saber-duel", "--seed", "banana"]).is_err());
        assert!(Args::try_parse_from(["saber-duel", "--seed", "-3"]).is_err());
        assert!(Args::try_parse_from(["saber-duel", "--difficulty", "legend"]).is_err());
    }

    #[test]
    fn test_autopilot_closes_distance() {
        let state = DuelState::new(1, Viewport::new(1280.0, 720.0), Tuning::default()).unwrap();
        let input = autopilot(&state);
        assert!(input.right && !input.left);
    }
}
