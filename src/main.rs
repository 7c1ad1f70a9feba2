//! Pursuit Arena headless runner
//!
//! Drives one session with a simple evasive autopilot at a fixed 16 ms frame
//! clock and prints the final snapshot as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use pursuit_arena::{Session, TickInput, Tuning, tick};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Arena width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    /// Arena height
    #[arg(long, default_value_t = 720.0)]
    height: f32,
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate before giving up
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Optional JSON tuning override
    #[arg(long)]
    tuning: Option<PathBuf>,
}

const FRAME_MS: u64 = 16;

/// Run from the closest awake pursuer, drifting back toward the centre so
/// the player does not pin itself against a wall.
fn autopilot(session: &Session) -> TickInput {
    let player = session.player().rect().center();
    let nearest = session
        .pursuers()
        .iter()
        .filter(|p| !p.dormant)
        .map(|p| p.rect().center())
        .min_by(|a, b| {
            a.distance_squared(player)
                .partial_cmp(&b.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = nearest else {
        return TickInput::default();
    };

    let away = (player - threat).normalize_or_zero();
    let home = (session.arena_rect().center() - player) / session.arena_size().max_element();
    let dir: Vec2 = away + home;

    TickInput {
        left: dir.x < -0.3,
        right: dir.x > 0.3,
        up: dir.y < -0.3,
        down: dir.y > 0.3,
        restart: false,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read tuning file: {}", path.display()))?;
            Tuning::from_json(&json).with_context(|| "Invalid tuning file")?
        }
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    log::info!("Pursuit Arena (headless) starting, seed {}", seed);
    let mut session = Session::with_tuning(args.width, args.height, tuning, seed)
        .with_context(|| "Failed to build session")?;

    let mut snapshot = session.snapshot();
    for frame in 0..args.frames {
        let input = autopilot(&session);
        snapshot = tick(&mut session, frame * FRAME_MS, &input);
        if snapshot.terminal {
            break;
        }
    }

    if snapshot.terminal {
        log::info!(
            "Caught after {} with {} pursuers",
            snapshot.clock_label(),
            snapshot.pursuer_count
        );
    } else {
        log::info!("Survived {} with {} pursuers", snapshot.clock_label(), snapshot.pursuer_count);
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
