//! Strikers - headless native entry point

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use strikers::assets::{Atlas, BuiltinAssets};
use strikers::audio::{AudioManager, SilentMixer};
use strikers::platform::{ScriptedInput, SoftwareDisplay};
use strikers::sim::GameState;
use strikers::{Game, Settings};

#[derive(Parser, Debug)]
#[command(name = "strikers")]
#[command(about = "Fixed-rate arcade shooter with a dirty-rectangle renderer")]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = "strikers.json")]
    config: PathBuf,

    /// Seed for enemy spawns and bullets
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Do not play the background track
    #[arg(long)]
    no_music: bool,

    /// Start in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Run as fast as possible instead of at the fixed tick rate
    #[arg(long)]
    uncapped: bool,

    /// Let the player steer and shoot by itself
    #[arg(long)]
    autopilot: bool,

    /// Write the final screen as a PAM image
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut settings = Settings::load(&args.config);
    if args.no_music {
        settings.play_music = false;
    }
    if args.fullscreen {
        settings.start_fullscreen = true;
    }
    if args.uncapped {
        settings.frame_cap = false;
    }

    if let Some(path) = &args.write_config {
        settings
            .save(path)
            .with_context(|| format!("failed writing {}", path.display()))?;
        return Ok(());
    }

    // Missing sprites are fatal, and must fail before a display exists
    let assets = BuiltinAssets::new();
    let atlas = Atlas::load(&assets).context("failed loading sprite images")?;
    let audio = AudioManager::load(&assets, &settings, Box::new(SilentMixer));

    // Headless runs end on their own: a tick limit or player death
    let input = ScriptedInput::new();
    if args.max_ticks.is_none() && !args.autopilot {
        log::warn!("no --max-ticks and no --autopilot: session ends when an enemy reaches the player");
    }

    let state = GameState::new(args.seed, atlas.sizes());
    log::info!("starting session with seed {:#x}", args.seed);

    let display = SoftwareDisplay::new(false);
    let mut game = Game::new(
        state,
        atlas,
        audio,
        Box::new(input),
        Box::new(display),
        settings,
    )
    .with_autopilot(args.autopilot)
    .with_max_ticks(args.max_ticks);

    let score = game.run();
    log::info!("final score: {score}");
    println!("Score: {score}");

    if let Some(path) = &args.snapshot {
        write_snapshot(&game, path)?;
    }
    Ok(())
}

fn write_snapshot(game: &Game, path: &Path) -> Result<()> {
    let screen = game
        .display()
        .screen()
        .context("display keeps no screen contents")?;
    let file = File::create(path).with_context(|| format!("failed creating {}", path.display()))?;
    screen
        .write_pam(BufWriter::new(file))
        .with_context(|| format!("failed writing {}", path.display()))?;
    log::info!("snapshot written to {}", path.display());
    Ok(())
}
