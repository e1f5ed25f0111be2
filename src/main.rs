//! Galaxy Raiders entry point
//!
//! Wires configuration, collaborators and the score store, then runs the engine.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use galaxy_raiders::EngineConfig;
use galaxy_raiders::controllers::{DemoController, ScriptedController};
use galaxy_raiders::ports::{Controller, PcgRandom, Visualizer};
use galaxy_raiders::scores::{JsonFileStore, LeaderboardStore, MemoryStore, SessionKey};
use galaxy_raiders::sim::{GameEngine, RunMode};
use galaxy_raiders::visualizer::{JsonLinesVisualizer, NullVisualizer, TextVisualizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Render {
    Text,
    Json,
    None,
}

#[derive(Debug, Parser)]
#[command(name = "galaxy-raiders", about = "Fixed-tick 2D space shooter simulation")]
struct Args {
    /// TOML engine configuration (GR__* environment variables override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run exactly this many ticks without pacing, instead of forever
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for asteroid spawning and the demo pilot
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Command script, one per tick: w a s d (boost), f (fire), p (pause), . (idle)
    #[arg(long)]
    script: Option<String>,

    #[arg(long, value_enum, default_value_t = Render::Text)]
    render: Render,

    /// Only draw every n-th tick in text mode
    #[arg(long, default_value_t = 1)]
    render_every: u64,

    /// Directory for scoreboard.json and leaderboard.json (in-memory if omitted)
    #[arg(long)]
    scores_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = EngineConfig::load(args.config.as_deref()).context("loading engine config")?;

    let controller: Box<dyn Controller> = match &args.script {
        Some(script) => Box::new(ScriptedController::parse(script).context("parsing --script")?),
        None => Box::new(DemoController::new(args.seed.wrapping_add(1))),
    };
    let visualizer: Box<dyn Visualizer> = match args.render {
        Render::Text => Box::new(TextVisualizer::new(io::stdout(), args.render_every)),
        Render::Json => Box::new(JsonLinesVisualizer::new(io::stdout())),
        Render::None => Box::new(NullVisualizer),
    };
    let store: Box<dyn LeaderboardStore> = match &args.scores_dir {
        Some(dir) => Box::new(JsonFileStore::in_dir(dir)),
        None => Box::new(MemoryStore::new()),
    };

    let mut engine = GameEngine::new(
        config,
        Box::new(PcgRandom::new(args.seed)),
        controller,
        visualizer,
        store,
        SessionKey::now(),
    );

    let mode = match args.ticks {
        Some(ticks) => RunMode::Bounded(ticks),
        None => RunMode::Continuous,
    };
    engine.execute(mode);

    for (rank, entry) in engine.leaderboard().iter().enumerate() {
        log::info!(
            "#{} {} {} - {} points, {} asteroids",
            rank + 1,
            entry.date,
            entry.time,
            entry.final_score,
            entry.asteroids_destroyed
        );
    }
    Ok(())
}
