use anyhow::{Context, Result};
use clap::Parser;
use snake_loop::game::GameConfig;
use snake_loop::modes::HumanMode;
use snake_loop::persistence::{JsonScoreStore, MemoryScoreStore, ScoreStore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_loop")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "32")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "32")]
    height: usize,

    /// Drawing surface width in terminal columns [default: fits the grid]
    #[arg(long)]
    screen_width: Option<u16>,

    /// Drawing surface height in terminal rows [default: fits the grid]
    #[arg(long)]
    screen_height: Option<u16>,

    /// Player name shown on the start screen and stored with a high score
    #[arg(long, default_value = "player")]
    name: String,

    /// Target frame duration in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// JSON file holding the high score; kept in memory if omitted
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {:?}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn play<S: ScoreStore>(config: GameConfig, store: S, seed: Option<u64>) -> Result<()> {
    let mut human_mode = HumanMode::new(config, store, seed)?;
    human_mode.run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Create game configuration from CLI arguments
    let grid = GameConfig::new(cli.width, cli.height);
    let (fit_width, fit_height) = grid.required_screen();
    let config = GameConfig {
        screen_width: cli
            .screen_width
            .unwrap_or(u16::try_from(fit_width).unwrap_or(u16::MAX)),
        screen_height: cli
            .screen_height
            .unwrap_or(u16::try_from(fit_height).unwrap_or(u16::MAX)),
        player_name: cli.name,
        target_frame_ms: cli.frame_ms,
        ..grid
    };
    tracing::info!(?config, "starting");

    match cli.score_file {
        Some(path) => {
            let store = JsonScoreStore::new(path);
            tracing::info!(path = ?store.path(), "high score file");
            play(config, store, cli.seed).await
        }
        None => play(config, MemoryScoreStore::new(), cli.seed).await,
    }
}
