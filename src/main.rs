use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::config::AppConfig;
use grid_snake::modes::{HeadlessConfig, HeadlessMode, HumanMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Grid snake with smooth interpolation")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Ticks per second at normal speed
    #[arg(long)]
    speed: Option<f64>,

    /// Speed multiplier while a direction key is repeated
    #[arg(long)]
    multiplier: Option<f64>,

    /// Draw interpolated in-between frames
    #[arg(long)]
    smooth: bool,

    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play (headless)
    #[arg(long, default_value = "100")]
    games: usize,

    /// Tick limit per game (headless)
    #[arg(long, default_value = "10000")]
    max_steps: u32,

    /// Print the headless summary as JSON
    #[arg(long)]
    json: bool,

    /// Write logs here instead of stderr (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Let the autopilot play a batch of games without a terminal
    Headless,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        let game = &mut config.game;
        if let Some(width) = self.width {
            game.grid_width = width;
        }
        if let Some(height) = self.height {
            game.grid_height = height;
        }
        if let Some(speed) = self.speed {
            game.ticks_per_second = speed;
        }
        if let Some(multiplier) = self.multiplier {
            game.speed_multiplier = multiplier;
        }
        if self.smooth {
            game.smooth_interpolation = true;
        }
        if self.seed.is_some() {
            game.rng_seed = self.seed;
        }
        game.validate()?;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match (&cli.mode, &cli.log_file) {
        (_, Some(path)) => init_file_tracing(path)?,
        // The TUI owns stderr; stay quiet unless a log file is given
        (Mode::Human, None) => {}
        (Mode::Headless, None) => init_tracing(),
    }

    let config = cli.app_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let headless_config = HeadlessConfig {
                games: cli.games,
                max_steps: cli.max_steps,
                ..HeadlessConfig::default()
            };
            let mut headless_mode = HeadlessMode::new(config.game, headless_config)?;
            let stats = headless_mode.run();

            if cli.json {
                let summary = serde_json::to_string_pretty(&stats.summary())
                    .context("Failed to serialize summary")?;
                println!("{summary}");
            } else {
                println!("{}", stats.format_summary());
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
