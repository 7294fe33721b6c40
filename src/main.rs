use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use snake_sim::game::{Pacing, SimConfig};
use snake_sim::modes::{HumanMode, ReplayMode};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_sim")]
#[command(version, about = "Deterministic Snake simulation with record and replay")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with a base configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snake speed in cells per second
    #[arg(long)]
    speed: Option<f64>,

    /// Clock policy
    #[arg(long)]
    pacing: Option<PacingArg>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Save a recording of the session here (human mode)
    #[arg(long)]
    record: Option<PathBuf>,

    /// Recording to play back (replay mode)
    #[arg(long)]
    recording: Option<PathBuf>,

    /// Write the final state here after playback (replay mode)
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Play back a recording without a terminal UI
    Replay,
}

#[derive(Clone, Copy, ValueEnum)]
enum PacingArg {
    /// Constant 1/60 s per update, replays exactly
    Deterministic,
    /// Follow wall-clock time between updates
    RealTime,
}

impl From<PacingArg> for Pacing {
    fn from(arg: PacingArg) -> Self {
        match arg {
            PacingArg::Deterministic => Pacing::Deterministic,
            PacingArg::RealTime => Pacing::RealTime,
        }
    }
}

impl Cli {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };

        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(pacing) = self.pacing {
            config.pacing = pacing.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(width) = self.width {
            config.viewport_width = width;
        }
        if let Some(height) = self.height {
            config.viewport_height = height;
        }

        if let Err(reason) = config.validate() {
            bail!("Invalid configuration: {reason}");
        }
        Ok(config)
    }
}

/// Install the log subscriber; the terminal UI owns stderr in human mode
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Replay) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        (None, Mode::Human) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let config = cli.sim_config()?;
            let mut human_mode = HumanMode::new(config);
            if let Some(path) = cli.record.clone() {
                human_mode = human_mode.with_recording(path);
            }
            human_mode.run().await?;
        }
        Mode::Replay => {
            let Some(path) = &cli.recording else {
                bail!("--recording is required in replay mode");
            };
            let mut replay_mode = ReplayMode::load(path)?;
            if let Some(out) = cli.snapshot_out.clone() {
                replay_mode = replay_mode.with_snapshot_out(out);
            }

            let summary = replay_mode.run()?;
            println!(
                "Replayed {} frames: length {}, {}{}",
                summary.frames,
                summary.length,
                if summary.playing { "still playing" } else { "idle" },
                if summary.verified {
                    ", final state verified"
                } else {
                    ""
                },
            );
        }
    }

    Ok(())
}
