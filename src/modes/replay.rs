//! Headless playback of a saved recording
//!
//! Restores the recording's initial snapshot, feeds every recorded frame
//! through the simulation, and checks the result against the recorded final
//! state. Optionally writes the final state out as a snapshot.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::game::Simulation;
use crate::replay::Recording;

pub struct ReplayMode {
    recording: Recording,
    snapshot_out: Option<PathBuf>,
}

/// What playback ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub length: usize,
    pub playing: bool,
    pub verified: bool,
}

impl ReplayMode {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(Recording::load(path)?))
    }

    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            snapshot_out: None,
        }
    }

    /// Write the final state to `path` after playback
    pub fn with_snapshot_out(mut self, path: PathBuf) -> Self {
        self.snapshot_out = Some(path);
        self
    }

    pub fn run(&self) -> Result<ReplaySummary> {
        let sim = self
            .recording
            .verify()
            .context("Failed to replay recording")?;

        let summary = ReplaySummary {
            frames: self.recording.frames.len(),
            length: sim.score(),
            playing: sim.is_playing(),
            verified: self.recording.expected_final.is_some(),
        };
        info!(
            frames = summary.frames,
            length = summary.length,
            verified = summary.verified,
            "replay finished"
        );

        if let Some(path) = &self.snapshot_out {
            write_snapshot(&sim, path)?;
        }

        Ok(summary)
    }
}

fn write_snapshot(sim: &Simulation, path: &Path) -> Result<()> {
    let value = sim.to_value().context("Failed to serialize snapshot")?;
    let json = serde_json::to_string_pretty(&value).context("Failed to format snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot to {:?}", path))?;
    Ok(())
}
