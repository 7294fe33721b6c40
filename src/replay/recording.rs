//! Input recording and deterministic playback
//!
//! A recording is an initial snapshot plus the exact inputs every update
//! call received. Because the simulation is a pure function of its state and
//! those inputs, playing the frames back over the restored snapshot
//! reproduces the original game, food placements included.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::game::{Simulation, Snapshot, SnapshotError, UpdateReport};
use crate::input::KeyState;

/// Inputs handed to one update call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub keys: KeyState,
    pub dt: f64,
}

/// Errors that can occur during playback
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("playback diverged from the recording after {frames} frames")]
    Desync { frames: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// State the first frame was applied to
    pub initial: Snapshot,
    pub frames: Vec<Frame>,
    /// State after the last frame, when the recorder was finished cleanly
    pub expected_final: Option<Snapshot>,
}

impl Recording {
    /// Restore the initial state and feed every frame through it
    pub fn play(&self) -> Result<Simulation, SnapshotError> {
        let mut sim = Simulation::restore(self.initial.clone())?;
        for frame in &self.frames {
            sim.update(&frame.keys, frame.dt);
        }
        Ok(sim)
    }

    /// Play back and compare against the recorded final state
    pub fn verify(&self) -> Result<Simulation, ReplayError> {
        let sim = self.play()?;
        match &self.expected_final {
            Some(expected) if *expected != sim.snapshot() => {
                warn!(frames = self.frames.len(), "replay desync");
                Err(ReplayError::Desync {
                    frames: self.frames.len(),
                })
            }
            Some(_) => Ok(sim),
            None => {
                debug!("recording has no final state to verify against");
                Ok(sim)
            }
        }
    }

    /// Save the recording as JSON, creating parent directories if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string(self).context("Failed to serialize recording")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write recording to {:?}", path))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording from {:?}", path))?;
        serde_json::from_str(&json).context("Failed to deserialize recording")
    }
}

/// Captures every update call made against a simulation
pub struct Recorder {
    initial: Snapshot,
    frames: Vec<Frame>,
}

impl Recorder {
    /// Begin recording from the simulation's current state
    pub fn start(sim: &Simulation) -> Self {
        Self {
            initial: sim.snapshot(),
            frames: Vec::new(),
        }
    }

    /// Record the inputs, then apply them
    pub fn update(&mut self, sim: &mut Simulation, keys: &KeyState, dt: f64) -> UpdateReport {
        self.frames.push(Frame {
            keys: keys.clone(),
            dt,
        });
        sim.update(keys, dt)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Close the recording with the simulation's final state
    pub fn finish(self, sim: &Simulation) -> Recording {
        Recording {
            initial: self.initial,
            frames: self.frames,
            expected_final: Some(sim.snapshot()),
        }
    }
}
