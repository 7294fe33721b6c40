//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The host drives it through [`Simulation::update`] and reads it back for drawing.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::{MAX_SPEED, Pacing, SYNTHETIC_FRAME_SECS, SimConfig};
pub use direction::{Direction, TurnQueue};
pub use engine::{LossCause, Simulation, StepOutcome, UpdateReport};
pub use grid::{Cell, Geometry, PixelRect};
pub use snapshot::{SNAPSHOT_KIND, Snapshot, SnapshotError};
pub use state::Snake;
