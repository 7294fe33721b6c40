//! Snake Sim - a deterministic, replayable Snake simulation
//!
//! This library provides:
//! - Core game logic: toroidal grid, turn queue, fixed-step engine, snapshots (game module)
//! - Logical keyboard input and its terminal mapping (input module)
//! - Draw primitives and a terminal renderer (render module)
//! - Input recording and exact playback (replay module)
//! - Session and frame-time metrics (metrics module)
//! - Execution modes: terminal play and headless replay (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod replay;
