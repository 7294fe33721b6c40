//! Keyboard input: the logical keys the simulation consumes, and the mapping
//! from terminal key events onto them.

pub mod handler;
pub mod keys;

pub use handler::{InputHandler, KeyAction};
pub use keys::{Inputs, Key, KeyState};
