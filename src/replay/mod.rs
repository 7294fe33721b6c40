pub mod recording;

pub use recording::{Frame, Recorder, Recording, ReplayError};
