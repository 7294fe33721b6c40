pub mod draw;
pub mod renderer;

pub use draw::{DrawCommand, Rgba, paint};
pub use renderer::Renderer;
