//! Draw primitives describing one frame of the simulation.
//!
//! The host paints these however it likes; nothing here knows about pixels
//! beyond the rectangles produced by [`Geometry::cell_rect`].

use crate::game::{Cell, Geometry, PixelRect, Simulation};

/// Prompt shown while no game is running
pub const HELP_TEXT: &str = "Press SPACE to play and ARROW keys to move";

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Composite over an opaque background
    pub fn over(&self, background: Rgba) -> (u8, u8, u8) {
        let mix = |fg: u8, bg: u8| {
            (f32::from(fg) * self.a + f32::from(bg) * (1.0 - self.a)).round() as u8
        };
        (
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::hex(0xF9F281);
    pub const HEAD: Rgba = Rgba::hex(0x000000);
    pub const BODY: Rgba = Rgba::hex(0x4F46E5);
    pub const FOOD: Rgba = Rgba::hex(0x16A34A);
    pub const SCORE: Rgba = Rgba::hex(0x16A34A);
    pub const HELP: Rgba = Rgba::hex(0x666666);
}

/// Which font configuration a text primitive uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Score,
    Help,
}

/// Corner of the text box pinned to the given point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    BottomLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: PixelRect,
        color: Rgba,
    },
    Text {
        text: String,
        role: TextRole,
        x: f64,
        y: f64,
        anchor: Anchor,
    },
}

/// Alpha for body segment `index` of a snake `len` segments long.
///
/// Fades linearly from just under 1 behind the head to 0.5 at the tail.
pub fn body_alpha(index: usize, len: usize) -> f32 {
    1.0 - (index as f32 / len as f32 / 2.0)
}

fn cell(geometry: &Geometry, at: Cell, color: Rgba) -> DrawCommand {
    DrawCommand::Rect {
        rect: geometry.cell_rect(at),
        color,
    }
}

/// Host paint hook: the primitives for the current state, back to front
pub fn paint(sim: &Simulation) -> Vec<DrawCommand> {
    let geometry = sim.geometry();
    let snake = sim.snake();
    let mut commands = Vec::with_capacity(snake.len() + 5);

    commands.push(DrawCommand::Rect {
        rect: PixelRect {
            x: geometry.width / 2.0,
            y: geometry.height / 2.0,
            width: geometry.width,
            height: geometry.height,
        },
        color: palette::BACKGROUND,
    });
    commands.push(cell(geometry, sim.food(), palette::FOOD));
    commands.push(cell(geometry, snake.head(), palette::HEAD));
    for (index, &segment) in snake.cells().enumerate().skip(1) {
        let color = palette::BODY.with_alpha(body_alpha(index, snake.len()));
        commands.push(cell(geometry, segment, color));
    }

    commands.push(DrawCommand::Text {
        text: sim.score().to_string(),
        role: TextRole::Score,
        x: geometry.cell_size,
        y: geometry.cell_size,
        anchor: Anchor::TopLeft,
    });
    if !sim.is_playing() {
        commands.push(DrawCommand::Text {
            text: HELP_TEXT.to_string(),
            role: TextRole::Help,
            x: geometry.cell_size,
            y: geometry.height - geometry.cell_size,
            anchor: Anchor::BottomLeft,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SimConfig;

    fn texts(commands: &[DrawCommand]) -> Vec<(TextRole, String)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { role, text, .. } => Some((*role, text.clone())),
                DrawCommand::Rect { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_idle_frame() {
        let sim = Simulation::new(SimConfig::seeded(2));
        let commands = paint(&sim);

        // background, food, head, 9 body segments, score, help
        assert_eq!(commands.len(), 14);
        assert_eq!(
            commands[0],
            DrawCommand::Rect {
                rect: PixelRect {
                    x: 400.0,
                    y: 300.0,
                    width: 800.0,
                    height: 600.0
                },
                color: palette::BACKGROUND,
            }
        );
        assert_eq!(
            texts(&commands),
            vec![
                (TextRole::Score, "10".to_string()),
                (TextRole::Help, HELP_TEXT.to_string())
            ]
        );
    }

    #[test]
    fn test_help_hidden_while_playing() {
        let mut sim = Simulation::new(SimConfig::seeded(2));
        sim.play();
        let commands = paint(&sim);
        assert_eq!(texts(&commands), vec![(TextRole::Score, "10".to_string())]);
    }

    #[test]
    fn test_body_fades_toward_tail() {
        assert_eq!(body_alpha(0, 10), 1.0);
        assert!((body_alpha(5, 10) - 0.75).abs() < 1e-6);
        assert!(body_alpha(9, 10) > 0.5);
        assert!(body_alpha(2, 10) > body_alpha(3, 10));
    }

    #[test]
    fn test_head_and_food_colors() {
        let sim = Simulation::new(SimConfig::seeded(2));
        let commands = paint(&sim);
        let geometry = sim.geometry();

        assert_eq!(commands[1], cell(geometry, sim.food(), palette::FOOD));
        assert_eq!(commands[2], cell(geometry, sim.snake().head(), palette::HEAD));
    }

    #[test]
    fn test_composite_over_background() {
        let half = palette::HEAD.with_alpha(0.5);
        let white = Rgba::hex(0xFFFFFF);
        assert_eq!(half.over(white), (128, 128, 128));
        assert_eq!(palette::BODY.over(white), (0x4F, 0x46, 0xE5));
    }
}
