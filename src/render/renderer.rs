use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::collections::HashMap;

use super::draw::{HELP_TEXT, Rgba, body_alpha, palette};
use crate::game::{Cell, Simulation};
use crate::metrics::{FrameStats, GameMetrics};

fn rgb(color: Rgba) -> Color {
    let (r, g, b) = color.over(palette::BACKGROUND);
    Color::Rgb(r, g, b)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        sim: &Simulation,
        metrics: &GameMetrics,
        frames: &FrameStats,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], sim, metrics, frames);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(chunks[1], sim);
        frame.render_widget(grid, chunks[1]);

        let footer = self.render_footer(chunks[2], sim);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, sim: &Simulation) -> Paragraph<'_> {
        let geometry = sim.geometry();
        let snake = sim.snake();
        let head = snake.head();

        // First (frontmost) index of every occupied cell
        let mut segments: HashMap<Cell, usize> = HashMap::with_capacity(snake.len());
        for (index, &cell) in snake.cells().enumerate() {
            segments.entry(cell).or_insert(index);
        }

        let background = Style::default().bg(rgb(palette::BACKGROUND));
        let mut lines = Vec::with_capacity(geometry.ny as usize);

        for y in 0..geometry.ny {
            let mut spans = Vec::with_capacity(geometry.nx as usize);

            for x in 0..geometry.nx {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled("██", Style::default().fg(rgb(palette::HEAD)))
                } else if let Some(&index) = segments.get(&cell) {
                    let color = palette::BODY.with_alpha(body_alpha(index, snake.len()));
                    Span::styled("██", Style::default().fg(rgb(color)))
                } else if cell == sim.food() {
                    Span::styled("██", Style::default().fg(rgb(palette::FOOD)))
                } else {
                    Span::styled("  ", background)
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        sim: &Simulation,
        metrics: &GameMetrics,
        frames: &FrameStats,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                sim.score().to_string(),
                Style::default()
                    .fg(rgb(palette::SCORE))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_length.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("FPS: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.0}", frames.fps()),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_footer(&self, _area: Rect, sim: &Simulation) -> Paragraph<'_> {
        let text = if sim.is_playing() {
            vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to turn | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to give up | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        } else {
            vec![Line::from(vec![Span::styled(
                HELP_TEXT,
                Style::default()
                    .fg(rgb(palette::HELP))
                    .add_modifier(Modifier::ITALIC),
            )])]
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
