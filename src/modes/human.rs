use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{SYNTHETIC_FRAME_SECS, SimConfig, Simulation, UpdateReport};
use crate::input::{InputHandler, KeyAction, KeyState};
use crate::metrics::{FrameStats, GameMetrics};
use crate::render::Renderer;
use crate::replay::Recorder;

/// Plays the simulation in the terminal.
///
/// Terminals report key presses rather than held keys, so every key pressed
/// since the previous tick counts as down for the next update call.
pub struct HumanMode {
    sim: Simulation,
    metrics: GameMetrics,
    frames: FrameStats,
    renderer: Renderer,
    input_handler: InputHandler,
    keys: KeyState,
    recorder: Option<Recorder>,
    record_path: Option<PathBuf>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: SimConfig) -> Self {
        Self {
            sim: Simulation::new(config),
            metrics: GameMetrics::new(),
            frames: FrameStats::default(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            keys: KeyState::new(),
            recorder: None,
            record_path: None,
            should_quit: false,
        }
    }

    /// Record every update call and save the recording to `path` on exit
    pub fn with_recording(mut self, path: PathBuf) -> Self {
        self.recorder = Some(Recorder::start(&self.sim));
        self.record_path = Some(path);
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result?;
        self.save_recording()
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One update call per synthetic frame
        let mut tick_timer = interval(Duration::from_secs_f64(SYNTHETIC_FRAME_SECS));
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let now = Instant::now();
                    let elapsed = now - last_tick;
                    last_tick = now;
                    self.tick(elapsed);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics, &self.frames);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Press(key) => self.keys.press(key),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn tick(&mut self, elapsed: Duration) -> UpdateReport {
        self.frames.record(elapsed);

        let dt = elapsed.as_secs_f64();
        let report = match self.recorder.as_mut() {
            Some(recorder) => recorder.update(&mut self.sim, &self.keys, dt),
            None => self.sim.update(&self.keys, dt),
        };
        self.keys.clear();

        if report.started {
            self.metrics.on_game_start();
        }
        if report.lost.is_some() {
            self.metrics.on_game_over(self.sim.score());
        }

        report
    }

    fn save_recording(&mut self) -> Result<()> {
        if let (Some(recorder), Some(path)) = (self.recorder.take(), self.record_path.take()) {
            let frames = recorder.frame_count();
            recorder.finish(&self.sim).save(&path)?;
            info!(frames, path = %path.display(), "recording saved");
        }
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
