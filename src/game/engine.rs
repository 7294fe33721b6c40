use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use super::{
    config::{Pacing, SimConfig},
    direction::{Direction, TurnQueue},
    grid::{Cell, Geometry},
    state::Snake,
};
use crate::input::{Inputs, Key};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// The head moved onto another segment
    SelfCollision,
    /// The player pressed the abort key
    Aborted,
}

/// What a single grid step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    AteFood,
    Collided,
}

/// Summary of one update call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// A new game began this call
    pub started: bool,
    /// Grid steps taken
    pub steps: u32,
    /// Food was eaten during one of the steps
    pub ate_food: bool,
    /// The run ended this call
    pub lost: Option<LossCause>,
}

/// The authoritative game state and its per-tick update rule.
///
/// Owns everything needed to continue a game: geometry, the fixed-step
/// clock, the turn queue, the snake, growth owed, food, and the random
/// source used for food placement.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) geometry: Geometry,
    pub(crate) speed: f64,
    pub(crate) pacing: Pacing,
    pub(crate) playing: bool,
    pub(crate) clock: f64,
    pub(crate) turns: TurnQueue,
    pub(crate) direction: Direction,
    pub(crate) snake: Snake,
    pub(crate) growth: u32,
    pub(crate) food: Cell,
    pub(crate) initial_length: usize,
    pub(crate) start_cell: Cell,
    pub(crate) growth_bonus: u32,
    pub(crate) rng: ChaCha8Rng,
}

impl Simulation {
    /// Create an idle simulation with a freshly reset board
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut sim = Self {
            geometry: Geometry::new(config.viewport_width, config.viewport_height),
            speed: config.speed,
            pacing: config.pacing,
            playing: false,
            clock: 0.0,
            turns: TurnQueue::new(),
            direction: Direction::Right,
            snake: Snake::new(config.start_cell),
            growth: 0,
            // Under the initial body, so the first reset draws real food
            food: config.start_cell,
            initial_length: config.initial_length.max(1),
            start_cell: config.start_cell,
            growth_bonus: config.growth_bonus,
            rng,
        };
        sim.reset();
        sim
    }

    /// Host start hook: adopt the viewport size.
    ///
    /// Cells already on the board are left where they are; callers resize
    /// before play begins.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.geometry.resize(width, height);
    }

    /// Put the board back to its initial conditions, idle.
    ///
    /// Food carries over from the previous game; it is only drawn again when
    /// the fresh snake covers it or it lies off the grid.
    pub fn reset(&mut self) {
        self.playing = false;
        self.clock = 0.0;
        self.turns.clear();
        self.direction = Direction::Right;
        self.growth = 0;

        let start = self.geometry.wrap(self.start_cell.x, self.start_cell.y);
        self.snake = Snake::new(start);
        for _ in 1..self.initial_length {
            self.advance_head(self.direction);
        }

        if self.snake.occupies(self.food) || !self.geometry.contains(self.food) {
            self.food = self.unoccupied();
        }
    }

    /// Reset and begin a new run
    pub fn play(&mut self) {
        self.reset();
        self.playing = true;
        info!(length = self.snake.len(), "game started");
    }

    /// End the current run
    pub fn lose(&mut self, cause: LossCause) {
        self.playing = false;
        info!(length = self.snake.len(), ?cause, "game over");
    }

    /// Queue a turn if it is legal after the turns already pending
    pub fn request_turn(&mut self, turn: Direction) -> bool {
        self.turns.request(self.direction, turn)
    }

    /// Advance the simulation by one host tick.
    ///
    /// `elapsed_secs` only paces movement under [`Pacing::RealTime`]; under
    /// deterministic pacing every call banks the same synthetic frame.
    pub fn update(&mut self, inputs: &impl Inputs, elapsed_secs: f64) -> UpdateReport {
        let mut report = UpdateReport::default();

        if !self.playing {
            if Key::START.into_iter().any(|key| inputs.is_key_down(key)) {
                self.play();
                report.started = true;
            }
            return report;
        }

        self.handle_inputs(inputs);
        if inputs.is_key_down(Key::Escape) {
            self.lose(LossCause::Aborted);
            report.lost = Some(LossCause::Aborted);
            return report;
        }

        self.clock += self.pacing.credit(elapsed_secs);
        let step_duration = self.step_duration();
        while self.clock > step_duration {
            self.clock -= step_duration;
            report.steps += 1;
            match self.step() {
                StepOutcome::Moved => {}
                StepOutcome::AteFood => report.ate_food = true,
                StepOutcome::Collided => {
                    report.lost = Some(LossCause::SelfCollision);
                    break;
                }
            }
        }

        report
    }

    /// Turn only across the current axis of motion
    fn handle_inputs(&mut self, inputs: &impl Inputs) {
        let (first, second) = if self.direction.is_vertical() {
            (Direction::Left, Direction::Right)
        } else {
            (Direction::Up, Direction::Down)
        };

        if inputs.is_key_down(Key::arrow(first)) {
            self.request_turn(first);
        } else if inputs.is_key_down(Key::arrow(second)) {
            self.request_turn(second);
        }
    }

    /// Move the snake exactly one cell, applying growth, collision and food
    pub fn step(&mut self) -> StepOutcome {
        let direction = self.turns.next_or(self.direction);
        let head = self.advance_head(direction);

        if self.growth > 0 {
            self.growth -= 1;
        } else {
            self.snake.pop_back();
        }

        if self.snake.body_occupies(head) {
            self.lose(LossCause::SelfCollision);
            StepOutcome::Collided
        } else if head == self.food {
            self.growth += self.growth_bonus;
            self.food = self.unoccupied();
            StepOutcome::AteFood
        } else {
            StepOutcome::Moved
        }
    }

    fn advance_head(&mut self, direction: Direction) -> Cell {
        self.direction = direction;
        let head = self.geometry.step(self.snake.head(), direction);
        self.snake.push_front(head);
        head
    }

    /// Sample uniformly until a cell off the snake turns up.
    ///
    /// There is no iteration cap: the game never fills the board. A snake
    /// covering every cell can only come from a degenerate geometry, and
    /// then the food simply lands on the head.
    pub(crate) fn unoccupied(&mut self) -> Cell {
        if self.snake.len() >= self.geometry.cell_count() {
            warn!(
                length = self.snake.len(),
                cells = self.geometry.cell_count(),
                "no free cell for food"
            );
            return self.snake.head();
        }

        loop {
            let cell = Cell::new(
                self.rng.gen_range(0..self.geometry.nx),
                self.rng.gen_range(0..self.geometry.ny),
            );
            if !self.snake.occupies(cell) {
                debug!(x = cell.x, y = cell.y, "food placed");
                return cell;
            }
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn turns(&self) -> &TurnQueue {
        &self.turns
    }

    pub fn growth(&self) -> u32 {
        self.growth
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Seconds of simulated time banked toward the next step
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Seconds of simulated time per grid step
    pub fn step_duration(&self) -> f64 {
        1.0 / self.speed
    }

    /// Score shown to the player: the current snake length
    pub fn score(&self) -> usize {
        self.snake.len()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
