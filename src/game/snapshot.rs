//! Complete save/restore of a [`Simulation`].
//!
//! A snapshot carries every field of the simulation, including the internal
//! state of the food RNG, so a restored game steps identically to the one it
//! was taken from. Restoring is strict: the schema tag, the field set, and
//! every value's range are checked before anything is rebuilt.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    config::{MAX_SPEED, Pacing},
    direction::{Direction, TurnQueue},
    engine::Simulation,
    grid::{Cell, Geometry},
    state::Snake,
};

/// Schema tag carried by every snapshot
pub const SNAPSHOT_KIND: &str = "SnakeSimulation";

/// Errors that can occur while restoring a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot does not match the schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected snapshot kind: expected {SNAPSHOT_KIND:?}, got {0:?}")]
    WrongKind(String),
    #[error("malformed snapshot field `{field}`: {reason}")]
    Malformed { field: &'static str, reason: String },
}

fn malformed(field: &'static str, reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Malformed {
        field,
        reason: reason.into(),
    }
}

/// Plain data image of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub kind: String,
    pub geometry: Geometry,
    pub speed: f64,
    pub pacing: Pacing,
    pub playing: bool,
    pub clock: f64,
    pub turns: TurnQueue,
    pub direction: Direction,
    pub snake: Snake,
    pub growth: u32,
    pub food: Cell,
    pub initial_length: usize,
    pub start_cell: Cell,
    pub growth_bonus: u32,
    pub rng: ChaCha8Rng,
}

impl Snapshot {
    /// Convert to a structured JSON value
    pub fn to_value(&self) -> Result<Value, SnapshotError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decode and validate a structured JSON value
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_value(value)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check every field against the ranges a live simulation can produce
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.kind != SNAPSHOT_KIND {
            return Err(SnapshotError::WrongKind(self.kind.clone()));
        }

        let geometry = &self.geometry;
        for (field, value) in [
            ("geometry.width", geometry.width),
            ("geometry.height", geometry.height),
            ("geometry.cell_size", geometry.cell_size),
            ("geometry.dx", geometry.dx),
            ("geometry.dy", geometry.dy),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(malformed(field, format!("must be positive, got {value}")));
            }
        }
        if geometry.nx < 1 || geometry.ny < 1 {
            return Err(malformed(
                "geometry",
                format!("grid must be at least 1x1, got {}x{}", geometry.nx, geometry.ny),
            ));
        }

        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(malformed("speed", format!("must be positive, got {}", self.speed)));
        }
        if self.speed > MAX_SPEED {
            return Err(malformed(
                "speed",
                format!("must be at most {MAX_SPEED}, got {}", self.speed),
            ));
        }

        if !self.clock.is_finite() || self.clock < 0.0 {
            return Err(malformed(
                "clock",
                format!("must be non-negative, got {}", self.clock),
            ));
        }

        if !self.turns.is_legal_after(self.direction) {
            return Err(malformed(
                "turns",
                "queued turns repeat or reverse their predecessor",
            ));
        }

        if self.snake.is_empty() {
            return Err(malformed("snake", "body is empty"));
        }
        if let Some(cell) = self.snake.cells().find(|&&cell| !geometry.contains(cell)) {
            return Err(malformed(
                "snake",
                format!("segment ({}, {}) is off the grid", cell.x, cell.y),
            ));
        }

        if !geometry.contains(self.food) {
            return Err(malformed(
                "food",
                format!("({}, {}) is off the grid", self.food.x, self.food.y),
            ));
        }

        if self.initial_length == 0 {
            return Err(malformed("initial_length", "must be at least 1"));
        }

        Ok(())
    }
}

impl Simulation {
    /// Capture the complete simulation state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            kind: SNAPSHOT_KIND.to_string(),
            geometry: self.geometry,
            speed: self.speed,
            pacing: self.pacing,
            playing: self.playing,
            clock: self.clock,
            turns: self.turns.clone(),
            direction: self.direction,
            snake: self.snake.clone(),
            growth: self.growth,
            food: self.food,
            initial_length: self.initial_length,
            start_cell: self.start_cell,
            growth_bonus: self.growth_bonus,
            rng: self.rng.clone(),
        }
    }

    /// Rebuild a simulation from a snapshot, after validating it
    pub fn restore(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        debug!(
            playing = snapshot.playing,
            length = snapshot.snake.len(),
            "restoring snapshot"
        );

        Ok(Self {
            geometry: snapshot.geometry,
            speed: snapshot.speed,
            pacing: snapshot.pacing,
            playing: snapshot.playing,
            clock: snapshot.clock,
            turns: snapshot.turns,
            direction: snapshot.direction,
            snake: snapshot.snake,
            growth: snapshot.growth,
            food: snapshot.food,
            initial_length: snapshot.initial_length,
            start_cell: snapshot.start_cell,
            growth_bonus: snapshot.growth_bonus,
            rng: snapshot.rng,
        })
    }

    /// Serialize to a tagged structured value
    pub fn to_value(&self) -> Result<Value, SnapshotError> {
        self.snapshot().to_value()
    }

    /// Deserialize from a tagged structured value
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        Self::restore(Snapshot::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SimConfig;
    use crate::input::{Key, KeyState};

    fn started(seed: u64) -> Simulation {
        let mut sim = Simulation::new(SimConfig::seeded(seed));
        sim.update(&[Key::Space].into_iter().collect::<KeyState>(), 0.0);
        sim
    }

    #[test]
    fn test_value_is_tagged() {
        let value = started(5).to_value().unwrap();
        assert_eq!(value["kind"], SNAPSHOT_KIND);
        assert_eq!(value["direction"], "RIGHT");
        assert_eq!(value["playing"], true);
        assert!(value["rng"].is_object());
    }

    #[test]
    fn test_restore_continues_identically() {
        let mut original = started(9);
        original.request_turn(Direction::Down);
        let mut restored = Simulation::from_value(original.to_value().unwrap()).unwrap();

        for _ in 0..200 {
            original.step();
            restored.step();
            assert_eq!(original.snake(), restored.snake());
            assert_eq!(original.food(), restored.food());
            assert_eq!(original.is_playing(), restored.is_playing());
        }
    }

    #[test]
    fn test_rng_state_carries_over() {
        let mut original = started(11);
        let mut restored = Simulation::restore(original.snapshot()).unwrap();

        let a: Vec<Cell> = (0..20).map(|_| original.unoccupied()).collect();
        let b: Vec<Cell> = (0..20).map(|_| restored.unoccupied()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let mut value = started(1).to_value().unwrap();
        value["kind"] = Value::from("Tetris");
        assert!(matches!(
            Simulation::from_value(value),
            Err(SnapshotError::WrongKind(kind)) if kind == "Tetris"
        ));
    }

    #[test]
    fn test_rejects_missing_and_unknown_fields() {
        let mut missing = started(1).to_value().unwrap();
        missing.as_object_mut().unwrap().remove("food");
        assert!(matches!(
            Simulation::from_value(missing),
            Err(SnapshotError::Json(_))
        ));

        let mut extra = started(1).to_value().unwrap();
        extra["cloud"] = Value::from(true);
        assert!(matches!(
            Simulation::from_value(extra),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_rng_state() {
        let mut value = started(1).to_value().unwrap();
        value["rng"] = Value::from("not a generator");
        assert!(matches!(
            Simulation::from_value(value),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let sim = started(1);

        let mut snapshot = sim.snapshot();
        snapshot.food = Cell::new(-1, 0);
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "food", .. })
        ));

        let mut snapshot = sim.snapshot();
        snapshot.snake = Snake::from_cells([Cell::new(0, 0), Cell::new(0, 999)]);
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "snake", .. })
        ));

        let mut snapshot = sim.snapshot();
        snapshot.snake = Snake::from_cells([]);
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "snake", .. })
        ));

        let mut snapshot = sim.snapshot();
        snapshot.speed = -3.0;
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "speed", .. })
        ));

        let mut snapshot = sim.snapshot();
        snapshot.speed = 1e12;
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "speed", .. })
        ));

        let mut snapshot = sim.snapshot();
        snapshot.geometry.nx = 0;
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "geometry", .. })
        ));
    }

    #[test]
    fn test_rejects_illegal_turn_queue() {
        let mut snapshot = started(1).snapshot();
        snapshot.direction = Direction::Right;
        snapshot.turns = [Direction::Left].into_iter().collect();
        assert!(matches!(
            Simulation::restore(snapshot),
            Err(SnapshotError::Malformed { field: "turns", .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let sim = started(3);
        let json = sim.snapshot().to_json().unwrap();
        let snapshot = Snapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, sim.snapshot());
    }
}
