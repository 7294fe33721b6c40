use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way along the same axis
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns true for Up and Down
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Pending direction changes, applied one per simulation step, oldest first.
///
/// Legality is enforced on insertion: a turn is only queued when it neither
/// repeats nor reverses the direction it would follow (the last queued turn,
/// or the live direction when the queue is empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnQueue {
    turns: VecDeque<Direction>,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `turn` if it is legal after everything already queued.
    ///
    /// Returns whether the turn was accepted. Rejected turns are dropped
    /// silently; they are never an error.
    pub fn request(&mut self, current: Direction, turn: Direction) -> bool {
        let last = self.turns.back().copied().unwrap_or(current);
        if turn == last || turn == last.opposite() {
            return false;
        }
        self.turns.push_back(turn);
        true
    }

    /// Pop the oldest queued turn, or keep going `current` if none is pending
    pub fn next_or(&mut self, current: Direction) -> Direction {
        self.turns.pop_front().unwrap_or(current)
    }

    /// Check the insertion invariant against a live direction.
    ///
    /// Used when a queue arrives from outside (a restored snapshot) rather
    /// than through `request`.
    pub fn is_legal_after(&self, current: Direction) -> bool {
        let mut last = current;
        for &turn in &self.turns {
            if turn == last || turn == last.opposite() {
                return false;
            }
            last = turn;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl FromIterator<Direction> for TurnQueue {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}
