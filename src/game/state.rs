use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::grid::Cell;

/// The snake body, head at index 0 and tail at the back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from cells ordered head first
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            body: cells.into_iter().collect(),
        }
    }

    /// Get the head position
    ///
    /// A snake always has at least one segment; an empty body only exists
    /// transiently inside a rejected snapshot.
    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or(Cell::new(0, 0))
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    pub fn push_front(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub fn pop_back(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }

    /// Check whether any segment sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check whether a segment other than the head sits on `cell`
    pub fn body_occupies(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }

    /// Segments from head to tail
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.push_front(Cell::new(6, 5));
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Some(Cell::new(5, 5)));

        assert_eq!(snake.pop_back(), Some(Cell::new(5, 5)));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        assert!(!snake.body_occupies(Cell::new(5, 5))); // head
        assert!(snake.body_occupies(Cell::new(4, 5))); // body
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(!snake.occupies(Cell::new(10, 10))); // empty
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let snake = Snake::from_cells([Cell::new(1, 2), Cell::new(0, 2)]);
        let json = serde_json::to_string(&snake).unwrap();
        assert_eq!(json, r#"[{"x":1,"y":2},{"x":0,"y":2}]"#);
    }
}
