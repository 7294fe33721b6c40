use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::Direction;

/// Logical keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl Key {
    /// Keys that start a new game from idle
    pub const START: [Key; 2] = [Key::Space, Key::Enter];

    /// The arrow key steering toward `direction`
    pub fn arrow(direction: Direction) -> Key {
        match direction {
            Direction::Up => Key::ArrowUp,
            Direction::Down => Key::ArrowDown,
            Direction::Left => Key::ArrowLeft,
            Direction::Right => Key::ArrowRight,
        }
    }
}

/// Keyboard state as seen by one update call
pub trait Inputs {
    fn is_key_down(&self, key: Key) -> bool;
}

/// A set of keys held down during one update call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyState {
    down: BTreeSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}

impl Inputs for KeyState {
    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            down: iter.into_iter().collect(),
        }
    }
}
