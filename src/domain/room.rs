//! Room entity: a named node of the mansion

use std::fmt;

use generational_arena::Index;

/// Maximum number of characters kept in a room name.
pub const MAX_NAME_LEN: usize = 49;

/// Room label, truncated on construction to [`MAX_NAME_LEN`] characters.
///
/// Truncation counts characters rather than bytes, so multi-byte names such as
/// "Sala de Música" are never cut inside a code point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().chars().take(MAX_NAME_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, always `<= MAX_NAME_LEN`.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RoomName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Handle to a room stored in a [`Mansion`](crate::domain::Mansion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub(crate) Index);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}/{}", slot, generation)
    }
}

/// Which door of a room to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Key the user types to take this door.
    pub fn key(self) -> char {
        match self {
            Direction::Left => 'e',
            Direction::Right => 'd',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// A room of the mansion with up to two doors leading further in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub left: Option<RoomId>,
    pub right: Option<RoomId>,
}

impl Room {
    pub fn child(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// A room without doors ends every path through it.
    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
