//! Location data model.

use crate::attribute::{well_known as attr, AttributeValue};
use crate::id::{AttributeId, ItemId, LocationId};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A compass or free-form travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "north" | "n" => Self::North,
            "south" | "s" => Self::South,
            "east" | "e" => Self::East,
            "west" | "w" => Self::West,
            "northeast" | "ne" => Self::Northeast,
            "northwest" | "nw" => Self::Northwest,
            "southeast" | "se" => Self::Southeast,
            "southwest" | "sw" => Self::Southwest,
            "up" | "u" => Self::Up,
            "down" | "d" => Self::Down,
            "in" => Self::In,
            "out" => Self::Out,
            _ => return None,
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::Up => "up",
            Self::Down => "down",
            Self::In => "in",
            Self::Out => "out",
        };
        write!(f, "{word}")
    }
}

/// A destination plus optional door state gating passage through it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Exit {
    pub destination: LocationId,
    /// If set, this exit is a door: the item carries `isOpenable`/`isOpen`/
    /// `isLocked` the same way any other item does, and the Go handler
    /// consults it before moving the player.
    pub door: Option<ItemId>,
    pub barred_message: Option<String>,
}

impl Exit {
    #[must_use]
    pub fn new(destination: LocationId) -> Self {
        Self {
            destination,
            door: None,
            barred_message: None,
        }
    }

    #[must_use]
    pub fn with_door(mut self, door: ItemId) -> Self {
        self.door = Some(door);
        self
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub exits: HashMap<Direction, Exit>,
    pub attributes: HashMap<AttributeId, AttributeValue>,
    /// Items addressable from this location without being physically
    /// "here" (e.g. the sky, a distant mountain mentioned in the room text).
    pub local_globals: HashSet<ItemId>,
    pub visited: bool,
}

impl Location {
    #[must_use]
    pub fn new(id: LocationId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            exits: HashMap::new(),
            attributes: HashMap::new(),
            local_globals: HashSet::new(),
            visited: false,
        }
    }

    #[must_use]
    pub fn with_exit(mut self, direction: Direction, exit: Exit) -> Self {
        self.exits.insert(direction, exit);
        self
    }

    #[must_use]
    pub fn inherently_lit(&self) -> bool {
        self.attributes
            .get(&attr::is_inherently_lit())
            .and_then(AttributeValue::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn with_inherently_lit(mut self, lit: bool) -> Self {
        self.attributes.insert(attr::is_inherently_lit(), AttributeValue::Bool(lit));
        self
    }
}
