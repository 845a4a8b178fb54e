//! Player data model.

use crate::id::LocationId;

/// Minimal combat status. The engine only moves this value around via
/// `SetCombatState`; no combat resolution rules live in this crate (see
/// Non-goals).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CombatState {
    pub opponent: String,
    pub rounds: u32,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Player {
    pub current_location: LocationId,
    pub carrying_capacity: i64,
    pub score: i64,
    pub moves: u64,
    pub health: i64,
    pub combat: Option<CombatState>,
}

impl Player {
    #[must_use]
    pub fn new(start: LocationId) -> Self {
        Self {
            current_location: start,
            carrying_capacity: 100,
            score: 0,
            moves: 0,
            health: 100,
            combat: None,
        }
    }

    #[must_use]
    pub fn with_carrying_capacity(mut self, capacity: i64) -> Self {
        self.carrying_capacity = capacity;
        self
    }
}
