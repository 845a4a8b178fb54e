//! The `StateChange` tagged union and the append-only change history.

use crate::attribute::{AttributeValue, Parent};
use crate::id::{AttributeId, DaemonId, FuseId, GlobalId, ItemId, LocationId, Pronoun};
use crate::player::CombatState;
use std::collections::HashSet;

/// A single, independently-validated mutation proposed by a handler or
/// hook. Carries its own logical timestamp once appended to history; the
/// timestamp is assigned by the World Store at commit time, not by the
/// proposer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    MoveItem {
        id: ItemId,
        new_parent: Parent,
    },
    SetItemAttribute {
        id: ItemId,
        attribute: AttributeId,
        new_value: AttributeValue,
        old_value: Option<AttributeValue>,
    },
    SetLocationAttribute {
        id: LocationId,
        attribute: AttributeId,
        new_value: AttributeValue,
        old_value: Option<AttributeValue>,
    },
    SetGlobal {
        id: GlobalId,
        new_value: AttributeValue,
    },
    ClearGlobal {
        id: GlobalId,
    },
    SetFlag {
        id: String,
    },
    ClearFlag {
        id: String,
    },
    SetPronoun {
        pronoun: Pronoun,
        targets: HashSet<ItemId>,
    },
    MovePlayer {
        destination: LocationId,
    },
    SetPlayerScore {
        value: i64,
    },
    AddFuse {
        id: FuseId,
        initial_turns: u32,
        payload: Vec<StateChange>,
        message: Option<String>,
    },
    RemoveFuse {
        id: FuseId,
    },
    DecrementFuses,
    AddDaemon {
        id: DaemonId,
    },
    RemoveDaemon {
        id: DaemonId,
    },
    SetCombatState {
        value: Option<CombatState>,
    },
}

/// A `StateChange` as it actually landed in history, stamped with the
/// monotonic logical clock the World Store assigns at commit time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    pub timestamp: u64,
    pub change: StateChange,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ChangeHistory {
    entries: Vec<HistoryEntry>,
    next_timestamp: u64,
}

impl ChangeHistory {
    /// Appends `changes` as one atomic batch, each getting the next tick of
    /// the monotonic clock in order.
    pub fn append_batch(&mut self, changes: impl IntoIterator<Item = StateChange>) {
        for change in changes {
            let timestamp = self.next_timestamp;
            self.next_timestamp += 1;
            self.entries.push(HistoryEntry { timestamp, change });
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
