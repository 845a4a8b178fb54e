//! The World Store: owns all mutable world state and is the only thing
//! that mutates it, exclusively through the atomic `apply` entry point.

use crate::attribute::Parent;
use crate::change::{ChangeHistory, StateChange};
use crate::global::{GlobalState, Pronouns};
use crate::id::{DaemonId, FuseId, ItemId, LocationId};
use crate::item::Item;
use crate::location::Location;
use crate::player::Player;
use log::info;
use std::collections::{HashMap, HashSet};

/// A fuse: a countdown that fires once its `turns_remaining` hits zero.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FuseState {
    pub turns_remaining: u32,
    pub payload: Vec<StateChange>,
    pub message: Option<String>,
}

/// Which of the nine invariants in §3 was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    SingleParentNoCycles,
    ParentMustBeContainerOrSurface,
    WornImpliesHeldAndWearable,
    LockedImpliesLockableOpenExclusive,
    TouchedIsMonotonic,
    ContainerCapacityExceeded,
    CarryingCapacityExceeded,
    PronounTargetMustExist,
    ReferencedEntityMustExist,
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::SingleParentNoCycles => "every item has exactly one parent and parents form no cycle",
            Self::ParentMustBeContainerOrSurface => "an item's container/surface parent must itself be a container or surface",
            Self::WornImpliesHeldAndWearable => "isWorn implies the item is held by the player and is wearable",
            Self::LockedImpliesLockableOpenExclusive => "isLocked implies isLockable; isOpen and isLocked are mutually exclusive",
            Self::TouchedIsMonotonic => "isTouched never reverts to false once set",
            Self::ContainerCapacityExceeded => "a container's contents exceed its capacity",
            Self::CarryingCapacityExceeded => "the player is carrying more than their carrying capacity",
            Self::PronounTargetMustExist => "a pronoun target must reference an existing item",
            Self::ReferencedEntityMustExist => "every referenced item/location id must exist",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("change #{index} supplied an old_value that did not match the current value")]
    OldValueMismatch { index: usize },
    #[error("change #{index} referenced an unknown {kind}: {id}")]
    UnknownEntity { index: usize, kind: &'static str, id: String },
    #[error("change #{index} would violate invariant: {invariant}")]
    InvariantViolated { index: usize, invariant: InvariantKind },
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct World {
    items: HashMap<ItemId, Item>,
    locations: HashMap<LocationId, Location>,
    player: Player,
    globals: GlobalState,
    pronouns: Pronouns,
    history: ChangeHistory,
    fuses: Vec<(FuseId, FuseState)>,
    daemons: HashSet<DaemonId>,
    turn_count: u64,
}

impl World {
    #[must_use]
    pub fn new(player: Player) -> Self {
        Self {
            items: HashMap::new(),
            locations: HashMap::new(),
            player,
            globals: GlobalState::default(),
            pronouns: Pronouns::default(),
            history: ChangeHistory::default(),
            fuses: Vec::new(),
            daemons: HashSet::new(),
            turn_count: 0,
        }
    }

    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    pub fn insert_location(&mut self, location: Location) {
        self.locations.insert(location.id, location);
    }

    // --- read-only accessors -------------------------------------------------

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn globals(&self) -> &GlobalState {
        &self.globals
    }

    #[must_use]
    pub fn pronouns(&self) -> &Pronouns {
        &self.pronouns
    }

    #[must_use]
    pub fn items_in(&self, parent: &Parent) -> Vec<&Item> {
        self.items.values().filter(|item| &item.parent == parent).collect()
    }

    #[must_use]
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    #[must_use]
    pub fn all_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    #[must_use]
    pub fn change_history(&self) -> &ChangeHistory {
        &self.history
    }

    /// Active fuses in insertion order: fuses tied for zero fire in the
    /// order they were added.
    #[must_use]
    pub fn fuses(&self) -> &[(FuseId, FuseState)] {
        &self.fuses
    }

    #[must_use]
    pub fn daemons(&self) -> &HashSet<DaemonId> {
        &self.daemons
    }

    #[must_use]
    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn advance_turn_count(&mut self) {
        self.turn_count += 1;
    }

    // --- mutation -------------------------------------------------------------

    /// Validates, folds, and atomically commits `changes`. Either every
    /// change lands in history or none does.
    pub fn apply(&mut self, changes: Vec<StateChange>) -> Result<(), EngineError> {
        let mut scratch = self.clone();
        let before_touched: HashMap<ItemId, bool> = self
            .items
            .iter()
            .map(|(id, item)| (*id, item.flag(crate::attribute::well_known::is_touched())))
            .collect();
        let mut last_touch: HashMap<ItemId, usize> = HashMap::new();
        let mut last_loc_touch: HashMap<LocationId, usize> = HashMap::new();

        for (index, change) in changes.iter().enumerate() {
            scratch.validate_precondition(change, index)?;
            scratch.record_touch(change, index, &mut last_touch, &mut last_loc_touch);
            scratch.fold(change.clone());
        }

        scratch.check_invariants(&before_touched, &last_touch, &last_loc_touch)?;

        *self = scratch;
        self.history.append_batch(changes);
        info!("world: committed a batch of {} change(s)", self.history.len());
        Ok(())
    }

    /// Returns a scratch copy with `changes` folded in, without validating
    /// preconditions or invariants. Used to hand after-hooks a preview of the
    /// state the turn is about to commit to, without committing early.
    #[must_use]
    pub fn preview(&self, changes: &[StateChange]) -> World {
        let mut scratch = self.clone();
        for change in changes {
            scratch.fold(change.clone());
        }
        scratch
    }

    fn record_touch(
        &self,
        change: &StateChange,
        index: usize,
        last_touch: &mut HashMap<ItemId, usize>,
        last_loc_touch: &mut HashMap<LocationId, usize>,
    ) {
        match change {
            StateChange::MoveItem { id, .. } | StateChange::SetItemAttribute { id, .. } => {
                last_touch.insert(*id, index);
            },
            StateChange::SetLocationAttribute { id, .. } => {
                last_loc_touch.insert(*id, index);
            },
            _ => {},
        }
    }

    fn validate_precondition(&self, change: &StateChange, index: usize) -> Result<(), EngineError> {
        match change {
            StateChange::MoveItem { id, new_parent } => {
                self.require_item(*id, index)?;
                self.require_parent_exists(new_parent, index)?;
            },
            StateChange::SetItemAttribute { id, old_value, .. } => {
                let item = self.require_item(*id, index)?;
                if let Some(attribute) = change.attribute_id() {
                    if let Some(expected) = old_value {
                        if item.attributes.get(&attribute) != Some(expected) {
                            return Err(EngineError::OldValueMismatch { index });
                        }
                    }
                }
            },
            StateChange::SetLocationAttribute { id, old_value, .. } => {
                let location = self.require_location(*id, index)?;
                if let Some(attribute) = change.attribute_id() {
                    if let Some(expected) = old_value {
                        if location.attributes.get(&attribute) != Some(expected) {
                            return Err(EngineError::OldValueMismatch { index });
                        }
                    }
                }
            },
            StateChange::SetPronoun { targets, .. } => {
                for id in targets {
                    self.require_item(*id, index)?;
                }
            },
            StateChange::MovePlayer { destination } => {
                self.require_location(*destination, index)?;
            },
            StateChange::RemoveFuse { .. }
            | StateChange::AddFuse { .. }
            | StateChange::DecrementFuses
            | StateChange::AddDaemon { .. }
            | StateChange::RemoveDaemon { .. }
            | StateChange::SetGlobal { .. }
            | StateChange::ClearGlobal { .. }
            | StateChange::SetFlag { .. }
            | StateChange::ClearFlag { .. }
            | StateChange::SetPlayerScore { .. }
            | StateChange::SetCombatState { .. } => {},
        }
        Ok(())
    }

    fn require_item(&self, id: ItemId, index: usize) -> Result<&Item, EngineError> {
        self.items.get(&id).ok_or(EngineError::UnknownEntity {
            index,
            kind: "item",
            id: id.to_string(),
        })
    }

    fn require_location(&self, id: LocationId, index: usize) -> Result<&Location, EngineError> {
        self.locations.get(&id).ok_or(EngineError::UnknownEntity {
            index,
            kind: "location",
            id: id.to_string(),
        })
    }

    fn require_parent_exists(&self, parent: &Parent, index: usize) -> Result<(), EngineError> {
        match parent {
            Parent::Item(id) => self.require_item(*id, index).map(|_| ()),
            Parent::Location(id) => self.require_location(*id, index).map(|_| ()),
            Parent::Player | Parent::Nowhere => Ok(()),
        }
    }

    fn fold(&mut self, change: StateChange) {
        match change {
            StateChange::MoveItem { id, new_parent } => {
                if let Some(item) = self.items.get_mut(&id) {
                    item.parent = new_parent;
                }
            },
            StateChange::SetItemAttribute { id, attribute, new_value, .. } => {
                if let Some(item) = self.items.get_mut(&id) {
                    item.attributes.insert(attribute, new_value);
                }
            },
            StateChange::SetLocationAttribute { id, attribute, new_value, .. } => {
                if let Some(location) = self.locations.get_mut(&id) {
                    location.attributes.insert(attribute, new_value);
                }
            },
            StateChange::SetGlobal { id, new_value } => self.globals.set(id, new_value),
            StateChange::ClearGlobal { id } => self.globals.clear(id),
            StateChange::SetFlag { id } => self.globals.set_flag(id),
            StateChange::ClearFlag { id } => self.globals.clear_flag(&id),
            StateChange::SetPronoun { pronoun, targets } => self.pronouns.set(pronoun, targets),
            StateChange::MovePlayer { destination } => self.player.current_location = destination,
            StateChange::SetPlayerScore { value } => self.player.score = value,
            StateChange::AddFuse { id, initial_turns, payload, message } => {
                let state = FuseState {
                    turns_remaining: initial_turns,
                    payload,
                    message,
                };
                if let Some(existing) = self.fuses.iter_mut().find(|(fuse_id, _)| *fuse_id == id) {
                    existing.1 = state;
                } else {
                    self.fuses.push((id, state));
                }
            },
            StateChange::RemoveFuse { id } => {
                self.fuses.retain(|(fuse_id, _)| *fuse_id != id);
            },
            StateChange::DecrementFuses => {
                for (_, fuse) in &mut self.fuses {
                    fuse.turns_remaining = fuse.turns_remaining.saturating_sub(1);
                }
            },
            StateChange::AddDaemon { id } => {
                self.daemons.insert(id);
            },
            StateChange::RemoveDaemon { id } => {
                self.daemons.remove(&id);
            },
            StateChange::SetCombatState { value } => self.player.combat = value,
        }
    }

    fn check_invariants(
        &self,
        before_touched: &HashMap<ItemId, bool>,
        last_touch: &HashMap<ItemId, usize>,
        last_loc_touch: &HashMap<LocationId, usize>,
    ) -> Result<(), EngineError> {
        use crate::attribute::well_known as attr;

        for item in self.items.values() {
            let index = last_touch.get(&item.id).copied().unwrap_or(0);

            // 1: no parent cycles.
            let mut cursor = item.parent.item_id();
            let mut seen = HashSet::new();
            seen.insert(item.id);
            while let Some(cursor_id) = cursor {
                if !seen.insert(cursor_id) {
                    return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::SingleParentNoCycles });
                }
                cursor = self.items.get(&cursor_id).and_then(|parent_item| parent_item.parent.item_id());
            }

            // 2: parent-is-item must be a container or surface.
            if let Some(parent_id) = item.parent.item_id() {
                let parent_ok = self
                    .items
                    .get(&parent_id)
                    .is_some_and(|parent_item| parent_item.is_container() || parent_item.is_surface());
                if !parent_ok {
                    return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::ParentMustBeContainerOrSurface });
                }
            }

            // 3: isWorn implies held by player and wearable.
            if item.flag(attr::is_worn())
                && (item.parent != Parent::Player || !item.flag(attr::is_wearable()))
            {
                return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::WornImpliesHeldAndWearable });
            }

            // 4: isLocked implies isLockable; open/locked mutually exclusive.
            if item.flag(attr::is_locked()) && !item.flag(attr::is_lockable()) {
                return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::LockedImpliesLockableOpenExclusive });
            }
            if item.flag(attr::is_locked()) && item.flag(attr::is_open()) {
                return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::LockedImpliesLockableOpenExclusive });
            }

            // 5: isTouched is monotonic.
            if before_touched.get(&item.id).copied().unwrap_or(false) && !item.flag(attr::is_touched()) {
                return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::TouchedIsMonotonic });
            }

            // 9: any ItemIdSet attribute (e.g. lockKey) must reference real items.
            for value in item.attributes.values() {
                if let crate::attribute::AttributeValue::ItemIdSet(set) = value {
                    for referenced in set {
                        if !self.items.contains_key(referenced) {
                            return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::ReferencedEntityMustExist });
                        }
                    }
                }
            }
        }

        // 6: container capacity.
        for container in self.items.values() {
            if let Some(capacity) = container.capacity() {
                let occupied: i64 = self
                    .items
                    .values()
                    .filter(|item| item.parent == Parent::Item(container.id))
                    .map(Item::size)
                    .sum();
                if occupied > capacity {
                    let index = last_touch.get(&container.id).copied().unwrap_or(0);
                    return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::ContainerCapacityExceeded });
                }
            }
        }

        // 7: player carrying capacity.
        let carried: i64 = self.items.values().filter(|item| item.parent == Parent::Player).map(Item::size).sum();
        if carried > self.player.carrying_capacity {
            return Err(EngineError::InvariantViolated { index: 0, invariant: InvariantKind::CarryingCapacityExceeded });
        }

        // 8: pronoun targets must reference existing items.
        for targets in [
            self.pronouns.get(crate::id::Pronoun::It),
            self.pronouns.get(crate::id::Pronoun::Them),
            self.pronouns.get(crate::id::Pronoun::Him),
            self.pronouns.get(crate::id::Pronoun::Her),
        ]
        .into_iter()
        .flatten()
        {
            for id in targets {
                if !self.items.contains_key(id) {
                    return Err(EngineError::InvariantViolated { index: 0, invariant: InvariantKind::PronounTargetMustExist });
                }
            }
        }

        // 9: every location referenced by player/items must exist.
        if !self.locations.contains_key(&self.player.current_location) {
            return Err(EngineError::InvariantViolated { index: 0, invariant: InvariantKind::ReferencedEntityMustExist });
        }
        for item in self.items.values() {
            if let Some(loc_id) = item.parent.location_id() {
                if !self.locations.contains_key(&loc_id) {
                    let index = last_touch.get(&item.id).copied().unwrap_or(0);
                    return Err(EngineError::InvariantViolated { index, invariant: InvariantKind::ReferencedEntityMustExist });
                }
            }
        }
        let _ = last_loc_touch; // reserved for future per-location invariant diagnostics

        Ok(())
    }
}

impl StateChange {
    fn attribute_id(&self) -> Option<crate::id::AttributeId> {
        match self {
            Self::SetItemAttribute { attribute, .. } | Self::SetLocationAttribute { attribute, .. } => Some(*attribute),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::well_known as attr;
    use crate::id::{ItemId, LocationId};

    fn small_world() -> World {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start Room", "A plain room.").with_inherently_lit(true));
        let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start)).with_flag(attr::is_takable(), true);
        world.insert_item(coin);
        world
    }

    #[test]
    fn apply_commits_every_change_or_none() {
        let mut world = small_world();
        let coin = ItemId::new("coin");
        let result = world.apply(vec![StateChange::MoveItem { id: coin, new_parent: Parent::Player }]);
        assert!(result.is_ok());
        assert_eq!(world.item(coin).unwrap().parent, Parent::Player);
        assert_eq!(world.change_history().len(), 1);
    }

    #[test]
    fn apply_rejects_unknown_entity_and_changes_nothing() {
        let mut world = small_world();
        let ghost = ItemId::new("ghost");
        let before = world.item(ItemId::new("coin")).unwrap().parent.clone();
        let result = world.apply(vec![StateChange::MoveItem { id: ghost, new_parent: Parent::Player }]);
        assert!(matches!(result, Err(EngineError::UnknownEntity { .. })));
        assert_eq!(world.item(ItemId::new("coin")).unwrap().parent, before);
        assert!(world.change_history().is_empty());
    }

    #[test]
    fn touched_is_monotonic() {
        let mut world = small_world();
        let coin = ItemId::new("coin");
        world
            .apply(vec![StateChange::SetItemAttribute {
                id: coin,
                attribute: attr::is_touched(),
                new_value: crate::attribute::AttributeValue::Bool(true),
                old_value: None,
            }])
            .unwrap();
        let result = world.apply(vec![StateChange::SetItemAttribute {
            id: coin,
            attribute: attr::is_touched(),
            new_value: crate::attribute::AttributeValue::Bool(false),
            old_value: None,
        }]);
        assert!(matches!(
            result,
            Err(EngineError::InvariantViolated { invariant: InvariantKind::TouchedIsMonotonic, .. })
        ));
    }

    #[test]
    fn carrying_capacity_is_enforced_atomically() {
        let mut world = small_world();
        world.player.carrying_capacity = 1;
        let boulder = Item::new(ItemId::new("boulder"), "huge boulder", Parent::Location(LocationId::new("startRoom")))
            .with_attribute(attr::size(), crate::attribute::AttributeValue::Int(5));
        world.insert_item(boulder);
        let result = world.apply(vec![StateChange::MoveItem { id: ItemId::new("boulder"), new_parent: Parent::Player }]);
        assert!(matches!(
            result,
            Err(EngineError::InvariantViolated { invariant: InvariantKind::CarryingCapacityExceeded, .. })
        ));
        assert_eq!(world.item(ItemId::new("boulder")).unwrap().parent, Parent::Location(LocationId::new("startRoom")));
    }
}
