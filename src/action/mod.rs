//! Action Handlers: one per verb intent. Each handler validates
//! preconditions against a read-only snapshot and, if they pass, computes
//! proposed state changes and response text -- it never mutates the world
//! directly.

mod container;
mod device;
mod go;
mod insert;
mod inventory;
mod look;
mod read;
mod take_drop;
mod wear;

use crate::change::StateChange;
use crate::config::EngineConfig;
use crate::id::VerbId;
use crate::item::Item;
use crate::parser::Command;
use crate::world::World;
use std::collections::HashMap;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ActionResponse {
    #[error("{0}")]
    Custom(String),
    #[error("You aren't holding that.")]
    ItemNotHeld,
    #[error("You can't see any such thing.")]
    ItemNotAccessible,
    #[error("You can't put things in the {0}.")]
    TargetNotContainer(String),
    #[error("The {0} is closed.")]
    ContainerClosed(String),
    #[error("The {0} won't fit.")]
    ItemTooLarge(String),
    #[error("The {0} is full.")]
    ContainerFull(String),
    #[error("You can't put something inside itself.")]
    SelfInsertion,
    #[error("You can't put the {inner} inside the {outer}, because the {outer} is inside the {inner}!", inner = .inner, outer = .outer)]
    IndirectRecursion { inner: String, outer: String },
    #[error("You can't remove the {0}.")]
    ItemNotRemovable(String),
    #[error("There's nothing written on the {0}.")]
    ItemNotReadable(String),
    #[error("It's too dark to see.")]
    RoomIsDark,
}

/// `message` plus the changes a committed turn would apply; handlers never
/// touch the `World` directly, only return this value.
#[derive(Debug, Clone, Default)]
pub struct ActionResult {
    pub message: String,
    pub changes: Vec<StateChange>,
}

impl ActionResult {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_changes(mut self, changes: Vec<StateChange>) -> Self {
        self.changes = changes;
        self
    }
}

/// Bundles the parsed command, a read-only world snapshot, the engine's
/// behaviour toggles, and small lookup helpers handlers need.
pub struct ActionContext<'a> {
    pub command: &'a Command,
    pub world: &'a World,
    pub config: &'a EngineConfig,
}

impl<'a> ActionContext<'a> {
    #[must_use]
    pub fn direct_item(&self) -> Option<&'a Item> {
        self.command.direct_object.and_then(|id| self.world.item(id))
    }

    #[must_use]
    pub fn indirect_item(&self) -> Option<&'a Item> {
        self.command.indirect_object.and_then(|id| self.world.item(id))
    }
}

pub trait ActionHandler: Send + Sync {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse>;
    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse>;
}

/// Runs `validate` then `process`, the order every call site needs.
pub fn run(handler: &dyn ActionHandler, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
    handler.validate(ctx)?;
    handler.process(ctx)
}

/// The default verb -> handler table. A trait-object table keyed by
/// `VerbId`, per the "polymorphism over actions" design note: adding a verb
/// is pure data (a vocabulary entry) plus one handler, no inheritance.
#[must_use]
pub fn default_handlers() -> HashMap<VerbId, Box<dyn ActionHandler>> {
    let mut table: HashMap<VerbId, Box<dyn ActionHandler>> = HashMap::new();
    table.insert(VerbId::new("take"), Box::new(take_drop::Take));
    table.insert(VerbId::new("drop"), Box::new(take_drop::Drop));
    table.insert(VerbId::new("insert"), Box::new(insert::Insert));
    table.insert(VerbId::new("open"), Box::new(container::Open));
    table.insert(VerbId::new("close"), Box::new(container::Close));
    table.insert(VerbId::new("lock"), Box::new(container::Lock));
    table.insert(VerbId::new("unlock"), Box::new(container::Unlock));
    table.insert(VerbId::new("turn-on"), Box::new(device::TurnOn));
    table.insert(VerbId::new("turn-off"), Box::new(device::TurnOff));
    table.insert(VerbId::new("read"), Box::new(read::Read));
    table.insert(VerbId::new("look"), Box::new(look::Look));
    table.insert(VerbId::new("examine"), Box::new(look::Examine));
    table.insert(VerbId::new("inventory"), Box::new(inventory::Inventory));
    table.insert(VerbId::new("wear"), Box::new(wear::Wear));
    table.insert(VerbId::new("remove"), Box::new(wear::Remove));
    table.insert(VerbId::new("go"), Box::new(go::Go));
    table
}
