//! Event Dispatcher: per-item / per-location before-turn and after-turn
//! hooks, registered at engine construction.

use crate::action::ActionResult;
use crate::id::{ItemId, LocationId};
use crate::parser::Command;
use crate::world::World;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub enum HookEvent<'a> {
    BeforeTurn(&'a Command),
    AfterTurn(&'a Command),
}

/// A single hook. `invoke` returning `Err` is treated as "no opinion", not
/// a turn failure -- the dispatcher logs it and moves on.
pub trait Hook: Send + Sync {
    fn invoke(&self, world: &World, event: HookEvent<'_>) -> anyhow::Result<Option<ActionResult>>;
}

#[derive(Default)]
pub struct HookTable {
    items: HashMap<ItemId, Vec<Box<dyn Hook>>>,
    locations: HashMap<LocationId, Vec<Box<dyn Hook>>>,
}

impl HookTable {
    pub fn register_item_hook(&mut self, id: ItemId, hook: Box<dyn Hook>) {
        self.items.entry(id).or_default().push(hook);
    }

    pub fn register_location_hook(&mut self, id: LocationId, hook: Box<dyn Hook>) {
        self.locations.entry(id).or_default().push(hook);
    }

    fn hooks_for(&self, id: ItemId) -> &[Box<dyn Hook>] {
        self.items.get(&id).map_or(&[], Vec::as_slice)
    }

    fn hooks_for_location(&self, id: LocationId) -> &[Box<dyn Hook>] {
        self.locations.get(&id).map_or(&[], Vec::as_slice)
    }
}

fn run_hook(hook: &dyn Hook, world: &World, event: HookEvent<'_>) -> Option<ActionResult> {
    match hook.invoke(world, event) {
        Ok(result) => result,
        Err(err) => {
            warn!("dispatch: hook failed, treating as no opinion: {err:#}");
            None
        },
    }
}

pub struct EventDispatcher<'a> {
    hooks: &'a HookTable,
}

impl<'a> EventDispatcher<'a> {
    #[must_use]
    pub fn new(hooks: &'a HookTable) -> Self {
        Self { hooks }
    }

    fn targets(&self, world: &World, command: &Command) -> Vec<&[Box<dyn Hook>]> {
        let mut targets = Vec::new();
        if let Some(id) = command.direct_object {
            targets.push(self.hooks.hooks_for(id));
        }
        if let Some(id) = command.indirect_object {
            targets.push(self.hooks.hooks_for(id));
        }
        targets.push(self.hooks.hooks_for_location(world.player().current_location));
        targets
    }

    /// Runs before-turn hooks in direct/indirect/location order. The first
    /// `Some` result short-circuits the default action handler; changes from
    /// every hook run up to and including that one accumulate, and the
    /// first non-empty message wins.
    #[must_use]
    pub fn before(&self, world: &World, command: &Command) -> Option<ActionResult> {
        let mut changes = Vec::new();
        let mut message = None;
        let mut short_circuited = false;

        'outer: for hook_list in self.targets(world, command) {
            for hook in hook_list {
                if let Some(result) = run_hook(hook.as_ref(), world, HookEvent::BeforeTurn(command)) {
                    changes.extend(result.changes);
                    if message.is_none() && !result.message.is_empty() {
                        message = Some(result.message);
                    }
                    short_circuited = true;
                    break 'outer;
                }
            }
        }

        short_circuited.then(|| ActionResult::new(message.unwrap_or_default()).with_changes(changes))
    }

    /// Runs after-turn hooks in the same order, unconditionally. Results
    /// never short-circuit; their changes and messages all accumulate.
    #[must_use]
    pub fn after(&self, world: &World, command: &Command) -> ActionResult {
        let mut changes = Vec::new();
        let mut messages = Vec::new();

        for hook_list in self.targets(world, command) {
            for hook in hook_list {
                if let Some(result) = run_hook(hook.as_ref(), world, HookEvent::AfterTurn(command)) {
                    if !result.message.is_empty() {
                        messages.push(result.message);
                    }
                    changes.extend(result.changes);
                }
            }
        }

        ActionResult::new(messages.join("\n")).with_changes(changes)
    }
}
