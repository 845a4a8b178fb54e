//! Fuse/daemon scheduling: the timed-event machinery that runs between
//! turns, sharing the World Store's change-commit discipline.

use crate::action::ActionResult;
use crate::change::StateChange;
use crate::id::DaemonId;
use crate::world::{EngineError, World};
use log::info;

/// A per-turn daemon callback. Unlike fuses (whose payload is inert data
/// already sitting in the `World`), a daemon's behaviour is code, so it is
/// registered the same way item/location hooks are.
pub trait Daemon: Send + Sync {
    fn run(&self, world: &World) -> anyhow::Result<Option<ActionResult>>;
}

#[derive(Default)]
pub struct DaemonTable {
    daemons: Vec<(DaemonId, Box<dyn Daemon>)>,
}

impl DaemonTable {
    pub fn register(&mut self, id: DaemonId, daemon: Box<dyn Daemon>) {
        self.daemons.push((id, daemon));
    }
}

/// Decrements every active fuse, fires any that reach zero, then runs every
/// registered daemon whose id is currently active on the world. Returns the
/// accumulated text to append to the turn's output.
pub fn advance(world: &mut World, daemons: &DaemonTable) -> Result<Vec<String>, EngineError> {
    let mut messages = Vec::new();

    world.apply(vec![StateChange::DecrementFuses])?;

    let due: Vec<_> = world
        .fuses()
        .iter()
        .filter(|(_, fuse)| fuse.turns_remaining == 0)
        .map(|(id, fuse)| (*id, fuse.payload.clone(), fuse.message.clone()))
        .collect();

    for (id, payload, message) in due {
        info!("scheduler: firing fuse {id}");
        let mut changes = payload;
        changes.push(StateChange::RemoveFuse { id });
        world.apply(changes)?;
        if let Some(text) = message {
            messages.push(text);
        }
    }

    for (id, daemon) in &daemons.daemons {
        if !world.daemons().contains(id) {
            continue;
        }
        match daemon.run(world) {
            Ok(Some(result)) => {
                info!("scheduler: daemon {id} produced {} change(s)", result.changes.len());
                if !result.changes.is_empty() {
                    world.apply(result.changes)?;
                }
                if !result.message.is_empty() {
                    messages.push(result.message);
                }
            },
            Ok(None) => {},
            Err(err) => log::warn!("scheduler: daemon {id} failed, skipping: {err:#}"),
        }
    }

    Ok(messages)
}
