//! Game Blueprint: everything a specific game supplies to the engine at
//! construction time, as opposed to the engine's own behaviour (that's
//! `EngineConfig`).

use crate::dispatch::HookTable;
use crate::item::Item;
use crate::location::Location;
use crate::messenger::Messenger;
use crate::player::Player;
use crate::scheduler::DaemonTable;
use crate::world::World;

pub struct Blueprint {
    pub title: String,
    pub abbreviated_title: String,
    pub introduction: String,
    pub release: String,
    pub max_score: i64,
    pub player: Player,
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
    pub author_verbs: Vec<(String, Vec<String>)>,
    pub hooks: HookTable,
    pub daemons: DaemonTable,
    pub messenger: Messenger,
    pub rng_seed: u64,
}

impl Blueprint {
    /// Consumes the blueprint's story data into a freshly built `World`.
    /// The blueprint's behavioural pieces (`hooks`, `daemons`, `messenger`)
    /// are returned alongside it since they live next to the Turn Engine,
    /// not inside the serializable world state. `author_verbs` is returned
    /// too, since the `Vocabulary` is built next to the engine, not here.
    #[must_use]
    pub fn into_world(self) -> (World, HookTable, DaemonTable, Messenger, Vec<(String, Vec<String>)>) {
        let mut world = World::new(self.player);
        for location in self.locations {
            world.insert_location(location);
        }
        for item in self.items {
            world.insert_item(item);
        }
        (world, self.hooks, self.daemons, self.messenger, self.author_verbs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::LocationId;

    #[test]
    fn into_world_populates_locations_and_items() {
        let start = LocationId::new("startRoom");
        let blueprint = Blueprint {
            title: "Test Game".to_string(),
            abbreviated_title: "TG".to_string(),
            introduction: "Welcome.".to_string(),
            release: "1".to_string(),
            max_score: 100,
            player: Player::new(start),
            locations: vec![Location::new(start, "Start Room", "desc").with_inherently_lit(true)],
            items: Vec::new(),
            author_verbs: Vec::new(),
            hooks: HookTable::default(),
            daemons: DaemonTable::default(),
            messenger: Messenger::new(1),
            rng_seed: 1,
        };
        let (world, _hooks, _daemons, _messenger, _author_verbs) = blueprint.into_world();
        assert!(world.location(start).is_some());
    }
}
