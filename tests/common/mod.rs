//! Shared helpers for building a small in-test `Blueprint`/`TurnEngine`
//! without going through the TOML loader.

use grue_engine::blueprint::Blueprint;
use grue_engine::config::EngineConfig;
use grue_engine::dispatch::HookTable;
use grue_engine::item::Item;
use grue_engine::location::Location;
use grue_engine::messenger::Messenger;
use grue_engine::player::Player;
use grue_engine::scheduler::DaemonTable;
use grue_engine::turn::TurnEngine;

#[allow(dead_code)]
pub fn engine(locations: Vec<Location>, items: Vec<Item>, start: grue_engine::id::LocationId) -> TurnEngine {
    engine_with_config(locations, items, start, EngineConfig::default())
}

#[allow(dead_code)]
pub fn engine_with_config(
    locations: Vec<Location>,
    items: Vec<Item>,
    start: grue_engine::id::LocationId,
    config: EngineConfig,
) -> TurnEngine {
    let blueprint = Blueprint {
        title: "Test Game".to_string(),
        abbreviated_title: "TG".to_string(),
        introduction: "Welcome.".to_string(),
        release: "1".to_string(),
        max_score: 0,
        player: Player::new(start),
        locations,
        items,
        author_verbs: Vec::new(),
        hooks: HookTable::default(),
        daemons: DaemonTable::default(),
        messenger: Messenger::new(1),
        rng_seed: 1,
    };
    let (world, hooks, daemons, messenger, author_verbs) = blueprint.into_world();
    TurnEngine::new(world, hooks, daemons, messenger, config, &author_verbs)
}
