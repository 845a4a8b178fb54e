//! Reads a directory of TOML files into a `Blueprint`'s story data. Tokens
//! in the TOML reference each other by name; a `SymbolTable` resolves those
//! tokens once every table has been read, and an unresolved reference is
//! reported as an `anyhow` error naming the offending token.

mod items;
mod locations;
mod player;
mod symbols;
mod verbs;

use crate::item::Item;
use crate::location::Location;
use crate::player::Player;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use symbols::SymbolTable;

pub use items::ItemDef;
pub use locations::{ExitDef, LocationDef};
pub use player::PlayerDef;
pub use verbs::VerbDef;

#[derive(Debug, serde::Deserialize)]
pub struct GameDef {
    pub title: String,
    pub abbreviated_title: String,
    pub introduction: String,
    pub release: String,
    #[serde(default)]
    pub max_score: i64,
}

/// Everything a `loader` run produces: the populated story data plus the
/// author verb table the `Vocabulary` is built from. Hooks, daemons, and
/// the messenger are code, not data, and are supplied by the embedding
/// binary when it assembles the final `Blueprint`.
pub struct LoadedWorld {
    pub game: GameDef,
    pub player: Player,
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
    pub author_verbs: Vec<(String, Vec<String>)>,
}

fn read_table<T: serde::de::DeserializeOwned>(dir: &Path, file_name: &str) -> Result<T> {
    let path = dir.join(file_name);
    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Loads `game.toml`, `items.toml`, `locations.toml`, `player.toml`, and
/// `verbs.toml` from `dir`.
pub fn load_dir(dir: &Path) -> Result<LoadedWorld> {
    let game: GameDef = read_table(dir, "game.toml")?;
    let items_file: items::ItemsFile = read_table(dir, "items.toml")?;
    let locations_file: locations::LocationsFile = read_table(dir, "locations.toml")?;
    let player_def: player::PlayerDef = read_table(dir, "player.toml")?;
    let verbs_file: verbs::VerbsFile = match fs::read_to_string(dir.join("verbs.toml")) {
        Ok(text) => toml::from_str(&text).with_context(|| format!("parsing {}", dir.join("verbs.toml").display()))?,
        Err(_) => verbs::VerbsFile::default(),
    };

    let mut symbols = SymbolTable::default();
    locations::declare_locations(&locations_file, &mut symbols);
    items::declare_items(&items_file, &mut symbols);

    let locations = locations::build_locations(&locations_file, &symbols)?;
    let items = items::build_items(&items_file, &symbols)?;
    let player = player::build_player(&player_def, &symbols)?;
    let author_verbs = verbs::author_verbs(&verbs_file);

    Ok(LoadedWorld { game, player, locations, items, author_verbs })
}
