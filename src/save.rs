//! Save-game persistence: a versioned `ron` encoding of the `World`, plus
//! slot discovery under a save directory.

use crate::world::World;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAVE_DIR: &str = "saved_games";

/// Bumped whenever `World`'s shape changes in a way that could break
/// loading an older save. Readers accept any `schema_version <=` this one;
/// unknown attribute keys found in an older save are preserved verbatim
/// since `World`'s attribute maps are just `HashMap<AttributeId, _>`.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct SavedWorld {
    schema_version: u32,
    world: World,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub name: String,
    pub path: PathBuf,
}

/// Lists the `.ron` save files in `dir`, oldest enumeration order from the
/// filesystem, sorted by file name for determinism.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            let name = path.file_stem().map_or_else(|| "save".to_string(), |s| s.to_string_lossy().into_owned());
            slots.push(SaveSlot { name, path });
        }
    }
    slots.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(slots)
}

pub fn save_world(world: &World, path: &Path) -> Result<()> {
    let saved = SavedWorld { schema_version: SCHEMA_VERSION, world: world.clone() };
    let encoded = ron::ser::to_string_pretty(&saved, ron::ser::PrettyConfig::default())
        .context("encoding world to ron")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, encoded).with_context(|| format!("writing save file {}", path.display()))
}

/// Returns the error's message describes a version mismatch (newer schema
/// than this build understands) rather than a parse failure, so callers can
/// distinguish "corrupted save" from "save from a future release".
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("save file {path} is from a newer schema version ({found}); this build understands up to {supported}")]
    VersionTooNew { path: String, found: u32, supported: u32 },
    #[error("could not read or parse save file {path}: {source}")]
    Unreadable { path: String, source: anyhow::Error },
}

pub fn load_world(path: &Path) -> Result<World, LoadError> {
    let raw = fs::read_to_string(path).map_err(|err| LoadError::Unreadable {
        path: path.display().to_string(),
        source: err.into(),
    })?;
    let saved: SavedWorld = ron::from_str(&raw).map_err(|err| LoadError::Unreadable {
        path: path.display().to_string(),
        source: err.into(),
    })?;
    if saved.schema_version > SCHEMA_VERSION {
        return Err(LoadError::VersionTooNew {
            path: path.display().to_string(),
            found: saved.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(saved.world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Parent;
    use crate::id::LocationId;
    use crate::item::Item;
    use crate::location::Location;
    use crate::player::Player;

    fn sample_world() -> World {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start Room", "desc").with_inherently_lit(true));
        world.insert_item(Item::new(crate::id::ItemId::new("coin"), "gold coin", Parent::Location(start)));
        world
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot1.ron");
        let world = sample_world();
        save_world(&world, &path).unwrap();
        let loaded = load_world(&path).unwrap();
        assert_eq!(loaded.player().current_location, world.player().current_location);
        assert!(loaded.item(crate::id::ItemId::new("coin")).is_some());
    }

    #[test]
    fn rejects_a_save_from_a_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot1.ron");
        let saved = SavedWorld { schema_version: SCHEMA_VERSION + 1, world: sample_world() };
        let encoded = ron::ser::to_string(&saved).unwrap();
        fs::write(&path, encoded).unwrap();
        let err = load_world(&path).unwrap_err();
        assert!(matches!(err, LoadError::VersionTooNew { .. }));
    }

    #[test]
    fn collect_save_slots_finds_ron_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        save_world(&sample_world(), &dir.path().join("b.ron")).unwrap();
        save_world(&sample_world(), &dir.path().join("a.ron")).unwrap();
        let slots = collect_save_slots(dir.path()).unwrap();
        assert_eq!(slots.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
