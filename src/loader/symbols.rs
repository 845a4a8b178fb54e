//! Tracks every id declared while reading the TOML tables so cross-file
//! references (an item's `parent`, a location exit's `door`, a lock's
//! `lock_key`) can be validated once all tables are in, instead of
//! requiring declaration order.

use crate::id::{ItemId, LocationId};
use anyhow::{bail, Result};
use std::collections::HashSet;

#[derive(Default)]
pub struct SymbolTable {
    items: HashSet<ItemId>,
    locations: HashSet<LocationId>,
}

impl SymbolTable {
    pub fn declare_item(&mut self, id: ItemId) {
        self.items.insert(id);
    }

    pub fn declare_location(&mut self, id: LocationId) {
        self.locations.insert(id);
    }

    pub fn resolve_item(&self, token: &str) -> Result<ItemId> {
        let id = ItemId::new(token);
        if self.items.contains(&id) {
            Ok(id)
        } else {
            bail!("unresolved item reference \"{token}\"")
        }
    }

    pub fn resolve_location(&self, token: &str) -> Result<LocationId> {
        let id = LocationId::new(token);
        if self.locations.contains(&id) {
            Ok(id)
        } else {
            bail!("unresolved location reference \"{token}\"")
        }
    }
}
