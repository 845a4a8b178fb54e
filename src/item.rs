//! Item data model.

use crate::attribute::{well_known as attr, AttributeValue, Parent};
use crate::id::{AttributeId, ItemId};
use std::collections::{HashMap, HashSet};

/// A takable, containable, or scenery object in the world. Items are
/// created at engine construction or by game code via a `StateChange`; they
/// are never destroyed, only moved to `Parent::Nowhere`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub synonyms: HashSet<String>,
    pub adjectives: HashSet<String>,
    pub parent: Parent,
    pub attributes: HashMap<AttributeId, AttributeValue>,
}

impl Item {
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, parent: Parent) -> Self {
        Self {
            id,
            name: name.into(),
            synonyms: HashSet::new(),
            adjectives: HashSet::new(),
            parent,
            attributes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_flag(mut self, flag: AttributeId, value: bool) -> Self {
        self.attributes.insert(flag, AttributeValue::Bool(value));
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeId, value: AttributeValue) -> Self {
        self.attributes.insert(attribute, value);
        self
    }

    #[must_use]
    pub fn with_synonym(mut self, word: impl Into<String>) -> Self {
        self.synonyms.insert(word.into());
        self
    }

    #[must_use]
    pub fn with_adjective(mut self, word: impl Into<String>) -> Self {
        self.adjectives.insert(word.into());
        self
    }

    #[must_use]
    pub fn flag(&self, attribute: AttributeId) -> bool {
        self.attributes
            .get(&attribute)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn int(&self, attribute: AttributeId) -> Option<i64> {
        self.attributes.get(&attribute).and_then(AttributeValue::as_int)
    }

    #[must_use]
    pub fn text(&self, attribute: AttributeId) -> Option<&str> {
        self.attributes.get(&attribute).and_then(AttributeValue::as_str)
    }

    #[must_use]
    pub fn is_takable(&self) -> bool {
        self.flag(attr::is_takable()) && !self.flag(attr::is_fixed())
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.flag(attr::is_container())
    }

    #[must_use]
    pub fn is_surface(&self) -> bool {
        self.flag(attr::is_surface())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.flag(attr::is_open())
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.flag(attr::is_transparent())
    }

    /// Whether another item's contents are reachable through this one:
    /// true for any surface, or a container that is open.
    #[must_use]
    pub fn lets_contents_through(&self) -> bool {
        self.is_surface() || (self.is_container() && self.is_open())
    }

    /// Whether this item's contents are *visible* (but not necessarily
    /// reachable): adds peeking through a transparent, closed container.
    #[must_use]
    pub fn lets_contents_be_seen(&self) -> bool {
        self.lets_contents_through() || (self.is_container() && self.is_transparent())
    }

    #[must_use]
    pub fn size(&self) -> i64 {
        self.int(attr::size()).unwrap_or(0)
    }

    #[must_use]
    pub fn capacity(&self) -> Option<i64> {
        self.int(attr::capacity())
    }

    #[must_use]
    pub fn lock_key(&self) -> Option<ItemId> {
        self.attributes
            .get(&attr::lock_key())
            .and_then(AttributeValue::as_item_id_set)
            .and_then(|set| set.iter().next().copied())
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.text(attr::description()).unwrap_or("You see nothing special.")
    }
}
