//! Global state and pronoun tracking.

use crate::attribute::AttributeValue;
use crate::id::{GlobalId, ItemId, Pronoun};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct GlobalState {
    values: HashMap<GlobalId, AttributeValue>,
    flags: HashSet<String>,
}

impl GlobalState {
    #[must_use]
    pub fn get(&self, id: GlobalId) -> Option<&AttributeValue> {
        self.values.get(&id)
    }

    pub fn set(&mut self, id: GlobalId, value: AttributeValue) {
        self.values.insert(id, value);
    }

    pub fn clear(&mut self, id: GlobalId) {
        self.values.remove(&id);
    }

    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn set_flag(&mut self, name: impl Into<String>) {
        self.flags.insert(name.into());
    }

    pub fn clear_flag(&mut self, name: &str) {
        self.flags.remove(name);
    }

    #[must_use]
    pub fn is_verbose_mode(&self) -> bool {
        self.flag("isVerboseMode")
    }
}

/// Maps each pronoun word to the last salient set of items it referred to.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Pronouns {
    targets: HashMap<Pronoun, HashSet<ItemId>>,
}

impl Pronouns {
    #[must_use]
    pub fn get(&self, pronoun: Pronoun) -> Option<&HashSet<ItemId>> {
        self.targets.get(&pronoun)
    }

    pub fn set(&mut self, pronoun: Pronoun, targets: HashSet<ItemId>) {
        self.targets.insert(pronoun, targets);
    }
}
