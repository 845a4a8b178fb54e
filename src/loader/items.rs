//! `items.toml` loading: one `[[item]]` table per item.

use super::symbols::SymbolTable;
use crate::attribute::{AttributeValue, Parent};
use crate::id::{AttributeId, ItemId};
use crate::item::Item;
use anyhow::{Context, Result};
use std::collections::HashMap;

#[derive(Debug, serde::Deserialize)]
pub struct ItemsFile {
    #[serde(default)]
    pub item: Vec<ItemDef>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
    pub parent: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub attributes: HashMap<String, toml::Value>,
    #[serde(default)]
    pub lock_key: Option<String>,
}

/// Parses a `parent` token: `"player"`, `"nowhere"`, `"location:<id>"`, or
/// `"item:<id>"`.
pub fn parse_parent(token: &str) -> Result<Parent> {
    Ok(match token {
        "player" => Parent::Player,
        "nowhere" => Parent::Nowhere,
        _ => match token.split_once(':') {
            Some(("location", id)) => Parent::Location(crate::id::LocationId::new(id)),
            Some(("item", id)) => Parent::Item(ItemId::new(id)),
            _ => anyhow::bail!("unrecognised parent token \"{token}\" (expected player, nowhere, location:<id>, or item:<id>)"),
        },
    })
}

fn toml_to_attribute(value: &toml::Value) -> Result<AttributeValue> {
    Ok(match value {
        toml::Value::Boolean(b) => AttributeValue::Bool(*b),
        toml::Value::Integer(n) => AttributeValue::Int(*n),
        toml::Value::String(s) => AttributeValue::String(s.clone()),
        toml::Value::Array(items) => {
            let strings: Result<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string).context("array attribute values must be strings"))
                .collect();
            AttributeValue::StringSet(strings?.into_iter().collect())
        },
        other => anyhow::bail!("unsupported attribute value {other:?}"),
    })
}

pub fn declare_items(file: &ItemsFile, symbols: &mut SymbolTable) {
    for def in &file.item {
        symbols.declare_item(ItemId::new(&def.id));
    }
}

pub fn build_items(file: &ItemsFile, symbols: &SymbolTable) -> Result<Vec<Item>> {
    file.item.iter().map(|def| item_from_def(def, symbols)).collect()
}

fn item_from_def(def: &ItemDef, symbols: &SymbolTable) -> Result<Item> {
    let id = ItemId::new(&def.id);
    let parent = parse_parent(&def.parent).with_context(|| format!("item \"{}\"", def.id))?;
    if let Some(parent_item) = parent.item_id() {
        symbols.resolve_item(&parent_item.to_string()).with_context(|| format!("item \"{}\" parent", def.id))?;
    }
    if let Some(parent_loc) = parent.location_id() {
        symbols.resolve_location(&parent_loc.to_string()).with_context(|| format!("item \"{}\" parent", def.id))?;
    }

    let mut item = Item::new(id, def.name.clone(), parent);
    for synonym in &def.synonyms {
        item = item.with_synonym(synonym.clone());
    }
    for adjective in &def.adjectives {
        item = item.with_adjective(adjective.clone());
    }
    for flag in &def.flags {
        item = item.with_flag(AttributeId::new(flag), true);
    }
    for (name, value) in &def.attributes {
        item = item.with_attribute(AttributeId::new(name), toml_to_attribute(value)?);
    }
    if let Some(key_token) = &def.lock_key {
        let key_id = symbols.resolve_item(key_token).with_context(|| format!("item \"{}\" lock_key", def.id))?;
        item = item.with_attribute(crate::attribute::well_known::lock_key(), AttributeValue::ItemIdSet(std::iter::once(key_id).collect()));
    }
    Ok(item)
}
