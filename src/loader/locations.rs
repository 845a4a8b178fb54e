//! `locations.toml` loading: one `[[location]]` table per room, each with
//! zero or more nested `[[location.exit]]` tables.

use super::symbols::SymbolTable;
use crate::id::LocationId;
use crate::location::{Direction, Exit, Location};
use anyhow::{Context, Result};

#[derive(Debug, serde::Deserialize)]
pub struct LocationsFile {
    #[serde(default)]
    pub location: Vec<LocationDef>,
}

#[derive(Debug, serde::Deserialize)]
pub struct LocationDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub inherently_lit: bool,
    #[serde(default)]
    pub exit: Vec<ExitDef>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ExitDef {
    pub direction: String,
    pub destination: String,
    #[serde(default)]
    pub door: Option<String>,
    #[serde(default)]
    pub barred_message: Option<String>,
}

pub fn declare_locations(file: &LocationsFile, symbols: &mut SymbolTable) {
    for def in &file.location {
        symbols.declare_location(LocationId::new(&def.id));
    }
}

pub fn build_locations(file: &LocationsFile, symbols: &SymbolTable) -> Result<Vec<Location>> {
    file.location.iter().map(|def| location_from_def(def, symbols)).collect()
}

fn location_from_def(def: &LocationDef, symbols: &SymbolTable) -> Result<Location> {
    let mut location = Location::new(LocationId::new(&def.id), def.name.clone(), def.description.clone())
        .with_inherently_lit(def.inherently_lit);
    for exit_def in &def.exit {
        let direction = Direction::from_word(&exit_def.direction)
            .with_context(|| format!("location \"{}\" has an unrecognised exit direction \"{}\"", def.id, exit_def.direction))?;
        let destination = symbols
            .resolve_location(&exit_def.destination)
            .with_context(|| format!("location \"{}\" exit {}", def.id, exit_def.direction))?;
        let mut exit = Exit::new(destination);
        if let Some(door_token) = &exit_def.door {
            exit = exit.with_door(symbols.resolve_item(door_token).with_context(|| format!("location \"{}\" exit {} door", def.id, exit_def.direction))?);
        }
        exit.barred_message = exit_def.barred_message.clone();
        location = location.with_exit(direction, exit);
    }
    Ok(location)
}
