//! `player.toml` loading: the single starting-player table.

use super::symbols::SymbolTable;
use crate::player::Player;
use anyhow::{Context, Result};

#[derive(Debug, serde::Deserialize)]
pub struct PlayerDef {
    pub start_location: String,
    #[serde(default)]
    pub carrying_capacity: Option<i64>,
}

pub fn build_player(def: &PlayerDef, symbols: &SymbolTable) -> Result<Player> {
    let start = symbols.resolve_location(&def.start_location).context("player start_location")?;
    let mut player = Player::new(start);
    if let Some(capacity) = def.carrying_capacity {
        player = player.with_carrying_capacity(capacity);
    }
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::LocationId;

    #[test]
    fn resolves_start_location() {
        let def: PlayerDef = toml::from_str(r#"start_location = "startRoom""#).unwrap();
        let mut symbols = SymbolTable::default();
        symbols.declare_location(LocationId::new("startRoom"));
        let player = build_player(&def, &symbols).unwrap();
        assert_eq!(player.current_location, LocationId::new("startRoom"));
    }

    #[test]
    fn unresolved_start_location_is_an_error() {
        let def: PlayerDef = toml::from_str(r#"start_location = "ghostRoom""#).unwrap();
        let symbols = SymbolTable::default();
        assert!(build_player(&def, &symbols).is_err());
    }
}
