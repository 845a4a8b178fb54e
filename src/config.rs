//! Engine-behaviour toggles. Game-specific constants (title, release
//! string, maximum score) live on the `Blueprint`, not here -- this only
//! holds knobs that change how the engine behaves, never story data.

#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Whether a parse failure advances the turn counter / fires fuses and
    /// daemons. Default `false`.
    pub parse_errors_consume_turn: bool,
    /// Mirrors the CLI `--verbose` flag: save files retain the full
    /// change-history log instead of just its length, and the engine logs
    /// at `debug!` in addition to `info!`.
    pub verbose: bool,
    /// Whether walking into a closed-but-unlocked openable door auto-opens
    /// it, or refuses with a message. Default `true`.
    pub door_auto_open: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parse_errors_consume_turn: false,
            verbose: false,
            door_auto_open: true,
        }
    }
}
