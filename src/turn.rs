//! Turn Engine: orchestrates one full turn from raw input text to
//! accumulated output text, and drives the read-eval-print loop.

use crate::action::{default_handlers, run as run_action, ActionContext, ActionHandler, ActionResponse};
use crate::config::EngineConfig;
use crate::dispatch::EventDispatcher;
use crate::id::VerbId;
use crate::io::{IoHandler, ReadOutcome};
use crate::messenger::Messenger;
use crate::parser::parse;
use crate::save::{self, SAVE_DIR};
use crate::scheduler::{self, DaemonTable};
use crate::world::World;
use crate::dispatch::HookTable;
use crate::vocabulary::Vocabulary;
use log::{error, info};
use std::collections::HashMap;
use std::path::Path;

pub struct TurnEngine {
    world: World,
    vocabulary: Vocabulary,
    author_verbs: Vec<(String, Vec<String>)>,
    handlers: HashMap<VerbId, Box<dyn ActionHandler>>,
    hooks: HookTable,
    daemons: DaemonTable,
    messenger: Messenger,
    config: EngineConfig,
}

impl TurnEngine {
    #[must_use]
    pub fn new(
        world: World,
        hooks: HookTable,
        daemons: DaemonTable,
        messenger: Messenger,
        config: EngineConfig,
        author_verbs: &[(String, Vec<String>)],
    ) -> Self {
        let vocabulary = Vocabulary::build(&world, author_verbs);
        Self {
            world,
            vocabulary,
            author_verbs: author_verbs.to_vec(),
            handlers: default_handlers(),
            hooks,
            daemons,
            messenger,
            config,
        }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn messenger_mut(&mut self) -> &mut Messenger {
        &mut self.messenger
    }

    /// Runs exactly one turn and returns its accumulated output text.
    /// Implements the six steps: pre-turn inspection, parse, before/action/
    /// after hooks, atomic commit, fuse/daemon advance, text emission.
    ///
    /// `save`/`restore`/`saves` are handled here, outside the parse/dispatch
    /// pipeline: they act on the whole `World`, not a `StateChange` batch,
    /// and like a parse failure they don't consume a turn or fire hooks.
    pub fn execute(&mut self, raw_input: &str) -> String {
        if let Some(response) = self.handle_system_command(raw_input) {
            return response;
        }

        let command = match parse(raw_input, &self.vocabulary, &self.world) {
            Ok(command) => command,
            Err(err) => {
                if self.config.parse_errors_consume_turn {
                    self.world.advance_turn_count();
                }
                return err.to_string();
            },
        };

        let dispatcher = EventDispatcher::new(&self.hooks);
        let before = dispatcher.before(&self.world, &command);

        let (mut changes, message) = if let Some(result) = before {
            (result.changes, result.message)
        } else {
            match self.run_handler(&command) {
                Ok(result) => (result.changes, result.message),
                Err(response) => {
                    if self.config.verbose {
                        info!("turn: action failed: {response}");
                    }
                    (Vec::new(), response.to_string())
                },
            }
        };

        // After-hooks see the state the turn is about to commit to, not the
        // pre-turn snapshot: fold the changes so far into a scratch preview.
        let preview = self.world.preview(&changes);
        let after = dispatcher.after(&preview, &command);
        changes.extend(after.changes);
        let mut paragraphs = vec![message];
        if !after.message.is_empty() {
            paragraphs.push(after.message);
        }

        if let Err(err) = self.world.apply(changes) {
            error!("turn: commit failed, discarding turn: {err}");
            return "Something went wrong.".to_string();
        }

        self.world.advance_turn_count();
        match scheduler::advance(&mut self.world, &self.daemons) {
            Ok(fired) => paragraphs.extend(fired),
            Err(err) => error!("turn: scheduler advance failed: {err}"),
        }

        paragraphs.join("\n\n")
    }

    /// Recognises the `save`/`restore`/`saves` keywords and handles them
    /// directly against `self.world`, returning `None` for anything else so
    /// `execute` falls through to the ordinary parse/dispatch pipeline.
    fn handle_system_command(&mut self, raw_input: &str) -> Option<String> {
        let trimmed = raw_input.trim();
        let (keyword, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();
        match keyword.to_ascii_lowercase().as_str() {
            "save" => Some(self.save_to_slot(if rest.is_empty() { "autosave" } else { rest })),
            "restore" => Some(if rest.is_empty() {
                "Restore which save?".to_string()
            } else {
                self.restore_from_slot(rest)
            }),
            "saves" => Some(self.list_saves()),
            _ => None,
        }
    }

    fn save_to_slot(&self, name: &str) -> String {
        let path = Path::new(SAVE_DIR).join(format!("{name}.ron"));
        match save::save_world(&self.world, &path) {
            Ok(()) => format!("Saved as \"{name}\"."),
            Err(err) => {
                error!("turn: save failed: {err:#}");
                format!("Couldn't save: {err}.")
            },
        }
    }

    fn restore_from_slot(&mut self, name: &str) -> String {
        let path = Path::new(SAVE_DIR).join(format!("{name}.ron"));
        match save::load_world(&path) {
            Ok(world) => {
                self.world = world;
                self.vocabulary = Vocabulary::build(&self.world, &self.author_verbs);
                format!("Restored \"{name}\".")
            },
            Err(err) => {
                error!("turn: restore failed: {err:#}");
                format!("Couldn't restore \"{name}\": {err}.")
            },
        }
    }

    fn list_saves(&self) -> String {
        match save::collect_save_slots(Path::new(SAVE_DIR)) {
            Ok(slots) if slots.is_empty() => "No saved games.".to_string(),
            Ok(slots) => {
                let names: Vec<_> = slots.iter().map(|slot| slot.name.as_str()).collect();
                format!("Saved games: {}.", names.join(", "))
            },
            Err(err) => {
                error!("turn: listing saves failed: {err:#}");
                "Couldn't list saved games.".to_string()
            },
        }
    }

    fn run_handler(&self, command: &crate::parser::Command) -> Result<crate::action::ActionResult, ActionResponse> {
        let handler = self
            .handlers
            .get(&command.verb)
            .ok_or_else(|| ActionResponse::Custom("You can't do that.".to_string()))?;
        let ctx = ActionContext {
            command,
            world: &self.world,
            config: &self.config,
        };
        run_action(handler.as_ref(), &ctx)
    }

    /// Drives the REPL: reads a line, executes a turn, writes the output,
    /// until the I/O handler reports end of input.
    pub fn run_loop(&mut self, io: &mut dyn IoHandler) {
        loop {
            match io.read_line("> ") {
                ReadOutcome::Line(line) => {
                    let output = self.execute(&line);
                    io.write(&output);
                    io.flush();
                },
                ReadOutcome::EndOfInput => break,
            }
        }
    }
}
