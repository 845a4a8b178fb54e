#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

use anyhow::{Context, Result};
use colored::Colorize;
use env_logger::Env;
use grue_engine::blueprint::Blueprint;
use grue_engine::config::EngineConfig;
use grue_engine::dispatch::HookTable;
use grue_engine::io::{InMemoryIo, IoHandler, TeeIo, TerminalIo};
use grue_engine::loader;
use grue_engine::messenger::Messenger;
use grue_engine::scheduler::DaemonTable;
use grue_engine::style::GameStyle;
use grue_engine::turn::TurnEngine;
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use textwrap::{fill, termwidth};

struct Args {
    game_dir: PathBuf,
    no_banner: bool,
    verbose: bool,
    script: Option<PathBuf>,
    transcript: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut game_dir = None;
    let mut no_banner = false;
    let mut verbose = false;
    let mut script = None;
    let mut transcript = None;

    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--no-banner" => no_banner = true,
            "--verbose" => verbose = true,
            "--script" => script = Some(PathBuf::from(raw.next().ok_or("--script requires a path")?)),
            "--transcript" => transcript = Some(PathBuf::from(raw.next().ok_or("--transcript requires a path")?)),
            other if !other.starts_with('-') => game_dir = Some(PathBuf::from(other)),
            other => return Err(format!("unrecognised flag \"{other}\"")),
        }
    }

    Ok(Args {
        game_dir: game_dir.ok_or("usage: grue <game-dir> [--no-banner] [--verbose] [--script <path>] [--transcript <path>]")?,
        no_banner,
        verbose,
        script,
        transcript,
    })
}

fn print_banner(title: &str, introduction: &str) {
    println!("{:^width$}", title.bold().underline(), width = termwidth());
    println!("{}", fill(introduction, termwidth()));
}

fn build_engine(game_dir: &Path, config: EngineConfig, no_banner: bool) -> Result<TurnEngine> {
    let loaded = loader::load_dir(game_dir).with_context(|| format!("loading game data from {}", game_dir.display()))?;

    if !no_banner {
        print_banner(&loaded.game.title, &loaded.game.introduction);
    }

    let blueprint = Blueprint {
        title: loaded.game.title,
        abbreviated_title: loaded.game.abbreviated_title,
        introduction: loaded.game.introduction,
        release: loaded.game.release,
        max_score: loaded.game.max_score,
        player: loaded.player,
        locations: loaded.locations,
        items: loaded.items,
        author_verbs: loaded.author_verbs,
        hooks: HookTable::default(),
        daemons: DaemonTable::default(),
        messenger: Messenger::new(0),
        rng_seed: 0,
    };
    let (world, hooks, daemons, messenger, author_verbs) = blueprint.into_world();
    Ok(TurnEngine::new(world, hooks, daemons, messenger, config, &author_verbs))
}

fn run() -> Result<ExitCode> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).format_timestamp(None).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message.as_str().error_style());
            return Ok(ExitCode::from(2));
        },
    };

    let config = EngineConfig { verbose: args.verbose, ..EngineConfig::default() };
    info!("starting engine against {}", args.game_dir.display());
    let mut engine = match build_engine(&args.game_dir, config, args.no_banner) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{}", format!("{err:#}").as_str().error_style());
            return Ok(ExitCode::from(3));
        },
    };

    let mut io: Box<dyn IoHandler> = if let Some(script_path) = &args.script {
        let text = std::fs::read_to_string(script_path).with_context(|| format!("reading script {}", script_path.display()))?;
        Box::new(InMemoryIo::new(text.lines().map(str::to_string)))
    } else {
        Box::new(TerminalIo::new().context("initialising terminal input")?)
    };

    if let Some(transcript_path) = &args.transcript {
        let mut tee = TeeIo::new(ScriptOrTerminal(io), transcript_path).context("opening transcript file")?;
        engine.run_loop(&mut tee);
    } else {
        engine.run_loop(io.as_mut());
    }

    Ok(ExitCode::SUCCESS)
}

/// `TeeIo<H>` needs a concrete `H`; `io` above is a trait object, so this
/// thin wrapper lets it stand in for one without a second enum.
struct ScriptOrTerminal(Box<dyn IoHandler>);

impl IoHandler for ScriptOrTerminal {
    fn read_line(&mut self, prompt: &str) -> grue_engine::io::ReadOutcome {
        self.0.read_line(prompt)
    }

    fn write(&mut self, text: &str) {
        self.0.write(text);
    }

    fn flush(&mut self) {
        self.0.flush();
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", format!("{err:#}").as_str().error_style());
            ExitCode::from(3)
        },
    }
}
