//! I/O abstraction the Turn Engine reads from and writes to. The engine
//! never touches stdin/stdout directly, so a script replay or an in-memory
//! test harness goes through the exact same path a terminal session does.

use log::warn;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// Outcome of a read: either a line of input, or end-of-input (Ctrl-D, EOF
/// on a script file, or a cancelled suspension).
pub enum ReadOutcome {
    Line(String),
    EndOfInput,
}

pub trait IoHandler {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome;
    fn write(&mut self, text: &str);
    fn flush(&mut self);
}

/// Interactive terminal backed by `rustyline`, with history but no
/// game-specific completion -- the vocabulary is data, not known up front.
pub struct TerminalIo {
    editor: DefaultEditor,
}

impl TerminalIo {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl IoHandler for TerminalIo {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                ReadOutcome::Line(line)
            },
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => ReadOutcome::EndOfInput,
            Err(err) => {
                warn!("io: readline failed, treating as end of input: {err}");
                ReadOutcome::EndOfInput
            },
        }
    }

    fn write(&mut self, text: &str) {
        println!("{text}");
    }

    fn flush(&mut self) {
        let _ = std::io::stdout().flush();
    }
}

/// Feeds pre-recorded lines (a `--script` replay) and captures everything
/// written, for tests and for `--transcript` support.
#[derive(Default)]
pub struct InMemoryIo {
    pending: std::collections::VecDeque<String>,
    pub written: Vec<String>,
}

impl InMemoryIo {
    #[must_use]
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            pending: lines.into_iter().map(Into::into).collect(),
            written: Vec::new(),
        }
    }
}

impl IoHandler for InMemoryIo {
    fn read_line(&mut self, _prompt: &str) -> ReadOutcome {
        match self.pending.pop_front() {
            Some(line) => ReadOutcome::Line(line),
            None => ReadOutcome::EndOfInput,
        }
    }

    fn write(&mut self, text: &str) {
        self.written.push(text.to_string());
    }

    fn flush(&mut self) {}
}

/// Tees everything written to an inner handler through to a file, for
/// `--transcript <path>`. Reads pass through unchanged.
pub struct TeeIo<H: IoHandler> {
    inner: H,
    file: std::fs::File,
}

impl<H: IoHandler> TeeIo<H> {
    pub fn new(inner: H, path: &std::path::Path) -> std::io::Result<Self> {
        Ok(Self { inner, file: std::fs::File::create(path)? })
    }
}

impl<H: IoHandler> IoHandler for TeeIo<H> {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        self.inner.read_line(prompt)
    }

    fn write(&mut self, text: &str) {
        if let Err(err) = writeln!(self.file, "{text}") {
            warn!("io: failed writing transcript: {err}");
        }
        self.inner.write(text);
    }

    fn flush(&mut self) {
        let _ = self.file.flush();
        self.inner.flush();
    }
}
