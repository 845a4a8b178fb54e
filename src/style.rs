//! Terminal styling. A small `GameStyle` trait implemented for `&str` so
//! call sites read as `name.item_style()`; every method is a no-op pass
//! through when stdout is not a TTY.

use colored::{ColoredString, Colorize};
use std::io::IsTerminal;

pub trait GameStyle {
    fn location_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
}

fn tty() -> bool {
    std::io::stdout().is_terminal()
}

impl GameStyle for &str {
    fn location_style(&self) -> ColoredString {
        if tty() {
            self.bold().truecolor(223, 77, 10)
        } else {
            self.normal()
        }
    }

    fn item_style(&self) -> ColoredString {
        if tty() {
            self.truecolor(220, 180, 40)
        } else {
            self.normal()
        }
    }

    fn error_style(&self) -> ColoredString {
        if tty() {
            self.red()
        } else {
            self.normal()
        }
    }

    fn prompt_style(&self) -> ColoredString {
        if tty() {
            self.truecolor(120, 120, 120)
        } else {
            self.normal()
        }
    }
}
