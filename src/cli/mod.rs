//! Interactive shell glue over the navigator. Holds no domain logic.

mod output;
mod render;
mod shell;

use colored::Colorize;
use thiserror::Error;

use crate::errors::MilkbookError;
use crate::speech::Announcer;

pub use shell::run_cli;

/// Error type for the interactive shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] MilkbookError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Speech sink that renders utterances as a styled terminal line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAnnouncer;

impl Announcer for TerminalAnnouncer {
    fn speak(&self, text: &str) {
        println!("{}", format!("voice: {text}").cyan().italic());
    }
}
