//! Command handlers. Each returns the process exit code on success; errors
//! are reported by `main`.

pub mod config;
pub mod projects;

use anyhow::Result;
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use crate::cli::Commands;
use crate::config::ConfigStore;
use crate::engine::ProcessLauncher;
use crate::registry::ProjectRegistry;

/// Route a parsed command to its handler.
pub fn dispatch(command: Commands, store: &mut ConfigStore, prompt: Prompt) -> Result<ExitCode> {
    match command {
        Commands::Config { action } => config::run(store, action, prompt),
        Commands::New { name } => {
            projects::create(&ProjectRegistry::new(store, ProcessLauncher), &name, prompt)
        }
        Commands::Open { name } => projects::open(&ProjectRegistry::new(store, ProcessLauncher), &name),
        Commands::Run { name, count } => {
            projects::run(&ProjectRegistry::new(store, ProcessLauncher), &name, count, prompt)
        }
        Commands::List { long, json } => {
            projects::list(&ProjectRegistry::new(store, ProcessLauncher), long, json)
        }
        Commands::Delete { name } => {
            projects::delete(&ProjectRegistry::new(store, ProcessLauncher), &name, prompt)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptMode {
    Ask,
    AssumeYes,
    AssumeNo,
}

/// Yes/no confirmation before destructive or expensive actions.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    mode: PromptMode,
}

impl Prompt {
    /// Ask on the terminal, unless `assume_yes` is set or stdin is not a
    /// terminal, in which case every question is accepted.
    pub fn new(assume_yes: bool) -> Self {
        let mode = if assume_yes || !io::stdin().is_terminal() {
            PromptMode::AssumeYes
        } else {
            PromptMode::Ask
        };
        Self { mode }
    }

    pub fn assume_yes() -> Self {
        Self {
            mode: PromptMode::AssumeYes,
        }
    }

    /// Decline every question.
    pub fn assume_no() -> Self {
        Self {
            mode: PromptMode::AssumeNo,
        }
    }

    pub fn confirm(&self, question: &str) -> Result<bool> {
        let accepted = match self.mode {
            PromptMode::AssumeYes => return Ok(true),
            PromptMode::AssumeNo => false,
            PromptMode::Ask => {
                print!("{} {} ", question, "(y/n)".bright_black());
                io::stdout().flush()?;

                let mut answer = String::new();
                io::stdin().lock().read_line(&mut answer)?;
                is_yes(&answer)
            }
        };
        if !accepted {
            print_error("canceled");
        }
        Ok(accepted)
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// `error: <msg>` on stderr.
pub fn print_error(msg: impl Display) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// `warn: <msg>` on stderr.
pub fn print_warning(msg: impl Display) {
    eprintln!("{} {}", "warn:".yellow().bold(), msg);
}

/// `hint: <msg>` on stdout.
pub fn print_hint(msg: impl Display) {
    println!("{} {}", "hint:".cyan().bold(), msg);
}
