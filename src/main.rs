use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use godot_cli::cli::Cli;
use godot_cli::commands::{print_error, print_warning, Prompt};
use godot_cli::config::ConfigStore;
use godot_cli::logging::init_logging;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported as errors by clap but succeed
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    if cli.no_color {
        colored::control::set_override(false);
    } else if cli.force_color {
        colored::control::set_override(true);
    } else if !io::stdout().is_terminal() || !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    let mut store = match cli.config {
        Some(path) => ConfigStore::at(path),
        None => match ConfigStore::open_default() {
            Ok(store) => store,
            Err(e) => {
                print_error(e);
                return ExitCode::FAILURE;
            }
        },
    };

    // The guard must live until exit so buffered log lines are flushed
    let _logging_guard = match init_logging(&store.logging()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            print_warning(format!("logging disabled: {:#}", e));
            None
        }
    };

    tracing::debug!("Using config file {:?}", store.path());

    match godot_cli::commands::dispatch(cli.command, &mut store, Prompt::new(cli.yes)) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            print_error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
