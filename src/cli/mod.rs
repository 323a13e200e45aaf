use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "godot-cli")]
#[command(author, version, about = "A convenience CLI for Godot projects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, global = true, env = "GODOT_CLI_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Never use colors
    #[arg(long, global = true, conflicts_with = "force_color")]
    pub no_color: bool,

    /// Use colors even when output is not a terminal
    #[arg(long, global = true)]
    pub force_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change configuration (location and entries when no action is given)
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },

    /// Create a new project
    #[command(visible_alias = "create")]
    New {
        /// Project name (directory name under project_dir)
        name: String,
    },

    /// Open a project in the editor
    Open {
        /// Project name
        name: String,
    },

    /// Run a project, optionally several times in a row
    Run {
        /// Project name
        name: String,

        /// Number of runs
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },

    /// List all projects
    List {
        /// Show initialization status and path
        #[arg(short, long, conflicts_with = "json")]
        long: bool,

        /// Print projects as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a project and everything in it
    #[command(visible_alias = "remove")]
    Delete {
        /// Project name
        name: String,
    },
}

/// Subcommands for the config store.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print a config entry (empty when unset)
    Get {
        /// godot_exec or project_dir
        entry: String,
    },

    /// Set a config entry
    Set {
        /// godot_exec or project_dir
        entry: String,

        /// New value; relative paths are made absolute
        value: String,
    },

    /// Clear a config entry
    #[command(visible_aliases = ["delete", "remove"])]
    Unset {
        /// godot_exec or project_dir
        entry: String,
    },

    /// Reset the entire config
    Clear,
}
