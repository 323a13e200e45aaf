//! `config` command: inspect and edit the config store.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::Colorize;

use super::{print_hint, print_warning, Prompt};
use crate::cli::ConfigCommand;
use crate::config::{ConfigKey, ConfigStore};
use crate::error::Error;

pub fn run(store: &mut ConfigStore, action: Option<ConfigCommand>, prompt: Prompt) -> Result<ExitCode> {
    match action {
        None => show(store),
        Some(ConfigCommand::Get { entry }) => get(store, &entry),
        Some(ConfigCommand::Set { entry, value }) => set(store, &entry, &value),
        Some(ConfigCommand::Unset { entry }) => unset(store, &entry),
        Some(ConfigCommand::Clear) => clear(store, prompt),
    }
}

/// Print the file location, every entry, and the available actions.
fn show(store: &ConfigStore) -> Result<ExitCode> {
    println!("{} {}\n", "location:".green().bold(), store.path().display());

    println!("  {}", "entries:".cyan().bold());
    for key in ConfigKey::ALL {
        let value = store.get(key)?;
        println!(
            "  {:<12} {:<40} {}",
            key.as_str().bold(),
            value.as_deref().unwrap_or("(unset)"),
            key.description()
        );
    }

    println!("\n  {}", "actions:".cyan().bold());
    println!("  get <entry>          print a config entry");
    println!("  set <entry> <value>  set a config entry");
    println!("  unset <entry>        clear a config entry");
    println!("  clear                clear the entire config\n");
    print_hint(format!(
        "use {} to change an entry",
        "godot-cli config set <entry> <value>".bold()
    ));

    Ok(ExitCode::SUCCESS)
}

fn get(store: &ConfigStore, entry: &str) -> Result<ExitCode> {
    let key: ConfigKey = entry.parse()?;
    println!("{}", store.get(key)?.unwrap_or_default());
    Ok(ExitCode::SUCCESS)
}

fn set(store: &mut ConfigStore, entry: &str, value: &str) -> Result<ExitCode> {
    let key: ConfigKey = entry.parse()?;
    let path = normalize_path(key, value)?;
    validate(key, &path)?;

    store
        .set(key, path.to_string_lossy())
        .with_context(|| format!("Failed to save config to {}", store.path().display()))?;
    println!("{} = {}", key, path.display());
    Ok(ExitCode::SUCCESS)
}

fn unset(store: &mut ConfigStore, entry: &str) -> Result<ExitCode> {
    let key: ConfigKey = entry.parse()?;
    store.unset(key)?;
    println!("cleared {}", key);
    Ok(ExitCode::SUCCESS)
}

fn clear(store: &mut ConfigStore, prompt: Prompt) -> Result<ExitCode> {
    if !prompt.confirm(&format!("confirm {} of config?", "deletion".red().bold()))? {
        return Ok(ExitCode::FAILURE);
    }
    store.clear()?;
    println!("config cleared");
    Ok(ExitCode::SUCCESS)
}

/// Turn a user-supplied value into an absolute path.
///
/// A bare executable name for `godot_exec` that does not exist relative to the
/// current directory is looked up on `PATH`.
fn normalize_path(key: ConfigKey, value: &str) -> Result<PathBuf, Error> {
    let invalid = |reason: String| Error::InvalidConfigValue { key, reason };

    if value.is_empty() {
        return Err(invalid("value is empty".to_string()));
    }

    let path = Path::new(value);
    if key == ConfigKey::GodotExec && path.components().count() == 1 && !path.exists() {
        if let Some(found) = find_on_path(value) {
            return Ok(found);
        }
    }

    std::path::absolute(path).map_err(|e| invalid(e.to_string()))
}

fn validate(key: ConfigKey, path: &Path) -> Result<(), Error> {
    let invalid = |reason: &str| {
        Err(Error::InvalidConfigValue {
            key,
            reason: format!("{} {}", path.display(), reason),
        })
    };

    match key {
        ConfigKey::GodotExec if !path.exists() => invalid("does not exist"),
        ConfigKey::GodotExec if path.is_dir() => invalid("is a directory"),
        ConfigKey::ProjectDir if path.exists() && !path.is_dir() => invalid("is not a directory"),
        ConfigKey::ProjectDir if !path.exists() => {
            print_warning(format!(
                "{} does not exist yet; create it before creating projects",
                path.display()
            ));
            Ok(())
        }
        _ => Ok(()),
    }
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let search = env::var_os("PATH")?;
    env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
