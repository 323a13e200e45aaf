//! Project commands: new, open, run, list, delete.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use super::{print_error, print_hint, Prompt};
use crate::engine::{EngineStatus, Launcher};
use crate::registry::{validate_name, Project, ProjectRegistry};

/// Asking before launching more than this many runs.
const RUN_CONFIRM_THRESHOLD: i64 = 4;

pub fn create<L: Launcher>(
    registry: &ProjectRegistry<'_, L>,
    name: &str,
    prompt: Prompt,
) -> Result<ExitCode> {
    validate_name(name)?;
    let path = registry.root()?.join(name);
    registry.engine()?;

    let question = format!(
        "confirm {} of project \"{}\"?",
        "creation".cyan().bold(),
        path.display().to_string().bold()
    );
    if !prompt.confirm(&question)? {
        return Ok(ExitCode::FAILURE);
    }

    let created = registry.create(name)?;
    if created.status.success() {
        println!("created project {} at {}", name.bold(), created.project.display_path());
        Ok(ExitCode::SUCCESS)
    } else {
        print_error(format!(
            "engine failed to initialize project {} ({})",
            name, created.status
        ));
        eprintln!(
            "the directory {} was left in place; remove it with 'godot-cli delete {}'",
            created.project.display_path(),
            name
        );
        Ok(ExitCode::FAILURE)
    }
}

pub fn open<L: Launcher>(registry: &ProjectRegistry<'_, L>, name: &str) -> Result<ExitCode> {
    let project = registry.get(name)?;
    println!("opening project {}...", project.display_path().bold());

    let status = registry.open(name)?;
    Ok(engine_exit_code(status))
}

pub fn run<L: Launcher>(
    registry: &ProjectRegistry<'_, L>,
    name: &str,
    count: i64,
    prompt: Prompt,
) -> Result<ExitCode> {
    let project = registry.get(name)?;
    registry.engine()?;

    if count > RUN_CONFIRM_THRESHOLD
        && !prompt.confirm(&format!(
            "run {} instances of the project?",
            count.to_string().bold()
        ))?
    {
        return Ok(ExitCode::FAILURE);
    }

    if count > 0 {
        println!(
            "running project {} with {} instance(s)...",
            project.display_path().bold(),
            count
        );
    }
    let report = registry.run(name, count)?;

    if report.all_succeeded() {
        return Ok(ExitCode::SUCCESS);
    }

    print_error(format!("{} of {} run(s) failed:", report.failures(), report.runs()));
    for (i, status) in report.statuses.iter().enumerate() {
        if !status.success() {
            eprintln!("  run {}: {}", i + 1, status);
        }
    }
    Ok(ExitCode::FAILURE)
}

pub fn list<L: Launcher>(registry: &ProjectRegistry<'_, L>, long: bool, json: bool) -> Result<ExitCode> {
    let projects = registry.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else if long {
        print_table(&projects);
    } else {
        for project in &projects {
            println!("{}", project.name);
        }
    }

    Ok(ExitCode::SUCCESS)
}

pub fn delete<L: Launcher>(registry: &ProjectRegistry<'_, L>, name: &str, prompt: Prompt) -> Result<ExitCode> {
    let project = registry.get(name)?;
    let question = format!(
        "confirm {} of \"{}\"?",
        "deletion".red().bold(),
        project.display_path().bold()
    );
    if !prompt.confirm(&question)? {
        return Ok(ExitCode::FAILURE);
    }

    registry.delete(name)?;
    println!("deleted project {}", name.bold());
    Ok(ExitCode::SUCCESS)
}

/// The engine's own exit code, or 1 when it has none that fits.
fn engine_exit_code(status: EngineStatus) -> ExitCode {
    status
        .code
        .and_then(|code| u8::try_from(code).ok())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}

fn print_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        print_hint(format!("create one with {}", "godot-cli new <name>".bold()));
        return;
    }

    println!("{:<24} {:<8} {}", "NAME", "STATUS", "PATH");
    println!("{}", "-".repeat(80));
    for project in projects {
        let status = if project.is_initialized() { "ok" } else { "no-init" };
        println!(
            "{:<24} {:<8} {}",
            truncate_string(&project.name, 22),
            status,
            truncate_path(&project.display_path(), 46)
        );
    }
    println!("\nTotal: {} project(s)", projects.len());
}

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Truncate a path to a maximum length, keeping the end.
fn truncate_path(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    } else {
        chars[chars.len() - max_len..].iter().collect()
    }
}
