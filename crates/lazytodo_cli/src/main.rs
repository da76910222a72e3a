//! Terminal front-end for one in-memory todo session.
//!
//! # Responsibility
//! - Read line commands from stdin and dispatch them into `TodoService`.
//! - Print the table and trash views; state is dropped on exit.

mod command;

use chrono::Utc;
use clap::Parser;
use command::{Command, EditField, HELP};
use lazytodo_core::model::task::{non_blank, normalize_title, parse_deadline};
use lazytodo_core::{
    format_deadline, init_logging, Applied, IdPolicy, TaskForm, TaskPatch, TaskRequest,
    TodoConfig, TodoService,
};
use log::info;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lazytodo", version, about = "In-memory todo list session")]
struct Cli {
    /// Id assignment policy: monotonic | active-count.
    #[arg(long)]
    id_policy: Option<IdPolicy>,
    /// Log level: trace | debug | info | warn | error.
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off without it.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &cli.log_dir {
        init_logging(config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok id_policy={}",
        config.id_policy
    );

    let mut service = TodoService::new(&config);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run(&mut service, command, &mut out)?,
            Err(err) => writeln!(out, "error: {err}")?,
        }
        out.flush()?;
    }

    info!(
        "event=cli_exit module=cli status=ok active={} trash={}",
        service.active().len(),
        service.trash().len()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<TodoConfig, Box<dyn Error>> {
    let mut config = TodoConfig::from_env()?;
    if let Some(policy) = cli.id_policy {
        config.id_policy = policy;
    }
    if let Some(level) = &cli.log_level {
        config.set_log_level(level)?;
    }
    Ok(config)
}

fn run(service: &mut TodoService, command: Command, out: &mut impl Write) -> io::Result<()> {
    match command {
        Command::Add {
            title,
            description,
            deadline,
        } => {
            let mut form = TaskForm::create();
            let draft = form.draft_mut();
            draft.title = title;
            draft.description = description;
            draft.deadline = deadline;
            match service.submit_form(&form) {
                Ok(applied) => report(out, applied),
                Err(err) => writeln!(out, "error: {err}"),
            }
        }
        Command::Edit { id, field, value } => match edit_patch(field, &value) {
            Ok(patch) => report(out, service.dispatch(&TaskRequest::Edit { id, patch })),
            Err(message) => writeln!(out, "error: {message}"),
        },
        Command::Remove(id) => report(out, service.delete_row(id)),
        Command::Done(ids) => report(out, service.change_selection(ids)),
        Command::Toggle(id) => report(out, service.toggle(id)),
        Command::List => print_table(service, out),
        Command::Trash => print_trash(service, out),
        Command::Json => {
            let json = serde_json::to_string_pretty(service.store())
                .map_err(io::Error::other)?;
            writeln!(out, "{json}")
        }
        Command::Help => writeln!(out, "{HELP}"),
        Command::Quit => Ok(()),
    }
}

fn edit_patch(field: EditField, value: &str) -> Result<TaskPatch, String> {
    let patch = TaskPatch::default();
    match field {
        EditField::Title => normalize_title(value)
            .map(|title| patch.title(title))
            .map_err(|_| "Title is required".to_string()),
        EditField::Description => Ok(patch.description(non_blank(value))),
        EditField::Deadline => parse_deadline(value)
            .map(|deadline| patch.deadline(deadline))
            .map_err(|err| err.to_string()),
    }
}

fn report(out: &mut impl Write, applied: Applied) -> io::Result<()> {
    match applied {
        Applied::Added(id) => writeln!(out, "added #{id}"),
        Applied::Edited(id) => writeln!(out, "updated #{id}"),
        Applied::Removed(id) => writeln!(out, "moved #{id} to trash"),
        Applied::CompletionRecomputed { completed } => {
            writeln!(out, "{completed} task(s) completed")
        }
        Applied::Toggled { id, completed } => {
            let state = if completed { "completed" } else { "reopened" };
            writeln!(out, "#{id} {state}")
        }
        Applied::Ignored(id) => writeln!(out, "no active task #{id}"),
    }
}

fn print_table(service: &TodoService, out: &mut impl Write) -> io::Result<()> {
    let rows = service.table_rows(Utc::now());
    if rows.is_empty() {
        return writeln!(out, "(no tasks)");
    }
    writeln!(
        out,
        "{:>4}  {:<10} {:<10}  {:<24} DESCRIPTION",
        "ID", "STATUS", "DEADLINE", "TITLE"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:>4}  {:<10} {:<10}  {:<24} {}",
            row.id,
            row.status.label(),
            row.deadline.map(format_deadline).unwrap_or_default(),
            row.title,
            row.description.unwrap_or_default()
        )?;
    }
    Ok(())
}

fn print_trash(service: &TodoService, out: &mut impl Write) -> io::Result<()> {
    let entries = service.trash_entries();
    if entries.is_empty() {
        return writeln!(out, "(trash is empty)");
    }
    for entry in entries {
        writeln!(out, "{}", entry.summary())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{edit_patch, run, Command};
    use crate::command::EditField;
    use lazytodo_core::{TodoConfig, TodoService};

    fn run_lines(service: &mut TodoService, commands: Vec<Command>) -> String {
        let mut out = Vec::new();
        for command in commands {
            run(service, command, &mut out).expect("write to vec");
        }
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn session_adds_completes_and_trashes() {
        let mut service = TodoService::new(&TodoConfig::default());
        let output = run_lines(
            &mut service,
            vec![
                Command::Add {
                    title: "Buy milk".to_string(),
                    description: String::new(),
                    deadline: "2001-01-01".to_string(),
                },
                Command::Add {
                    title: "Walk dog".to_string(),
                    description: "park".to_string(),
                    deadline: String::new(),
                },
                Command::Done(vec![2]),
                Command::List,
                Command::Remove(1),
                Command::Trash,
            ],
        );

        assert!(output.contains("added #1"));
        assert!(output.contains("1 task(s) completed"));
        assert!(output.contains("Overdue"));
        assert!(output.contains("Completed"));
        assert!(output.contains("moved #1 to trash"));
        assert!(output.trim_end().ends_with("Buy milk 2001-01-01"));
    }

    #[test]
    fn add_without_title_reports_validation_error() {
        let mut service = TodoService::new(&TodoConfig::default());
        let output = run_lines(
            &mut service,
            vec![Command::Add {
                title: String::new(),
                description: String::new(),
                deadline: String::new(),
            }],
        );
        assert_eq!(output.trim(), "error: Title is required");
        assert!(service.active().is_empty());
    }

    #[test]
    fn edit_patch_validates_title_and_deadline() {
        assert!(edit_patch(EditField::Title, " ").is_err());
        assert!(edit_patch(EditField::Deadline, "tomorrow").is_err());
        let patch = edit_patch(EditField::Deadline, "").expect("blank clears");
        assert_eq!(patch.deadline, Some(None));
    }
}
