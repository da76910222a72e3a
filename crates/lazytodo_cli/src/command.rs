//! Line command parsing for the interactive session.

use lazytodo_core::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field targeted by `edit <id> <field>=<value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Description,
    Deadline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <title> [| description [| deadline]]`
    Add {
        title: String,
        description: String,
        deadline: String,
    },
    Edit {
        id: TaskId,
        field: EditField,
        value: String,
    },
    Remove(TaskId),
    /// Replaces the selection; an empty list clears every completion.
    Done(Vec<TaskId>),
    Toggle(TaskId),
    List,
    Trash,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidId(String),
    InvalidField(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(name) => write!(f, "unknown command `{name}`; try `help`"),
            Self::MissingArgument(what) => write!(f, "missing argument: {what}"),
            Self::InvalidId(value) => write!(f, "invalid task id `{value}`"),
            Self::InvalidField(value) => write!(
                f,
                "invalid field `{value}`; expected title=|description=|deadline="
            ),
        }
    }
}

impl Error for ParseError {}

pub const HELP: &str = "\
commands:
  add <title> [| description [| YYYY-MM-DD]]
  edit <id> title=<text> | description=<text> | deadline=<YYYY-MM-DD>
  rm <id>
  done [<id>...]        set the completed selection
  toggle <id>
  ls | trash | json | help | quit";

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "" => Err(ParseError::Empty),
        "add" => Ok(parse_add(rest)),
        "edit" => parse_edit(rest),
        "rm" | "remove" => Ok(Command::Remove(parse_id(required(rest, "task id")?)?)),
        "done" => rest
            .split_whitespace()
            .map(parse_id)
            .collect::<Result<Vec<_>, _>>()
            .map(Command::Done),
        "toggle" => Ok(Command::Toggle(parse_id(required(rest, "task id")?)?)),
        "ls" | "list" => Ok(Command::List),
        "trash" => Ok(Command::Trash),
        "json" => Ok(Command::Json),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn required<'a>(value: &'a str, what: &'static str) -> Result<&'a str, ParseError> {
    if value.is_empty() {
        Err(ParseError::MissingArgument(what))
    } else {
        Ok(value)
    }
}

fn parse_id(value: &str) -> Result<TaskId, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidId(value.trim().to_string()))
}

fn parse_add(rest: &str) -> Command {
    let mut parts = rest.splitn(3, '|').map(str::trim);
    Command::Add {
        title: parts.next().unwrap_or_default().to_string(),
        description: parts.next().unwrap_or_default().to_string(),
        deadline: parts.next().unwrap_or_default().to_string(),
    }
}

fn parse_edit(rest: &str) -> Result<Command, ParseError> {
    let (id, assignment) = required(rest, "task id")?
        .split_once(char::is_whitespace)
        .ok_or(ParseError::MissingArgument("field=value"))?;
    let (field, value) = assignment
        .trim()
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidField(assignment.trim().to_string()))?;
    let field = match field.trim() {
        "title" => EditField::Title,
        "description" | "desc" => EditField::Description,
        "deadline" | "due" => EditField::Deadline,
        other => return Err(ParseError::InvalidField(other.to_string())),
    };
    Ok(Command::Edit {
        id: parse_id(id)?,
        field,
        value: value.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{parse, Command, EditField, ParseError};

    #[test]
    fn add_splits_optional_fields_on_pipes() {
        assert_eq!(
            parse("add Buy milk | 2 litres | 2026-10-15").unwrap(),
            Command::Add {
                title: "Buy milk".to_string(),
                description: "2 litres".to_string(),
                deadline: "2026-10-15".to_string(),
            }
        );
        assert_eq!(
            parse("add").unwrap(),
            Command::Add {
                title: String::new(),
                description: String::new(),
                deadline: String::new(),
            }
        );
        assert_eq!(
            parse("add solo").unwrap(),
            Command::Add {
                title: "solo".to_string(),
                description: String::new(),
                deadline: String::new(),
            }
        );
    }

    #[test]
    fn edit_parses_field_assignment() {
        assert_eq!(
            parse("edit 3 deadline=").unwrap(),
            Command::Edit {
                id: 3,
                field: EditField::Deadline,
                value: String::new(),
            }
        );
        assert_eq!(
            parse("edit 3 colour=red").unwrap_err(),
            ParseError::InvalidField("colour".to_string())
        );
    }

    #[test]
    fn done_accepts_zero_or_more_ids() {
        assert_eq!(parse("done").unwrap(), Command::Done(Vec::new()));
        assert_eq!(parse("done 1 4").unwrap(), Command::Done(vec![1, 4]));
        assert_eq!(
            parse("done 1 x").unwrap_err(),
            ParseError::InvalidId("x".to_string())
        );
    }

    #[test]
    fn unknown_and_empty_lines_are_errors() {
        assert_eq!(parse("   ").unwrap_err(), ParseError::Empty);
        assert!(matches!(
            parse("fly away"),
            Err(ParseError::UnknownCommand(name)) if name == "fly"
        ));
        assert_eq!(
            parse("rm").unwrap_err(),
            ParseError::MissingArgument("task id")
        );
    }
}
