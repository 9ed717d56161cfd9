//! Line-oriented command grammar for the interactive shell.
//!
//! Keywords are case-insensitive; insert values follow shell-style
//! tokenization (quoted tokens may contain whitespace).

use nom::{
    character::complete::char,
    combinator::map,
    multi::many1,
    sequence::separated_pair,
    IResult,
};

use crate::core::DbError;

use super::clause::{parse_set, parse_where, Clause};
use super::common::{identifier, token, ws};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTable {
        table: String,
        columns: Vec<(String, String)>,
    },
    DropTable {
        table: String,
    },
    ListTables,
    Insert {
        table: String,
        values: Vec<String>,
    },
    Select {
        table: String,
        filter: Option<Clause>,
    },
    Update {
        table: String,
        set: Clause,
        filter: Option<Clause>,
    },
    /// A missing filter parses fine; the executor rejects it so the
    /// diagnostic matches the other operations'.
    Delete {
        table: String,
        filter: Option<Clause>,
    },
    Help,
    Exit,
}

const CREATE_USAGE: &str = "create_table <table> <column:type> [<column:type> ..]";
const DROP_USAGE: &str = "drop_table <table>";
const INSERT_USAGE: &str = "insert <table> <value> [<value> ..]";
const SELECT_USAGE: &str = "select <table> [where field=value]";
const UPDATE_USAGE: &str = "update <table> set field=value[, ..] [where field=value]";
const DELETE_USAGE: &str = "delete <table> where field=value";

pub fn parse_command(line: &str) -> Result<Command, DbError> {
    let line = line.trim();
    let keyword = line.split_whitespace().next().unwrap_or_default();
    let args = &line[keyword.len()..];

    match keyword.to_ascii_lowercase().as_str() {
        "create_table" => create_table(args),
        "drop_table" => drop_table(args),
        "list_tables" => Ok(Command::ListTables),
        "insert" => insert(args),
        "select" => select(args),
        "update" => update(args),
        "delete" => delete(args),
        "help" => Ok(Command::Help),
        "exit" | "quit" => Ok(Command::Exit),
        "" => Err(DbError::MalformedCommand("empty input".to_string())),
        other => Err(DbError::UnknownCommand(other.to_string())),
    }
}

fn usage(text: &str) -> DbError {
    DbError::MalformedCommand(format!("usage: {text}"))
}

fn ensure_consumed(rest: &str, usage_text: &str) -> Result<(), DbError> {
    if rest.trim().is_empty() {
        Ok(())
    } else {
        Err(usage(usage_text))
    }
}

/// `name:type` with the type name lowercased, as the catalog stores it.
fn column_def(input: &str) -> IResult<&str, (String, String)> {
    map(
        separated_pair(identifier, char(':'), identifier),
        |(name, type_name)| (name, type_name.to_ascii_lowercase()),
    )(input)
}

fn create_table(args: &str) -> Result<Command, DbError> {
    let (rest, table) = ws(identifier)(args).map_err(|_| usage(CREATE_USAGE))?;
    let (rest, columns) = many1(ws(column_def))(rest).map_err(|_| usage(CREATE_USAGE))?;
    ensure_consumed(rest, CREATE_USAGE)?;
    Ok(Command::CreateTable { table, columns })
}

fn drop_table(args: &str) -> Result<Command, DbError> {
    let (rest, table) = ws(identifier)(args).map_err(|_| usage(DROP_USAGE))?;
    ensure_consumed(rest, DROP_USAGE)?;
    Ok(Command::DropTable { table })
}

fn insert(args: &str) -> Result<Command, DbError> {
    let (rest, table) = ws(identifier)(args).map_err(|_| usage(INSERT_USAGE))?;
    let (rest, values) = many1(ws(token))(rest).map_err(|_| usage(INSERT_USAGE))?;
    ensure_consumed(rest, INSERT_USAGE)?;
    Ok(Command::Insert { table, values })
}

fn select(args: &str) -> Result<Command, DbError> {
    let (rest, table) = ws(identifier)(args).map_err(|_| usage(SELECT_USAGE))?;
    let filter = where_filter(rest, SELECT_USAGE)?;
    Ok(Command::Select { table, filter })
}

fn update(args: &str) -> Result<Command, DbError> {
    let (rest, table) = ws(identifier)(args).map_err(|_| usage(UPDATE_USAGE))?;
    let (rest, keyword) = ws(identifier)(rest).map_err(|_| usage(UPDATE_USAGE))?;
    if !keyword.eq_ignore_ascii_case("set") {
        return Err(usage(UPDATE_USAGE));
    }
    let (set_text, where_text) = split_at_where(rest);
    let set = parse_set(set_text)?;
    let filter = match where_text {
        Some(text) => Some(parse_where(text)?),
        None => None,
    };
    Ok(Command::Update { table, set, filter })
}

fn delete(args: &str) -> Result<Command, DbError> {
    let (rest, table) = ws(identifier)(args).map_err(|_| usage(DELETE_USAGE))?;
    let filter = where_filter(rest, DELETE_USAGE)?;
    Ok(Command::Delete { table, filter })
}

/// Parses an optional trailing `where field=value`; anything before the
/// keyword must be blank.
fn where_filter(rest: &str, usage_text: &str) -> Result<Option<Clause>, DbError> {
    let (before, after) = split_at_where(rest);
    if !before.trim().is_empty() {
        return Err(usage(usage_text));
    }
    match after {
        Some(text) => parse_where(text).map(Some),
        None => Ok(None),
    }
}

/// Splits at the first standalone, case-insensitive `where` token.
fn split_at_where(input: &str) -> (&str, Option<&str>) {
    let lower = input.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    for (pos, _) in lower.match_indices("where") {
        let end = pos + "where".len();
        let starts_word = pos == 0 || bytes[pos - 1].is_ascii_whitespace();
        let ends_word = end == bytes.len() || bytes[end].is_ascii_whitespace();
        if starts_word && ends_word {
            return (&input[..pos], Some(&input[end..]));
        }
    }
    (input, None)
}
