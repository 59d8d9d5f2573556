//! Interactive prompts for argument values the user left out.
//!
//! # Responsibility
//! - Ask on stdout, read one line from stdin, and keep asking until the
//!   answer parses.
//! - Fail instead of looping when stdin is closed, so piped invocations
//!   cannot hang.

use std::io::{self, Write};

use chrono::NaiveDateTime;
use lazytodo_core::TodoId;

use crate::utils::datetime::{format_datetime, parse_datetime};

/// Asks until the user enters a non-empty line.
pub fn required_line(label: &str) -> eyre::Result<String> {
    loop {
        let value = read_value(label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        eprintln!("{label} must not be empty");
    }
}

/// Asks until the user enters a valid todo id.
pub fn required_id(label: &str) -> eyre::Result<TodoId> {
    loop {
        let value = read_value(label)?;
        match value.parse::<TodoId>() {
            Ok(id) => return Ok(id),
            Err(_) => eprintln!("'{value}' is not a valid id; enter a number"),
        }
    }
}

/// Asks for a due date, proposing `default`. An empty answer accepts the
/// proposal; anything else must parse as one of the accepted formats.
pub fn datetime_with_default(label: &str, default: NaiveDateTime) -> eyre::Result<NaiveDateTime> {
    let label_with_default = format!("{label} [{}]", format_datetime(&default));
    loop {
        let value = read_value(&label_with_default)?;
        if value.is_empty() {
            return Ok(default);
        }
        match parse_datetime(&value) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => eprintln!("{err}"),
        }
    }
}

/// Prints `label: `, flushes so the text shows up before the read, and
/// returns the trimmed answer. Errors out when stdin reports end of input.
fn read_value(label: &str) -> eyre::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes_read = io::stdin().read_line(&mut input)?;
    if bytes_read == 0 {
        eyre::bail!("stdin closed while waiting for '{label}'");
    }

    Ok(input.trim().to_string())
}
