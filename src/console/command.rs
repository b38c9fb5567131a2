use thiserror::Error;

use crate::navigation::PositionReport;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Submit(PositionReport),
    Log,
    Route,
    Reset,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("expected 4 values (lat lon speed course), got {0}")]
    Arity(usize),
    #[error("not a number: {0:?}")]
    Number(String),
    #[error("unknown command: {0:?} (try \"help\")")]
    Unknown(String),
}

/// Parses one input line.
///
/// A position is four numbers separated by whitespace and/or commas:
/// `31.9621 33.2487 8.86 112.5`.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleCommand::Empty);
    }

    match line.to_lowercase().as_str() {
        "log" | "ledger" => return Ok(ConsoleCommand::Log),
        "route" => return Ok(ConsoleCommand::Route),
        "reset" => return Ok(ConsoleCommand::Reset),
        "help" | "?" => return Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => return Ok(ConsoleCommand::Quit),
        _ => {}
    }

    let fields: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    let first_is_word = fields
        .first()
        .is_some_and(|f| f.starts_with(|c: char| c.is_alphabetic()));
    if first_is_word {
        return Err(CommandError::Unknown(fields[0].to_string()));
    }

    if fields.len() != 4 {
        return Err(CommandError::Arity(fields.len()));
    }

    let mut values = [0.0; 4];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field
            .parse()
            .map_err(|_| CommandError::Number(field.to_string()))?;
    }

    Ok(ConsoleCommand::Submit(PositionReport::new(
        values[0], values[1], values[2], values[3],
    )))
}
