// src/console/prompt.rs
//
// Line input helpers. Every helper returns `None` at end of input.

use std::io::{BufRead, Write};
use std::str::FromStr;

use super::Console;
use crate::error::AppResult;

impl<R: BufRead, W: Write> Console<R, W> {
    /// Print `label: ` and read one trimmed line
    pub(super) fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a positive id. An invalid entry is reported and yields `None`.
    pub(super) fn prompt_id(&mut self, label: &str) -> AppResult<Option<i64>> {
        let Some(value) = self.prompt(label)? else {
            return Ok(None);
        };
        match value.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Some(id)),
            _ => {
                writeln!(self.output, "'{}' is not a valid id.", value)?;
                Ok(None)
            }
        }
    }

    /// Read and parse a value. A bad value is reported and yields `None`.
    pub(super) fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> AppResult<Option<T>> {
        let Some(value) = self.prompt(label)? else {
            return Ok(None);
        };
        match value.parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => {
                writeln!(self.output, "'{}' is not a valid value.", value)?;
                Ok(None)
            }
        }
    }

    /// Read a value that may be left empty
    pub(super) fn prompt_optional(&mut self, label: &str) -> AppResult<Option<Option<String>>> {
        Ok(self
            .prompt(label)?
            .map(|value| if value.is_empty() { None } else { Some(value) }))
    }

    /// Edit a text field: an empty line keeps `current`
    pub(super) fn prompt_keep(&mut self, label: &str, current: &str) -> AppResult<Option<String>> {
        let Some(value) = self.prompt(&format!("{} [{}]", label, current))? else {
            return Ok(None);
        };
        if value.is_empty() {
            Ok(Some(current.to_string()))
        } else {
            Ok(Some(value))
        }
    }

    /// Edit a parsed field: an empty line keeps `current`, a bad value is
    /// reported and yields `None`
    pub(super) fn prompt_keep_parsed<T>(&mut self, label: &str, current: T) -> AppResult<Option<T>>
    where
        T: FromStr + std::fmt::Display,
    {
        let Some(value) = self.prompt(&format!("{} [{}]", label, current))? else {
            return Ok(None);
        };
        if value.is_empty() {
            return Ok(Some(current));
        }
        match value.parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => {
                writeln!(self.output, "'{}' is not a valid value.", value)?;
                Ok(None)
            }
        }
    }

    /// `y`/`yes` confirms, anything else (including end of input) declines
    pub(super) fn confirm(&mut self, question: &str) -> AppResult<bool> {
        let answer = self.prompt(&format!("{} (y/n)", question))?;
        Ok(matches!(
            answer.map(|a| a.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        ))
    }
}
