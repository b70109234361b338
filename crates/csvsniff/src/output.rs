use std::borrow::Cow;
use std::fmt;
use std::io::Write;

use csvsniff_core::{ColumnTypeGuess, SchemaGuess};
use csvsniff_error::{Result, SniffError};

use crate::args::OutputMode;

const COLUMN_HEADING: &str = "column";
const TYPE_HEADING: &str = "type";

/// Write the result for a single input.
pub fn write_guess<W: Write>(
    writer: &mut W,
    mode: OutputMode,
    details: bool,
    guess: &SchemaGuess,
) -> Result<()> {
    match mode {
        OutputMode::Table => {
            write!(writer, "{}", GuessTable::new(&guess.columns))?;
        }
        OutputMode::Json => {
            let s = if details {
                serde_json::to_string(guess)
            } else {
                serde_json::to_string(&guess.columns)
            };
            writeln!(writer, "{}", s.map_err(json_error)?)?;
        }
        OutputMode::Ndjson => {
            for column in &guess.columns {
                let s = serde_json::to_string(column).map_err(json_error)?;
                writeln!(writer, "{s}")?;
            }
        }
    }

    Ok(())
}

fn json_error(err: serde_json::Error) -> SniffError {
    SniffError::with_source("Failed to serialize output", Box::new(err))
}

/// Box-drawn table with one row per column guess.
///
/// Control characters in column names are escaped so every row stays on a
/// single line.
#[derive(Debug)]
pub struct GuessTable<'a> {
    columns: &'a [ColumnTypeGuess],
    names: Vec<Cow<'a, str>>,
    name_width: usize,
    type_width: usize,
}

impl<'a> GuessTable<'a> {
    pub fn new(columns: &'a [ColumnTypeGuess]) -> Self {
        let names: Vec<_> = columns
            .iter()
            .map(|c| escape_control(&c.column_name))
            .collect();

        let name_width = names
            .iter()
            .map(|name| name.chars().count())
            .chain([COLUMN_HEADING.len()])
            .max()
            .unwrap_or_default();
        let type_width = columns
            .iter()
            .map(|c| c.data_type.label().len())
            .chain([TYPE_HEADING.len()])
            .max()
            .unwrap_or_default();

        GuessTable {
            columns,
            names,
            name_width,
            type_width,
        }
    }

    fn write_divider(
        &self,
        f: &mut fmt::Formatter<'_>,
        [left, fill, mid, right]: [char; 4],
    ) -> fmt::Result {
        let fill = fill.to_string();
        writeln!(
            f,
            "{left}{}{mid}{}{right}",
            fill.repeat(self.name_width + 2),
            fill.repeat(self.type_width + 2),
        )
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, name: &str, typ: &str) -> fmt::Result {
        let name_pad = self.name_width - name.chars().count();
        let type_pad = self.type_width - typ.chars().count();
        writeln!(
            f,
            "│ {name}{} │ {typ}{} │",
            " ".repeat(name_pad),
            " ".repeat(type_pad),
        )
    }
}

impl fmt::Display for GuessTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_divider(f, ['┌', '─', '┬', '┐'])?;
        self.write_row(f, COLUMN_HEADING, TYPE_HEADING)?;
        self.write_divider(f, ['╞', '═', '╪', '╡'])?;
        for (name, column) in self.names.iter().zip(self.columns) {
            self.write_row(f, name, column.data_type.label())?;
        }
        self.write_divider(f, ['└', '─', '┴', '┘'])
    }
}

fn escape_control(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}
