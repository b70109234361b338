use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use csvsniff_core::options::DEFAULT_SAMPLE_SIZE;
use csvsniff_core::{DialectOptions, SniffOptions};

#[derive(Debug, Parser)]
#[clap(name = "csvsniff")]
#[clap(about = "Guess the column types of csv files from a sample of rows")]
pub struct Arguments {
    /// Csv files to read.
    ///
    /// Reads from stdin if no files are given, or if a file is '-'.
    pub files: Vec<PathBuf>,

    /// Number of records to sample from each file.
    #[clap(short = 'n', long, env = "CSVSNIFF_SAMPLE_SIZE", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Field delimiter. Inferred from the input if neither this nor `--quote`
    /// is set.
    ///
    /// Accepts a single ASCII character, or 'tab'.
    #[clap(short, long, value_parser = parse_dialect_char)]
    pub delimiter: Option<u8>,

    /// Quote character.
    #[clap(long, value_parser = parse_dialect_char)]
    pub quote: Option<u8>,

    /// Display output mode.
    #[clap(long, value_enum, default_value_t = OutputMode::Table)]
    pub mode: OutputMode,

    /// Include the dialect and decode statistics in json output.
    #[clap(long)]
    pub details: bool,

    /// Default log level, overridden by directives in RUST_LOG.
    #[clap(long, env = "CSVSNIFF_LOG", default_value = "error")]
    pub log_level: tracing::Level,

    /// Log line format ('human' or 'json'). Logs are written to stderr.
    #[clap(long, default_value = "human")]
    pub log_format: logutil::LogFormat,
}

impl Arguments {
    /// Build session options from the arguments.
    pub fn sniff_options(&self) -> SniffOptions {
        let opts = SniffOptions::default().with_sample_size(self.sample_size);

        if self.delimiter.is_none() && self.quote.is_none() {
            return opts;
        }

        let default = DialectOptions::default();
        opts.with_dialect(DialectOptions {
            delimiter: self.delimiter.unwrap_or(default.delimiter),
            quote: self.quote.unwrap_or(default.quote),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    Table,
    Json,
    Ndjson,
}

fn parse_dialect_char(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        _ => (),
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("Expected a single ASCII character, got '{s}'")),
    }
}
