use csvsniff_error::Result;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::datatype::ColumnTypeGuess;
use crate::dialect::DialectOptions;
use crate::infer::SchemaInferencer;
use crate::options::SniffOptions;
use crate::record::Sample;
use crate::stream::{DecodeStats, RowStream, strip_bom};

/// States a session moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHeader,
    /// Header was read, accumulating up to K records.
    SamplingRows,
    Inferring,
    Done,
}

/// Complete result of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaGuess {
    /// One guess per header column, in header order.
    pub columns: Vec<ColumnTypeGuess>,
    /// Dialect used for decoding.
    pub dialect: DialectOptions,
    /// Number of records the guesses were inferred from.
    pub records_sampled: usize,
    pub stats: DecodeStats,
}

/// Drives decoding and inference for an input.
///
/// Reading stops as soon as the sample is full, the rest of the input is
/// never decoded. A session may be run again for another input, each run
/// starts over from `AwaitingHeader`.
#[derive(Debug)]
pub struct SniffSession {
    options: SniffOptions,
    inferencer: SchemaInferencer,
    state: SessionState,
}

impl SniffSession {
    pub fn try_new(options: SniffOptions) -> Result<Self> {
        options.validate()?;
        let inferencer = SchemaInferencer::new(options.infer)?;

        Ok(SniffSession {
            options,
            inferencer,
            state: SessionState::AwaitingHeader,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Decode and infer the schema for an input.
    ///
    /// On error the session is left in the state it failed in.
    #[instrument(level = "debug", skip_all, fields(input_bytes = input.len()))]
    pub fn run(&mut self, input: &[u8]) -> Result<SchemaGuess> {
        self.state = SessionState::AwaitingHeader;

        let dialect = match self.options.dialect {
            Some(dialect) => dialect,
            None => {
                let dialect =
                    DialectOptions::infer_from_input(strip_bom(input)).unwrap_or_default();
                debug!(?dialect, "inferred csv dialect");
                dialect
            }
        };

        let mut stream = RowStream::try_new(input, dialect)?;
        self.transition(SessionState::SamplingRows);

        let mut sample = Sample::with_capacity(self.inferencer.options().sample_size);
        while !sample.is_full() {
            let Some(record) = stream.next() else {
                break;
            };
            sample.push(record);
        }

        self.transition(SessionState::Inferring);
        let columns = self.inferencer.infer(stream.header(), &sample)?;
        self.transition(SessionState::Done);

        Ok(SchemaGuess {
            columns,
            dialect,
            records_sampled: sample.len(),
            stats: stream.stats(),
        })
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "session state transition");
        self.state = next;
    }
}

/// Infer column types for a csv input using default options.
pub fn infer_schema(input: &[u8]) -> Result<Vec<ColumnTypeGuess>> {
    let guess = infer_schema_with_options(input, SniffOptions::default())?;
    Ok(guess.columns)
}

/// Infer column types for a csv input.
pub fn infer_schema_with_options(input: &[u8], options: SniffOptions) -> Result<SchemaGuess> {
    SniffSession::try_new(options)?.run(input)
}
