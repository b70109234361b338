//! # Inference
//!
//! Every column starts out as a candidate for both numeric and date/time.
//! Each non-empty sampled value that fails to parse as one of those types
//! disqualifies the column from that type. The remaining candidate with the
//! highest precedence wins:
//!
//! - Numeric
//! - Date/Time
//! - Categorical (always valid)
//!
//! Empty and absent values are skipped, they never disqualify a type. A
//! whitespace-only value is not empty: it reads as zero for numeric, but isn't
//! a date/time. A column with no non-empty values in the sample is never
//! disqualified and ends up Numeric.

use csvsniff_error::{Result, SniffError};
use tracing::trace;

use crate::datatype::{ColumnType, ColumnTypeGuess};
use crate::options::InferOptions;
use crate::parse::{DateTimeParser, NumericParser, Parser};
use crate::record::{Header, Record, Sample};

/// Candidate types still valid for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnCandidates {
    is_numeric: bool,
    is_datetime: bool,
}

impl Default for ColumnCandidates {
    fn default() -> Self {
        // Start with everything, narrow down from the input.
        ColumnCandidates {
            is_numeric: true,
            is_datetime: true,
        }
    }
}

impl ColumnCandidates {
    /// Update candidates based on some raw input value.
    fn update_from_input(&mut self, input: Option<&str>) {
        let input = match input {
            Some(s) if !s.is_empty() => s,
            _ => return, // Absent or empty, no evidence either way.
        };

        if self.is_numeric && NumericParser.parse(input).is_none() {
            trace!(%input, "value is not numeric");
            self.is_numeric = false;
        }

        if self.is_datetime && DateTimeParser.parse(input).is_none() {
            trace!(%input, "value is not a date/time");
            self.is_datetime = false;
        }
    }

    const fn as_column_type(&self) -> ColumnType {
        if self.is_numeric {
            ColumnType::Numeric
        } else if self.is_datetime {
            ColumnType::DateTime
        } else {
            ColumnType::Categorical
        }
    }
}

/// Infers column types from a header and a bounded sample of records.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaInferencer {
    options: InferOptions,
}

impl SchemaInferencer {
    pub fn new(options: InferOptions) -> Result<Self> {
        options.validate()?;
        Ok(SchemaInferencer { options })
    }

    pub fn options(&self) -> &InferOptions {
        &self.options
    }

    /// Infer the type of every column in the header.
    ///
    /// Guesses are returned in header order. Errors if the header has no
    /// columns. An empty sample is not an error.
    pub fn infer(&self, header: &Header, sample: &Sample) -> Result<Vec<ColumnTypeGuess>> {
        self.infer_from_records(header, sample.records())
    }

    /// Infer column types from a slice of records.
    ///
    /// At most `sample_size` records from the start of the slice are examined.
    pub fn infer_from_records(
        &self,
        header: &Header,
        records: &[Record],
    ) -> Result<Vec<ColumnTypeGuess>> {
        if header.is_empty() {
            return Err(SniffError::empty_schema());
        }

        let mut candidates = vec![ColumnCandidates::default(); header.num_columns()];

        for record in records.iter().take(self.options.sample_size) {
            for (idx, candidate) in candidates.iter_mut().enumerate() {
                candidate.update_from_input(record.get(idx));
            }
        }

        let guesses = header
            .iter()
            .zip(candidates)
            .map(|(name, candidate)| ColumnTypeGuess::new(name, candidate.as_column_type()))
            .collect();

        Ok(guesses)
    }
}
