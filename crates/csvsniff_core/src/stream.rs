use std::borrow::Cow;
use std::sync::Arc;

use csvsniff_error::{Result, SniffError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::decoder::{ByteRecord, CsvDecoder};
use crate::dialect::DialectOptions;
use crate::record::{Header, Record};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Strip a leading UTF-8 byte order mark if present.
pub fn strip_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(UTF8_BOM).unwrap_or(input)
}

/// Counters for anomalies recovered from while decoding rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeStats {
    /// Number of records yielded by the stream.
    pub records: usize,
    /// Rows with fewer fields than the header, padded with absent values.
    pub padded_rows: usize,
    /// Rows with more fields than the header, extra fields dropped.
    pub truncated_rows: usize,
    /// Fields that contained invalid UTF-8 and were decoded lossily.
    pub invalid_utf8_fields: usize,
}

/// Lazy, single pass stream of records from an in-memory csv input.
///
/// The first row is read eagerly as the header and is never yielded as a
/// record. Rows that don't line up with the header are reconciled:
///
/// - Short rows are padded with absent values for the missing trailing
///   columns.
/// - Long rows are truncated to the width of the header. Extra fields are
///   dropped, leading fields keep their alignment.
#[derive(Debug)]
pub struct RowStream<'a> {
    /// Remaining undecoded input.
    input: &'a [u8],
    decoder: CsvDecoder,
    header: Arc<Header>,
    stats: DecodeStats,
    /// Set once the decoder reports the end of input.
    finished: bool,
}

impl<'a> RowStream<'a> {
    /// Create a new stream, reading the header from the input.
    ///
    /// Errors if the input is empty. An input with an empty header row is not
    /// an error here, it produces a header with zero columns.
    pub fn try_new(input: &'a [u8], dialect: DialectOptions) -> Result<Self> {
        let input = strip_bom(input);
        if input.is_empty() {
            return Err(SniffError::empty_input());
        }

        let mut decoder = CsvDecoder::new(dialect);
        let mut stats = DecodeStats::default();

        let (consumed, record) = decoder.next_record(input);
        let header = match record {
            Some(record) => Self::header_from_record(record, &mut stats),
            None => {
                // Input contained only line terminators.
                Header::default()
            }
        };

        debug!(num_columns = header.num_columns(), ?dialect, "decoded csv header");

        Ok(RowStream {
            input: &input[consumed..],
            decoder,
            header: Arc::new(header),
            stats,
            finished: false,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    fn header_from_record(record: ByteRecord, stats: &mut DecodeStats) -> Header {
        // A header made up of a single empty field has no columns.
        if record.num_fields() == 1 && record.field(0).is_empty() {
            return Header::default();
        }

        Header::new(
            record
                .iter()
                .enumerate()
                .map(|(idx, field)| decode_field(field, 0, idx, stats).into_owned()),
        )
    }
}

impl Iterator for RowStream<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let input = self.input;
        let (consumed, record) = self.decoder.next_record(input);

        match record {
            Some(record) => {
                self.input = &input[consumed..];
                Some(align_record(&self.header, &mut self.stats, record))
            }
            None => {
                self.input = &[];
                self.finished = true;
                None
            }
        }
    }
}

/// Build a record aligned to the header, padding or truncating as needed.
fn align_record(header: &Arc<Header>, stats: &mut DecodeStats, record: ByteRecord) -> Record {
    let num_columns = header.num_columns();
    let num_fields = record.num_fields();
    let row = stats.records + 1;

    if num_fields < num_columns {
        debug!(row, num_fields, num_columns, "padding short row");
        stats.padded_rows += 1;
    } else if num_fields > num_columns {
        warn!(row, num_fields, num_columns, "truncating long row");
        stats.truncated_rows += 1;
    }

    let mut values: Vec<Option<String>> = Vec::with_capacity(num_columns);
    for idx in 0..usize::min(num_fields, num_columns) {
        let field = decode_field(record.field(idx), row, idx, stats);
        values.push(Some(field.into_owned()));
    }
    values.resize(num_columns, None);

    stats.records += 1;

    Record::new(header.clone(), values)
}

/// Decode field bytes as UTF-8, replacing invalid sequences.
fn decode_field<'b>(
    bytes: &'b [u8],
    row: usize,
    column: usize,
    stats: &mut DecodeStats,
) -> Cow<'b, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            debug!(row, column, "field contains invalid utf-8, decoding lossily");
            stats.invalid_utf8_fields += 1;
            String::from_utf8_lossy(bytes)
        }
    }
}
