use std::fmt;

use serde::Serialize;

use crate::decoder::CsvDecoder;

/// Number of bytes from the start of the input used when inferring the
/// dialect.
pub const DIALECT_INFER_BYTES: usize = 16 * 1024;

/// Max number of records decoded per candidate dialect during inference.
const DIALECT_INFER_RECORDS: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialectOptions {
    /// Delimiter character.
    #[serde(serialize_with = "serialize_byte_char")]
    pub delimiter: u8,
    /// Quote character.
    #[serde(serialize_with = "serialize_byte_char")]
    pub quote: u8,
}

impl Default for DialectOptions {
    fn default() -> Self {
        DialectOptions {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl fmt::Debug for DialectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectOptions")
            .field("delimiter", &(self.delimiter as char))
            .field("quote", &(self.quote as char))
            .finish()
    }
}

fn serialize_byte_char<S: serde::Serializer>(b: &u8, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_char(*b as char)
}

impl DialectOptions {
    /// Infer the dialect from the start of a complete input.
    ///
    /// Only a prefix of the input is inspected. When the input is longer than
    /// the prefix, the prefix is cut back to the last line terminator so a
    /// partial record doesn't skew the field counts.
    pub fn infer_from_input(input: &[u8]) -> Option<Self> {
        if input.len() <= DIALECT_INFER_BYTES {
            return Self::infer_from_sample(input);
        }

        let prefix = &input[..DIALECT_INFER_BYTES];
        let sample = match prefix.iter().rposition(|b| *b == b'\n') {
            Some(pos) => &prefix[..=pos],
            None => prefix,
        };

        Self::infer_from_sample(sample)
    }

    /// Try to infer which csv options to use based on some number of records
    /// from a csv source.
    pub fn infer_from_sample(sample_bytes: &[u8]) -> Option<Self> {
        // Best dialect chosen so far alongside number of fields decoded.
        let mut best: (Option<Self>, usize) = (None, 0);

        for dialect in Self::dialects() {
            // To be considered the best dialect:
            //
            // - Should decode at least 2 records.
            // - Should parse at least 2 fields for a record.
            // - Should have decoded more number of fields than previous best.
            // - All decoded records have the same number of fields.

            let field_counts = dialect.sample_field_counts(sample_bytes);
            if field_counts.len() < 2 {
                continue;
            }

            let num_fields = field_counts[0];

            // Parsing a single field is trivial.
            if num_fields < 2 {
                continue;
            }

            // If we parse fewer fields, likely not what we want.
            if num_fields <= best.1 {
                continue;
            }

            // Make sure everything in our sample has the same number of
            // fields.
            if field_counts.iter().any(|&n| n != num_fields) {
                continue;
            }

            // New best dialect.
            best = (Some(*dialect), num_fields);
        }

        best.0
    }

    /// Decode the sample with this dialect, returning the number of fields in
    /// each record.
    fn sample_field_counts(&self, sample_bytes: &[u8]) -> Vec<usize> {
        let mut decoder = CsvDecoder::new(*self);
        let mut input = sample_bytes;
        let mut counts = Vec::new();

        while counts.len() < DIALECT_INFER_RECORDS {
            let (consumed, record) = decoder.next_record(input);
            match record {
                Some(record) => counts.push(record.num_fields()),
                None => break,
            }
            input = &input[consumed..];
        }

        counts
    }

    pub(crate) fn csv_core_reader(&self) -> csv_core::Reader {
        csv_core::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .build()
    }

    /// Dialects used when attempting to infer options for a csv file.
    ///
    /// These are order with preferred options first. For example, if we infer
    /// the dialects from a file containing only commas, we want to pick the
    /// dialect with the more standard quote character ('"').
    const fn dialects() -> &'static [Self] {
        &[
            DialectOptions {
                delimiter: b',',
                quote: b'"',
            },
            DialectOptions {
                delimiter: b'|',
                quote: b'"',
            },
            DialectOptions {
                delimiter: b';',
                quote: b'"',
            },
            DialectOptions {
                delimiter: b'\t',
                quote: b'"',
            },
            DialectOptions {
                delimiter: b',',
                quote: b'\'',
            },
            DialectOptions {
                delimiter: b'|',
                quote: b'\'',
            },
            DialectOptions {
                delimiter: b';',
                quote: b'\'',
            },
            DialectOptions {
                delimiter: b'\t',
                quote: b'\'',
            },
        ]
    }
}
