use csv_core::{ReadRecordResult, Reader};

use crate::dialect::DialectOptions;

const START_BUFFER_CAP: usize = 512;
const BUFFER_CAP_INCREMENT: usize = 512;

const START_ENDS_CAP: usize = 48;
const ENDS_CAP_INCREMENT: usize = 48;

/// Decodes records one at a time from an in-memory input.
///
/// Unlike a batch decoder, records aren't required to have the same number of
/// fields. Reconciling ragged records against a header is left to the caller.
#[derive(Debug)]
pub struct CsvDecoder {
    /// Configured csv reader.
    reader: Reader,

    /// Decoded field data for the most recent record.
    buffer: Vec<u8>,

    /// End offsets into `buffer` for each field in the most recent record.
    ends: Vec<usize>,
}

impl CsvDecoder {
    pub fn new(dialect: DialectOptions) -> Self {
        CsvDecoder {
            reader: dialect.csv_core_reader(),
            buffer: vec![0; START_BUFFER_CAP],
            ends: vec![0; START_ENDS_CAP],
        }
    }

    /// Decode the next record from `input`.
    ///
    /// `input` is treated as the complete remaining input. A final record
    /// without a trailing line terminator is still returned.
    ///
    /// Returns the number of bytes consumed from `input` alongside the
    /// decoded record. `None` is returned once the input is exhausted.
    pub fn next_record<'a>(&'a mut self, input: &[u8]) -> (usize, Option<ByteRecord<'a>>) {
        let mut input_offset = 0;
        let mut buffer_len = 0;
        let mut ends_len = 0;

        loop {
            let (result, bytes_read, bytes_written, ends_written) = self.reader.read_record(
                &input[input_offset..],
                &mut self.buffer[buffer_len..],
                &mut self.ends[ends_len..],
            );

            input_offset += bytes_read;
            buffer_len += bytes_written;
            ends_len += ends_written;

            match result {
                ReadRecordResult::InputEmpty => {
                    // Everything's been handed to the reader. Looping again
                    // passes an empty slice which signals end of input,
                    // flushing out any partial record.
                }
                ReadRecordResult::OutputFull => {
                    self.buffer
                        .resize(self.buffer.len() + BUFFER_CAP_INCREMENT, 0);
                }
                ReadRecordResult::OutputEndsFull => {
                    self.ends.resize(self.ends.len() + ENDS_CAP_INCREMENT, 0);
                }
                ReadRecordResult::Record => {
                    let record = ByteRecord {
                        data: &self.buffer[..buffer_len],
                        ends: &self.ends[..ends_len],
                    };
                    return (input_offset, Some(record));
                }
                ReadRecordResult::End => return (input_offset, None),
            }
        }
    }
}

/// A single decoded record borrowing from the decoder's buffers.
#[derive(Debug, Clone, Copy)]
pub struct ByteRecord<'a> {
    data: &'a [u8],
    ends: &'a [usize],
}

impl<'a> ByteRecord<'a> {
    pub fn num_fields(&self) -> usize {
        self.ends.len()
    }

    /// Get the raw bytes for a field.
    ///
    /// Panics if `idx` is out of bounds.
    pub fn field(&self, idx: usize) -> &'a [u8] {
        let start = if idx == 0 { 0 } else { self.ends[idx - 1] };
        let end = self.ends[idx];
        &self.data[start..end]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> {
        let record = *self;
        (0..record.num_fields()).map(move |idx| record.field(idx))
    }
}
