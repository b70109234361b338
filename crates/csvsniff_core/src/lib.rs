//! Streaming csv decoding and column type inference.
//!
//! The entry point is [`infer_schema`], which decodes the header and the first
//! few records of an in-memory csv input and guesses a [`ColumnType`] for every
//! column.

pub mod datatype;
pub mod decoder;
pub mod dialect;
pub mod infer;
pub mod options;
pub mod parse;
pub mod record;
pub mod session;
pub mod stream;

pub use datatype::{ColumnType, ColumnTypeGuess};
pub use dialect::DialectOptions;
pub use options::{InferOptions, SniffOptions};
pub use session::{SchemaGuess, SniffSession, infer_schema, infer_schema_with_options};
