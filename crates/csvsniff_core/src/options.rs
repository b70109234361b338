use csvsniff_error::{Result, SniffError};

use crate::dialect::DialectOptions;

/// Default number of records sampled per input.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

const MIN_SAMPLE_SIZE: usize = 1;
const MAX_SAMPLE_SIZE: usize = 100_000;

/// Options for the schema inferencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferOptions {
    /// Max number of records examined per column.
    pub sample_size: usize,
}

impl Default for InferOptions {
    fn default() -> Self {
        InferOptions {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl InferOptions {
    pub fn validate(&self) -> Result<()> {
        if self.sample_size < MIN_SAMPLE_SIZE {
            return Err(SniffError::invalid_config(format!(
                "Sample size cannot be less than {MIN_SAMPLE_SIZE}"
            )));
        }

        if self.sample_size > MAX_SAMPLE_SIZE {
            return Err(SniffError::invalid_config(format!(
                "Sample size cannot be greater than {MAX_SAMPLE_SIZE}"
            )));
        }

        Ok(())
    }
}

/// Options for a full decode and infer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SniffOptions {
    /// Dialect to decode with. Inferred from the input if not set.
    pub dialect: Option<DialectOptions>,
    pub infer: InferOptions,
}

impl SniffOptions {
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.infer.sample_size = sample_size;
        self
    }

    pub fn with_dialect(mut self, dialect: DialectOptions) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.infer.validate()?;

        if let Some(dialect) = &self.dialect {
            if dialect.delimiter == dialect.quote {
                return Err(SniffError::invalid_config(
                    "Delimiter and quote characters must differ",
                )
                .with_field("dialect", *dialect));
            }
            if matches!(dialect.delimiter, b'\n' | b'\r') || matches!(dialect.quote, b'\n' | b'\r')
            {
                return Err(SniffError::invalid_config(
                    "Delimiter and quote characters cannot be line terminators",
                )
                .with_field("dialect", *dialect));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use csvsniff_error::ErrorKind;

    use super::*;

    #[test]
    fn default_valid() {
        let opts = SniffOptions::default();
        opts.validate().unwrap();
        assert_eq!(5, opts.infer.sample_size);
        assert_eq!(None, opts.dialect);
    }

    #[test]
    fn sample_size_bounds() {
        let err = SniffOptions::default()
            .with_sample_size(0)
            .validate()
            .unwrap_err();
        assert_eq!(ErrorKind::InvalidConfig, err.kind());

        let err = SniffOptions::default()
            .with_sample_size(MAX_SAMPLE_SIZE + 1)
            .validate()
            .unwrap_err();
        assert_eq!(ErrorKind::InvalidConfig, err.kind());

        SniffOptions::default()
            .with_sample_size(MAX_SAMPLE_SIZE)
            .validate()
            .unwrap();
    }

    #[test]
    fn dialect_same_delimiter_and_quote() {
        let err = SniffOptions::default()
            .with_dialect(DialectOptions {
                delimiter: b',',
                quote: b',',
            })
            .validate()
            .unwrap_err();
        assert_eq!(ErrorKind::InvalidConfig, err.kind());
    }

    #[test]
    fn dialect_line_terminator() {
        let err = SniffOptions::default()
            .with_dialect(DialectOptions {
                delimiter: b'\n',
                quote: b'"',
            })
            .validate()
            .unwrap_err();
        assert_eq!(ErrorKind::InvalidConfig, err.kind());
    }
}
