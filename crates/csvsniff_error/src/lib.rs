use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

pub type Result<T, E = SniffError> = std::result::Result<T, E>;

/// Broad category of an error.
///
/// Callers are expected to match on this to decide how to report an error
/// (e.g. the structural kinds map to a client error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No header could be read because the input contained no data.
    EmptyInput,
    /// A header was read, but it has zero columns.
    EmptySchema,
    /// Options provided by the caller are invalid.
    InvalidConfig,
    /// Error reading input.
    Io,
    Other,
}

impl ErrorKind {
    /// If this kind represents a structural problem with the input.
    pub const fn is_structural(&self) -> bool {
        matches!(self, ErrorKind::EmptyInput | ErrorKind::EmptySchema)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty input",
            ErrorKind::EmptySchema => "empty schema",
            ErrorKind::InvalidConfig => "invalid config",
            ErrorKind::Io => "io",
            ErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value that can be attached to an error as an additional field.
pub trait ErrorFieldValue: fmt::Debug + Sync + Send + 'static {}

impl<T> ErrorFieldValue for T where T: fmt::Debug + Sync + Send + 'static {}

pub struct SniffError {
    inner: Box<SniffErrorInner>,
}

struct SniffErrorInner {
    kind: ErrorKind,
    msg: String,
    source: Option<Box<dyn Error + Send + Sync>>,
    fields: Vec<(Cow<'static, str>, Box<dyn ErrorFieldValue>)>,
    backtrace: Backtrace,
}

impl SniffError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Other, msg)
    }

    pub fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        SniffError {
            inner: Box::new(SniffErrorInner {
                kind,
                msg: msg.into(),
                source: None,
                fields: Vec::new(),
                backtrace: Backtrace::capture(),
            }),
        }
    }

    pub fn with_source(msg: impl Into<String>, source: Box<dyn Error + Send + Sync>) -> Self {
        let mut err = Self::new(msg);
        err.inner.source = Some(source);
        err
    }

    /// Error for input that contained nothing to read a header from.
    pub fn empty_input() -> Self {
        Self::with_kind(ErrorKind::EmptyInput, "Could not parse CSV headers, input is empty")
    }

    /// Error for a header with zero columns.
    pub fn empty_schema() -> Self {
        Self::with_kind(ErrorKind::EmptySchema, "CSV header contains no columns")
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::InvalidConfig, msg)
    }

    /// Attach an additional field to the error.
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: ErrorFieldValue,
    {
        self.inner.fields.push((key.into(), Box::new(value)));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn get_msg(&self) -> &str {
        &self.inner.msg
    }

    pub fn get_backtrace(&self) -> &Backtrace {
        &self.inner.backtrace
    }
}

impl fmt::Display for SniffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.msg)?;

        for (key, value) in &self.inner.fields {
            write!(f, "\n{key}: {value:?}")?;
        }

        if let Some(source) = &self.inner.source {
            write!(f, "\nError source: {source}")?;
        }

        if self.inner.backtrace.status() == BacktraceStatus::Captured {
            write!(f, "\nBacktrace: {}", self.inner.backtrace)?;
        }

        Ok(())
    }
}

impl fmt::Debug for SniffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SniffError")
            .field("kind", &self.inner.kind)
            .field("msg", &self.inner.msg)
            .field("fields", &self.inner.fields)
            .field("source", &self.inner.source)
            .finish()
    }
}

impl Error for SniffError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<std::io::Error> for SniffError {
    fn from(value: std::io::Error) -> Self {
        let mut err = SniffError::with_kind(ErrorKind::Io, "IO error");
        err.inner.source = Some(Box::new(value));
        err
    }
}

impl From<fmt::Error> for SniffError {
    fn from(value: fmt::Error) -> Self {
        SniffError::with_source("Format error", Box::new(value))
    }
}

/// Extension methods for adding context to results.
pub trait ResultExt<T, E> {
    /// Wrap an error with a static context string.
    fn context(self, msg: &'static str) -> Result<T>;

    /// Wrap an error with a context string generated from a function.
    fn context_fn<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| SniffError::with_source(msg, Box::new(e)))
    }

    fn context_fn<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| SniffError::with_source(f(), Box::new(e)))
    }
}

pub trait OptionExt<T> {
    /// Return an error if the option is None.
    fn required(self, msg: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, msg: &'static str) -> Result<T> {
        match self {
            Some(v) => Ok(v),
            None => Err(SniffError::new(format!("Missing value: {msg}"))),
        }
    }
}
