use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpTypesError {
    #[error("parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("validation error: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("serialize error: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<HttpTypesError>,
    },
}

impl HttpTypesError {
    pub fn at_line(line: usize, source: HttpTypesError) -> Self {
        Self::Line { line, source: Box::new(source) }
    }

    /// Returns true if this error, or the error it wraps for a line, is a [`ParseError`].
    pub fn is_parse(&self) -> bool {
        match self {
            HttpTypesError::Parse { .. } => true,
            HttpTypesError::Line { source, .. } => source.is_parse(),
            _ => false,
        }
    }

    /// Returns true if this error, or the error it wraps for a line, is a [`ValidationError`].
    pub fn is_validation(&self) -> bool {
        match self {
            HttpTypesError::Validation { .. } => true,
            HttpTypesError::Line { source, .. } => source.is_validation(),
            _ => false,
        }
    }

    /// Returns the 1-based line number the error occurred on, if it came from a JSON lines batch.
    pub fn line(&self) -> Option<usize> {
        match self {
            HttpTypesError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed json: {reason}")]
    MalformedJson { reason: String },

    #[error("line size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeLine { current_size: usize, max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_json<S: ToString>(str: S) -> Self {
        Self::MalformedJson { reason: str.to_string() }
    }

    pub fn too_large_line(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeLine { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("unknown {field}: {value:?}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("request must have either path or pathname")]
    MissingPath,

    #[error("invalid status code: {value:?}")]
    InvalidStatusCode { value: String },

    #[error("invalid timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("invalid field: {reason}")]
    InvalidField { reason: String },

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn unknown_variant<S: ToString>(field: &'static str, value: S) -> Self {
        Self::UnknownVariant { field, value: value.to_string() }
    }

    pub fn invalid_status_code<S: ToString>(value: S) -> Self {
        Self::InvalidStatusCode { value: value.to_string() }
    }

    pub fn invalid_timestamp<S: ToString>(value: S) -> Self {
        Self::InvalidTimestamp { value: value.to_string() }
    }

    pub fn invalid_field<S: ToString>(str: S) -> Self {
        Self::InvalidField { reason: str.to_string() }
    }

    pub fn invalid_query<S: ToString>(str: S) -> Self {
        Self::InvalidQuery { reason: str.to_string() }
    }
}

/// Routes a `serde_json` failure raised while *reading* a document.
///
/// Syntax and EOF errors mean the document is not JSON at all; data errors mean it is JSON
/// whose shape does not fit the wire format.
pub(crate) fn read_error(e: serde_json::Error) -> HttpTypesError {
    use serde_json::error::Category;

    match e.classify() {
        Category::Data => ValidationError::invalid_field(e).into(),
        Category::Io => ParseError::io(e).into(),
        Category::Syntax | Category::Eof => ParseError::malformed_json(e).into(),
    }
}
