//! HTTP Types JSON wire format
//!
//! One JSON object per exchange, one exchange per line:
//!
//! ```json
//! {"request":{"method":"get","protocol":"https","host":"example.com","headers":{},"path":"/?a=1"},"response":{"statusCode":200,"headers":{}}}
//! ```
//!
//! On input a request carries either `path`, or `pathname` plus `query`; on output it
//! always carries all three.
//!
//! # Components
//!
//! - [`ExchangeReader`]: parses and validates documents and JSON lines text
//! - [`ExchangeWriter`]: accumulates serialized exchanges in a string buffer
//! - [`from_json`], [`from_json_lines`], [`to_json`]: one-shot helpers with default settings

mod reader;
mod wire;
mod writer;

pub use reader::DEFAULT_MAX_LINE_BYTES;
pub use reader::ExchangeReader;
pub use reader::JsonLines;
pub use writer::ExchangeWriter;

use crate::protocol::{Exchange, HttpTypesError};

/// Parses a single JSON document with a default [`ExchangeReader`].
pub fn from_json(document: &str) -> Result<Exchange, HttpTypesError> {
    ExchangeReader::new().from_json(document)
}

/// Parses JSON lines text with a default [`ExchangeReader`], see [`ExchangeReader::from_json_lines`].
pub fn from_json_lines<F>(text: &str, callback: F) -> Result<usize, HttpTypesError>
where
    F: FnMut(Exchange),
{
    ExchangeReader::new().from_json_lines(text, callback)
}

/// Serializes one exchange to a JSON string without a trailing newline.
pub fn to_json(exchange: &Exchange) -> Result<String, HttpTypesError> {
    Ok(serde_json::to_string(exchange)?)
}
