//! JSON and JSON lines reader for recorded exchanges
//!
//! Each document is parsed completely, then normalized and validated into an [`Exchange`].
//! Batches are fail fast: the first bad line aborts the whole batch and is reported with
//! its 1-based line number through [`HttpTypesError::Line`].
//!
//! # Example
//!
//! ```
//! use micro_http_types::codec::ExchangeReader;
//!
//! let text = concat!(
//!     r#"{"request":{"method":"GET","protocol":"HTTP","host":"a.test","headers":{},"path":"/"},"response":{"statusCode":200,"headers":{}}}"#,
//!     "\n",
//!     r#"{"request":{"method":"get","protocol":"http","host":"b.test","headers":{},"pathname":"/","query":{}},"response":{"statusCode":404,"headers":{}}}"#,
//!     "\n",
//! );
//!
//! let mut hosts = Vec::new();
//! let count = ExchangeReader::new()
//!     .from_json_lines(text, |exchange| hosts.push(exchange.request().host().to_string()))
//!     .unwrap();
//!
//! assert_eq!(count, 2);
//! assert_eq!(hosts, ["a.test", "b.test"]);
//! ```

use std::io::{self, BufRead, Read};
use std::iter::{Enumerate, FusedIterator};
use std::str::Lines;

use tracing::{debug, error, trace};

use crate::codec::wire::RawExchange;
use crate::ensure;
use crate::protocol::error::read_error;
use crate::protocol::{Exchange, HttpTypesError, ParseError};

/// Default upper bound for the size of a single JSON document
pub const DEFAULT_MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

/// Parses exchanges from JSON documents and JSON lines text.
#[derive(Debug, Copy, Clone)]
pub struct ExchangeReader {
    max_line_bytes: usize,
}

impl Default for ExchangeReader {
    fn default() -> Self {
        Self { max_line_bytes: DEFAULT_MAX_LINE_BYTES }
    }
}

impl ExchangeReader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the largest document, in bytes, the reader accepts.
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Parses a single JSON document into an [`Exchange`].
    ///
    /// # Errors
    ///
    /// - [`ParseError::TooLargeLine`] if the document exceeds the size limit
    /// - [`ParseError::MalformedJson`] if the document is not valid JSON
    /// - a [`ValidationError`](crate::protocol::ValidationError) if a required field is
    ///   missing, has the wrong type, or a method/protocol is not recognized
    #[allow(clippy::wrong_self_convention, reason = "named after the fromJson operation of the format")]
    pub fn from_json(&self, document: &str) -> Result<Exchange, HttpTypesError> {
        ensure!(document.len() <= self.max_line_bytes, ParseError::too_large_line(document.len(), self.max_line_bytes));

        let raw: RawExchange = serde_json::from_str(document).map_err(read_error)?;
        Ok(Exchange::try_from(raw)?)
    }

    /// Lazily parses JSON lines text, skipping blank lines.
    ///
    /// The iterator yields exchanges in file order and stops after the first error.
    pub fn exchanges<'a>(&self, text: &'a str) -> JsonLines<'a> {
        JsonLines { reader: *self, lines: text.lines().enumerate(), failed: false }
    }

    /// Parses every line of `text`, or returns the first error.
    pub fn read_all(&self, text: &str) -> Result<Vec<Exchange>, HttpTypesError> {
        self.exchanges(text).collect()
    }

    /// Parses JSON lines text and hands each exchange to `callback` in file order.
    ///
    /// All lines are parsed before the callback runs, so a bad line means the callback is
    /// never invoked. Returns the number of exchanges delivered.
    #[allow(clippy::wrong_self_convention, reason = "named after the fromJson operation of the format")]
    pub fn from_json_lines<F>(&self, text: &str, callback: F) -> Result<usize, HttpTypesError>
    where
        F: FnMut(Exchange),
    {
        let exchanges = self.read_all(text)?;
        Ok(deliver(exchanges, callback))
    }

    /// Same as [`from_json_lines`](Self::from_json_lines), reading lines from `reader`.
    ///
    /// No more than `max_line_bytes` plus a line terminator is buffered for a single line.
    pub fn read_json_lines<R, F>(&self, mut reader: R, callback: F) -> Result<usize, HttpTypesError>
    where
        R: BufRead,
        F: FnMut(Exchange),
    {
        // room for the document and a `\r\n` terminator
        let limit = u64::try_from(self.max_line_bytes.saturating_add(2)).unwrap_or(u64::MAX);
        let mut exchanges = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            line_number += 1;
            buf.clear();

            let read = reader
                .by_ref()
                .take(limit)
                .read_until(b'\n', &mut buf)
                .map_err(|e| HttpTypesError::at_line(line_number, ParseError::io(e).into()))?;
            if read == 0 {
                break;
            }

            if !buf.ends_with(b"\n") && u64::try_from(read).is_ok_and(|read| read == limit) {
                let e = ParseError::too_large_line(read, self.max_line_bytes);
                error!(line = line_number, cause = %e, "failed to read exchange, abort");
                return Err(HttpTypesError::at_line(line_number, e.into()));
            }

            let line = std::str::from_utf8(&buf).map_err(|e| {
                HttpTypesError::at_line(line_number, ParseError::io(io::Error::new(io::ErrorKind::InvalidData, e)).into())
            })?;
            let line = line.trim_end_matches('\n').trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            exchanges.push(self.parse_line(line_number, line)?);
        }

        Ok(deliver(exchanges, callback))
    }

    fn parse_line(&self, line_number: usize, line: &str) -> Result<Exchange, HttpTypesError> {
        match self.from_json(line) {
            Ok(exchange) => {
                trace!(line = line_number, bytes = line.len(), "read exchange");
                Ok(exchange)
            }
            Err(e) => {
                error!(line = line_number, cause = %e, "failed to read exchange, abort");
                Err(HttpTypesError::at_line(line_number, e))
            }
        }
    }
}

fn deliver<F: FnMut(Exchange)>(exchanges: Vec<Exchange>, callback: F) -> usize {
    let count = exchanges.len();
    exchanges.into_iter().for_each(callback);
    debug!(count, "finished reading json lines");
    count
}

/// Iterator over the exchanges of JSON lines text, see [`ExchangeReader::exchanges`].
#[derive(Debug)]
pub struct JsonLines<'a> {
    reader: ExchangeReader,
    lines: Enumerate<Lines<'a>>,
    failed: bool,
}

impl Iterator for JsonLines<'_> {
    type Item = Result<Exchange, HttpTypesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for (index, line) in self.lines.by_ref() {
            if line.trim().is_empty() {
                continue;
            }

            let result = self.reader.parse_line(index + 1, line);
            self.failed = result.is_err();
            return Some(result);
        }

        None
    }
}

impl FusedIterator for JsonLines<'_> {}
