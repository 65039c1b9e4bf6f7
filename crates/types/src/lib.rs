//! Read and write recorded HTTP exchanges in the HTTP Types JSON lines format
//!
//! This crate models a single HTTP request/response pair (an [`Exchange`]) and converts it
//! to and from a newline-delimited JSON wire format, so that HTTP traffic can be recorded
//! once and replayed or inspected later. It performs no network I/O; every operation is a
//! pure transformation over in-memory strings and values.
//!
//! # Features
//!
//! - Case-insensitive multi-value maps for headers and query parameters
//! - Lenient input: header values as string or array, mixed-case methods and protocols,
//!   status codes as number or text
//! - Two equivalent ways to describe a request target: a full `path`, or a
//!   `pathname` plus a `query` object
//! - Fail-fast JSON lines reading, either eagerly with a callback or lazily as an iterator
//! - Conversions to and from the `http` crate types
//!
//! # Example
//!
//! ```
//! use micro_http_types::codec::{ExchangeReader, ExchangeWriter};
//! use micro_http_types::protocol::HttpMethod;
//!
//! let line = r#"{"request":{"method":"post","protocol":"https","host":"example.com",
//!     "headers":{"Accept":["text/html","application/json"]},"path":"/search?q=rust&page=2"},
//!     "response":{"statusCode":"200","headers":{"content-type":"text/html"},"body":"ok"}}"#;
//!
//! let exchange = ExchangeReader::new().from_json(line).unwrap();
//! let request = exchange.request();
//!
//! assert_eq!(request.method(), HttpMethod::Post);
//! assert_eq!(request.pathname(), "/search");
//! assert_eq!(request.query().get("page"), Some("2"));
//! assert_eq!(request.headers().get_all("accept").len(), 2);
//! assert_eq!(exchange.response().status_code(), 200);
//!
//! let mut writer = ExchangeWriter::new();
//! writer.write(&exchange).unwrap();
//! assert!(writer.buffer().ends_with('\n'));
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the canonical, validated in-memory model
//! - [`codec`]: the JSON wire format, [`codec::ExchangeReader`] and [`codec::ExchangeWriter`]
//!
//! # Error Handling
//!
//! - [`protocol::HttpTypesError`]: Top-level error type
//! - [`protocol::ParseError`]: the input is not a JSON document we can read
//! - [`protocol::ValidationError`]: the document does not describe a valid exchange
//!
//! Errors are never recovered from: a bad line aborts the whole JSON lines batch.

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

pub use codec::{from_json, from_json_lines, to_json};
pub use protocol::Exchange;
