//! Canonical in-memory model of a recorded HTTP exchange.
//!
//! Everything in this module is validated at construction and immutable afterwards. The
//! [`codec`](crate::codec) module is responsible for getting values in and out of JSON.
//!
//! # Architecture
//!
//! - **Multi-value maps** ([`multi_value`]): case-insensitive name to ordered values
//!   - [`MultiValueMap`]: backs both request/response headers and the request query
//!   - [`RawValues`]: the string-or-array shape of loosely typed input
//!
//! - **Enumerations**: [`HttpMethod`] and [`HttpProtocol`], lowercase on the wire,
//!   parsed case-insensitively
//!
//! - **Messages**:
//!   - [`Request`]: built from a full path or from a pathname plus query ([`RequestParts`])
//!   - [`Response`]: status code, headers, optional body ([`ResponseParts`])
//!   - [`Exchange`]: the request paired with its response
//!
//! - **Helpers**: [`query`] for path splitting and query-string encoding, [`timestamp`]
//!   for ISO-8601 timestamps
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpTypesError`]: Top-level error type
//!   - [`ParseError`]: input that is not a readable JSON document
//!   - [`ValidationError`]: a JSON document that does not describe a valid exchange

mod exchange;
pub use exchange::Exchange;

mod method;
pub use method::HttpMethod;

mod http_protocol;
pub use http_protocol::HttpProtocol;

pub mod multi_value;
pub use multi_value::MultiValueMap;
pub use multi_value::RawValues;

pub mod query;

mod request;
pub use request::Request;
pub use request::RequestParts;

mod response;
pub use response::Response;
pub use response::ResponseParts;
pub use response::parse_status_code;

pub mod timestamp;

pub mod error;
pub use error::HttpTypesError;
pub use error::ParseError;
pub use error::ValidationError;
