//! Canonical HTTP request of a recorded exchange.
//!
//! A request target can be described two ways: as a full `path` string that includes the
//! query, or as a `pathname` plus a `query` map. Both constructors produce the same
//! normalized [`Request`], which always carries all three fields derived consistently.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::protocol::query::{decode_query, join_path, split_path};
use crate::protocol::{HttpMethod, HttpProtocol, MultiValueMap, ValidationError, timestamp};

/// The optional-field half of a request, shared by both constructors.
///
/// `method`, `protocol`, `host` and `headers` are required; leaving one as `None` makes
/// construction fail with [`ValidationError::MissingField`].
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    pub timestamp: Option<DateTime<Utc>>,
    pub method: Option<HttpMethod>,
    pub protocol: Option<HttpProtocol>,
    pub host: Option<String>,
    pub headers: Option<MultiValueMap>,
    pub body: Option<String>,
}

/// A validated, immutable HTTP request.
///
/// Invariant: `path` is `pathname`, followed by `?` and the encoded `query` when the query
/// is non-empty. Only a request built with [`Request::from_path`] keeps the caller's own
/// spelling of the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "timestamp::serialize")]
    timestamp: Option<DateTime<Utc>>,
    method: HttpMethod,
    protocol: HttpProtocol,
    host: String,
    headers: MultiValueMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    path: String,
    pathname: String,
    query: MultiValueMap,
}

impl Request {
    /// Builds a request from a full path, deriving `pathname` and `query` by parsing it.
    ///
    /// The path is kept verbatim.
    pub fn from_path(parts: RequestParts, path: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.into();
        let (pathname, query) = split_path(&path);
        let pathname = pathname.to_string();
        let query = decode_query(query)?;

        Self::assemble(parts, Some(path), Some(pathname), Some(query))
    }

    /// Builds a request from a pathname and query, deriving `path` by encoding them.
    pub fn from_pathname_and_query(
        parts: RequestParts,
        pathname: impl Into<String>,
        query: MultiValueMap,
    ) -> Result<Self, ValidationError> {
        Self::assemble(parts, None, Some(pathname.into()), Some(query))
    }

    /// Checks required fields in a fixed order: method, protocol, host, headers, pathname, query.
    pub(crate) fn assemble(
        parts: RequestParts,
        path: Option<String>,
        pathname: Option<String>,
        query: Option<MultiValueMap>,
    ) -> Result<Self, ValidationError> {
        let RequestParts { timestamp, method, protocol, host, headers, body } = parts;

        let method = method.ok_or(ValidationError::missing("method"))?;
        let protocol = protocol.ok_or(ValidationError::missing("protocol"))?;
        let host = host.ok_or(ValidationError::missing("host"))?;
        let headers = headers.ok_or(ValidationError::missing("headers"))?;
        let pathname = pathname.ok_or(ValidationError::missing("pathname"))?;
        let query = query.ok_or(ValidationError::missing("query"))?;

        let path = match path {
            Some(path) => path,
            None => join_path(&pathname, &query)?,
        };

        Ok(Self { timestamp, method, protocol, host, headers, body, path, pathname, query })
    }

    pub(crate) fn with_timestamp(mut self, timestamp: Option<DateTime<Utc>>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> Option<&DateTime<Utc>> {
        self.timestamp.as_ref()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn protocol(&self) -> HttpProtocol {
        self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn headers(&self) -> &MultiValueMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the full path, including the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path without the query string.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn query(&self) -> &MultiValueMap {
        &self.query
    }

    /// Returns the absolute URL `protocol://host/path` the request was sent to.
    ///
    /// A path that does not start with `/` is joined to the host with one.
    pub fn url(&self) -> String {
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        format!("{}://{}{separator}{}", self.protocol, self.host, self.path)
    }
}

/// Converts into an `http::Request`; fails if the host, path or a header is not valid for the `http` crate.
impl TryFrom<&Request> for http::Request<Option<String>> {
    type Error = http::Error;

    fn try_from(request: &Request) -> Result<Self, Self::Error> {
        let mut builder = http::Request::builder().method(http::Method::from(request.method)).uri(request.url());

        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        builder.body(request.body.clone())
    }
}
