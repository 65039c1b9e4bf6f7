//! Canonical HTTP response of a recorded exchange.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::protocol::{MultiValueMap, ValidationError, timestamp};

/// The optional-field form of a response; `status_code` and `headers` are required.
#[derive(Debug, Clone, Default)]
pub struct ResponseParts {
    pub timestamp: Option<DateTime<Utc>>,
    pub status_code: Option<u16>,
    pub headers: Option<MultiValueMap>,
    pub body: Option<String>,
}

/// A validated, immutable HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "timestamp::serialize")]
    timestamp: Option<DateTime<Utc>>,
    status_code: u16,
    headers: MultiValueMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl Response {
    pub fn new(status_code: u16, headers: MultiValueMap) -> Self {
        Self { timestamp: None, status_code, headers, body: None }
    }

    /// Builds a response from its parts, checking `statusCode` then `headers`.
    pub fn from_parts(parts: ResponseParts) -> Result<Self, ValidationError> {
        let ResponseParts { timestamp, status_code, headers, body } = parts;

        let status_code = status_code.ok_or(ValidationError::missing("statusCode"))?;
        let headers = headers.ok_or(ValidationError::missing("headers"))?;

        Ok(Self { timestamp, status_code, headers, body })
    }

    pub(crate) fn with_timestamp(mut self, timestamp: Option<DateTime<Utc>>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> Option<&DateTime<Utc>> {
        self.timestamp.as_ref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &MultiValueMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// Parses a status code given as text, e.g. `"200"`.
pub fn parse_status_code(value: &str) -> Result<u16, ValidationError> {
    value.trim().parse::<u16>().map_err(|_| ValidationError::invalid_status_code(value))
}

/// Converts into an `http::Response`; fails for status codes outside `100..=999` or invalid headers.
impl TryFrom<&Response> for http::Response<Option<String>> {
    type Error = http::Error;

    fn try_from(response: &Response) -> Result<Self, Self::Error> {
        let mut builder = http::Response::builder().status(response.status_code);

        for (name, value) in response.headers.pairs() {
            builder = builder.header(name, value);
        }

        builder.body(response.body.clone())
    }
}
