//! Loosely typed input shapes of the JSON wire format.
//!
//! Every field is optional here so that missing fields can be reported by name, in a fixed
//! order, once the document has been parsed. Conversion into the [`protocol`](crate::protocol)
//! types performs the normalization: enum case folding, status code coercion, timestamp
//! parsing, and choosing between the `path` and `pathname` + `query` request shapes.

use serde::Deserialize;

use crate::protocol::timestamp::parse_timestamp;
use crate::protocol::{
    Exchange, HttpMethod, HttpProtocol, MultiValueMap, Request, RequestParts, Response, ResponseParts,
    ValidationError, parse_status_code,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RawExchange {
    request: Option<RawRequest>,
    response: Option<RawResponse>,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    timestamp: Option<String>,
    method: Option<String>,
    protocol: Option<String>,
    host: Option<String>,
    headers: Option<MultiValueMap>,
    body: Option<String>,
    path: Option<String>,
    pathname: Option<String>,
    query: Option<MultiValueMap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    timestamp: Option<String>,
    status_code: Option<RawStatusCode>,
    headers: Option<MultiValueMap>,
    body: Option<String>,
}

/// A status code written either as a JSON number or as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawStatusCode {
    Number(serde_json::Number),
    Text(String),
}

impl TryFrom<RawStatusCode> for u16 {
    type Error = ValidationError;

    fn try_from(raw: RawStatusCode) -> Result<Self, Self::Error> {
        match raw {
            RawStatusCode::Number(number) => number
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .ok_or_else(|| ValidationError::invalid_status_code(number)),
            RawStatusCode::Text(text) => parse_status_code(&text),
        }
    }
}

impl TryFrom<RawExchange> for Exchange {
    type Error = ValidationError;

    fn try_from(raw: RawExchange) -> Result<Self, Self::Error> {
        let request = raw.request.ok_or(ValidationError::missing("request"))?;
        let response = raw.response.ok_or(ValidationError::missing("response"))?;

        Ok(Exchange::new(request.try_into()?, response.try_into()?))
    }
}

impl TryFrom<RawRequest> for Request {
    type Error = ValidationError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        let method = raw.method.as_deref().map(str::parse::<HttpMethod>).transpose()?;
        let protocol = raw.protocol.as_deref().map(str::parse::<HttpProtocol>).transpose()?;

        let parts = RequestParts { method, protocol, host: raw.host, headers: raw.headers, body: raw.body, ..Default::default() };

        let request = match (raw.path, raw.pathname) {
            (Some(path), _) => Request::from_path(parts, path)?,
            (None, Some(pathname)) => Request::assemble(parts, None, Some(pathname), raw.query)?,
            (None, None) => return Err(ValidationError::MissingPath),
        };

        // timestamps are checked only once every required field is known to be present
        Ok(request.with_timestamp(parse_timestamp(raw.timestamp.as_deref())?))
    }
}

impl TryFrom<RawResponse> for Response {
    type Error = ValidationError;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        let status_code = raw.status_code.map(u16::try_from).transpose()?;

        let response =
            Response::from_parts(ResponseParts { timestamp: None, status_code, headers: raw.headers, body: raw.body })?;
        Ok(response.with_timestamp(parse_timestamp(raw.timestamp.as_deref())?))
    }
}
