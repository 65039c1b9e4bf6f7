use std::fmt;
use std::str::FromStr;

use http::uri::Scheme;
use serde::{Serialize, Serializer};

use crate::protocol::ValidationError;

/// The protocol a request was sent over, `http` or `https` on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HttpProtocol {
    Http,
    Https,
}

impl HttpProtocol {
    pub const ALL: [HttpProtocol; 2] = [HttpProtocol::Http, HttpProtocol::Https];

    /// Returns the canonical lowercase wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpProtocol::Http => "http",
            HttpProtocol::Https => "https",
        }
    }
}

impl FromStr for HttpProtocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpProtocol::ALL
            .into_iter()
            .find(|protocol| protocol.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::unknown_variant("protocol", s))
    }
}

impl fmt::Display for HttpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HttpProtocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<HttpProtocol> for Scheme {
    fn from(protocol: HttpProtocol) -> Self {
        match protocol {
            HttpProtocol::Http => Scheme::HTTP,
            HttpProtocol::Https => Scheme::HTTPS,
        }
    }
}
