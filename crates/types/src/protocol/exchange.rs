use serde::Serialize;

use crate::protocol::{Request, Response};

/// A recorded request paired with the response it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    request: Request,
    response: Response,
}

impl Exchange {
    pub fn new(request: Request, response: Response) -> Self {
        Self { request, response }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Consumes the exchange and returns the request and response.
    pub fn into_parts(self) -> (Request, Response) {
        (self.request, self.response)
    }
}

impl From<(Request, Response)> for Exchange {
    #[inline]
    fn from((request, response): (Request, Response)) -> Self {
        Self::new(request, response)
    }
}
