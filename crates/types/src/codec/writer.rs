//! JSON lines writer for recorded exchanges
//!
//! [`ExchangeWriter`] serializes each exchange to a single JSON line and appends it, with a
//! trailing newline, to an in-memory buffer the caller inspects directly. Requests always
//! carry `path`, `pathname` and `query`; methods and protocols are written in lowercase and
//! multi-value maps use a bare string for a single value and an array otherwise.

use tracing::trace;

use crate::protocol::{Exchange, HttpTypesError};

/// Accumulates exchanges as JSON lines in an owned buffer.
#[derive(Debug, Default, Clone)]
pub struct ExchangeWriter {
    buffer: String,
    count: usize,
}

impl ExchangeWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a writer whose buffer can hold `capacity` bytes without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: String::with_capacity(capacity), count: 0 }
    }

    /// Appends `exchange` as one JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`HttpTypesError::Serialize`] if `serde_json` fails; the buffer is left untouched.
    pub fn write(&mut self, exchange: &Exchange) -> Result<(), HttpTypesError> {
        let line = serde_json::to_string(exchange)?;
        trace!(bytes = line.len(), "write exchange");

        self.buffer.reserve(line.len() + 1);
        self.buffer.push_str(&line);
        self.buffer.push('\n');
        self.count += 1;
        Ok(())
    }

    /// Returns everything written so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns the number of exchanges written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.count = 0;
    }

    /// Consumes the writer and returns the buffer.
    pub fn into_inner(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ExchangeReader;
    use crate::protocol::{
        HttpMethod, HttpProtocol, MultiValueMap, RawValues, Request, RequestParts, Response, ResponseParts,
    };
    use crate::protocol::timestamp::parse_timestamp;

    fn request(path: &str) -> Request {
        let parts = RequestParts {
            timestamp: None,
            method: Some(HttpMethod::Get),
            protocol: Some(HttpProtocol::Https),
            host: Some("example.com".to_string()),
            headers: Some(MultiValueMap::from_raw([("Accept", RawValues::from("*/*"))])),
            body: None,
        };
        Request::from_path(parts, path).unwrap()
    }

    fn response(body: Option<&str>) -> Response {
        Response::from_parts(ResponseParts {
            timestamp: None,
            status_code: Some(200),
            headers: Some(MultiValueMap::new()),
            body: body.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn write_one_line() {
        let mut writer = ExchangeWriter::new();
        writer.write(&Exchange::new(request("/a?x=1"), response(Some("ok")))).unwrap();

        assert_eq!(
            writer.buffer(),
            concat!(
                r#"{"request":{"method":"get","protocol":"https","host":"example.com","headers":{"Accept":"*/*"},"#,
                r#""path":"/a?x=1","pathname":"/a","query":{"x":"1"}},"#,
                r#""response":{"statusCode":200,"headers":{},"body":"ok"}}"#,
                "\n"
            )
        );
        assert_eq!(writer.count(), 1);
    }

    #[test]
    fn multiple_writes_accumulate_lines() {
        let mut writer = ExchangeWriter::new();
        writer.write(&Exchange::new(request("/1"), response(None))).unwrap();
        writer.write(&Exchange::new(request("/2"), response(None))).unwrap();

        let lines: Vec<&str> = writer.buffer().lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(serde_json::from_str::<serde_json::Value>(line).is_ok());
        }
        assert_eq!(writer.count(), 2);

        writer.clear();
        assert!(writer.is_empty());
        assert_eq!(writer.count(), 0);
    }

    #[test]
    fn multi_values_stay_arrays() {
        let parts = RequestParts {
            method: Some(HttpMethod::Put),
            protocol: Some(HttpProtocol::Http),
            host: Some("h".to_string()),
            headers: Some(MultiValueMap::from_raw([("multi-value", RawValues::from(vec!["value1", "value2"]))])),
            ..Default::default()
        };
        let query = MultiValueMap::from_raw([("a", RawValues::from(vec!["b"])), ("v", RawValues::from(vec!["1", "2"]))]);
        let request = Request::from_pathname_and_query(parts, "/a/path", query).unwrap();

        let mut writer = ExchangeWriter::new();
        writer.write(&Exchange::new(request, response(None))).unwrap();
        let value: serde_json::Value = serde_json::from_str(writer.buffer()).unwrap();

        assert_eq!(value["request"]["method"], "put");
        assert_eq!(value["request"]["headers"]["multi-value"], serde_json::json!(["value1", "value2"]));
        assert_eq!(value["request"]["query"]["a"], "b");
        assert_eq!(value["request"]["query"]["v"], serde_json::json!(["1", "2"]));
        assert_eq!(value["request"]["path"], "/a/path?a=b&v=1&v=2");
        assert!(value["request"].get("body").is_none());
        assert!(value["request"].get("timestamp").is_none());
    }

    #[test]
    fn timestamps_are_written_in_utc() {
        let timestamp = parse_timestamp(Some("2018-11-13T21:20:39.5+01:00")).unwrap();
        let response = Response::from_parts(ResponseParts {
            timestamp,
            status_code: Some(500),
            headers: Some(MultiValueMap::new()),
            body: None,
        })
        .unwrap();

        let mut writer = ExchangeWriter::new();
        writer.write(&Exchange::new(request("/"), response)).unwrap();

        assert!(writer.buffer().contains(r#""response":{"timestamp":"2018-11-13T20:20:39.500Z","statusCode":500"#));
    }

    #[test]
    fn read_what_was_written() {
        let original = Exchange::new(request("/search?q=rust+lang&page=2"), response(Some("found")));
        let mut writer = ExchangeWriter::new();
        writer.write(&original).unwrap();

        let read = ExchangeReader::new().read_all(writer.buffer()).unwrap();

        assert_eq!(read, vec![original]);
    }
}
