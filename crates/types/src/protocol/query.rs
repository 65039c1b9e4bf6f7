//! Conversion between a request path string and its pathname and query parts.
//!
//! Query strings follow `application/x-www-form-urlencoded` rules: pairs are separated by
//! `&`, a name is separated from its value by the first `=`, and both are percent-decoded
//! (`+` decodes to a space). A pair without `=` has an empty value.

use crate::protocol::{MultiValueMap, ValidationError};

/// Splits `path` into its pathname and raw query string.
///
/// The split happens at the first `?`. A `#fragment` is not part of either half.
///
/// ```
/// use micro_http_types::protocol::query::split_path;
///
/// assert_eq!(split_path("/index/?a=1&b=2#top"), ("/index/", "a=1&b=2"));
/// assert_eq!(split_path("/index/"), ("/index/", ""));
/// ```
pub fn split_path(path: &str) -> (&str, &str) {
    let path = path.split_once('#').map_or(path, |(before, _fragment)| before);
    path.split_once('?').unwrap_or((path, ""))
}

/// Decodes a raw query string into a [`MultiValueMap`], keeping the order of appearance.
pub fn decode_query(query: &str) -> Result<MultiValueMap, ValidationError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(ValidationError::invalid_query)?;
    Ok(pairs.into_iter().collect())
}

/// Encodes every `(name, value)` pair of `query` into a query string without the leading `?`.
pub fn encode_query(query: &MultiValueMap) -> Result<String, ValidationError> {
    let pairs: Vec<(&str, &str)> = query.pairs().collect();
    serde_urlencoded::to_string(pairs).map_err(ValidationError::invalid_query)
}

/// Rebuilds the full path from a pathname and a query; the `?` is only added for a non-empty query.
pub fn join_path(pathname: &str, query: &MultiValueMap) -> Result<String, ValidationError> {
    let encoded = encode_query(query)?;
    if encoded.is_empty() {
        return Ok(pathname.to_string());
    }

    let mut path = String::with_capacity(pathname.len() + 1 + encoded.len());
    path.push_str(pathname);
    path.push('?');
    path.push_str(&encoded);
    Ok(path)
}
