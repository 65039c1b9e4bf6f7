//! Case-insensitive multi-value map shared by headers and query parameters.
//!
//! A [`MultiValueMap`] maps a name to an ordered, non-empty list of string values. Lookups
//! ignore case (Unicode lowercase folding), while the casing of the first occurrence of a
//! name is kept so the map serializes back the way it was written. The map is built once and
//! only read afterwards.
//!
//! On the wire a name with exactly one value is a bare string and a name with more values is
//! an array of strings:
//!
//! ```json
//! { "content-type": "text/html", "set-cookie": ["a=1", "b=2"] }
//! ```

use std::collections::{HashMap, hash_map};
use std::fmt;

use http::HeaderMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single-or-many value as it appears in raw input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawValues {
    One(String),
    Many(Vec<String>),
}

impl RawValues {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            RawValues::One(value) => vec![value],
            RawValues::Many(values) => values,
        }
    }
}

impl From<&str> for RawValues {
    fn from(value: &str) -> Self {
        RawValues::One(value.to_string())
    }
}

impl From<String> for RawValues {
    fn from(value: String) -> Self {
        RawValues::One(value)
    }
}

impl From<Vec<String>> for RawValues {
    fn from(values: Vec<String>) -> Self {
        RawValues::Many(values)
    }
}

impl From<Vec<&str>> for RawValues {
    fn from(values: Vec<&str>) -> Self {
        RawValues::Many(values.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    values: Vec<String>,
}

/// Ordered, case-insensitive mapping from a name to one or more string values.
///
/// No entry ever holds zero values: supplying an empty list for a name is the same as not
/// supplying the name at all. Names are compared by their [`str::to_lowercase`] form.
#[derive(Debug, Clone, Default)]
pub struct MultiValueMap {
    entries: Vec<Entry>,
    // lowercased name -> position in `entries`
    index: HashMap<String, usize>,
}

impl PartialEq for MultiValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for MultiValueMap {}

impl MultiValueMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from names paired with a single-or-many [`RawValues`].
    pub fn from_raw<I, K>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValues)>,
        K: Into<String>,
    {
        let mut map = Self::new();
        for (name, values) in iter {
            map.append(name.into(), values.into_vec());
        }
        map
    }

    /// Builds a map from names paired with an ordered list of values.
    pub fn from_multi<I, K, Vs, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Vs)>,
        K: Into<String>,
        Vs: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (name, values) in iter {
            map.append(name.into(), values.into_iter().map(Into::into));
        }
        map
    }

    // Only used while the map is being built; there is no public mutation.
    fn append<I: IntoIterator<Item = String>>(&mut self, name: String, values: I) {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }

        match self.index.entry(name.to_lowercase()) {
            hash_map::Entry::Occupied(slot) => self.entries[*slot.get()].values.extend(values),
            hash_map::Entry::Vacant(slot) => {
                slot.insert(self.entries.len());
                self.entries.push(Entry { name, values: values.collect() });
            }
        }
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.index.get(&name.to_lowercase()).map(|&position| &self.entries[position])
    }

    /// Returns the first value for `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name).and_then(|entry| entry.values.first()).map(String::as_str)
    }

    /// Returns every value for `name` in the order supplied, or an empty slice if absent.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name).map(|entry| entry.values.as_slice()).unwrap_or_default()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Returns the number of distinct names.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over names with their values, in first-insertion order of names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    /// Iterates over every `(name, value)` pair, names in insertion order and values in
    /// supplied order within a name.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|entry| entry.values.iter().map(move |value| (entry.name.as_str(), value.as_str())))
    }
}

/// Collects `(name, value)` pairs, accumulating repeated names in order of appearance.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MultiValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.append(name.into(), std::iter::once(value.into()));
        }
        map
    }
}

/// Header values that are not valid UTF-8 are converted lossily.
impl From<&HeaderMap> for MultiValueMap {
    fn from(headers: &HeaderMap) -> Self {
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
            .collect()
    }
}

impl Serialize for MultiValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            match entry.values.as_slice() {
                [single] => map.serialize_entry(&entry.name, single)?,
                values => map.serialize_entry(&entry.name, values)?,
            }
        }
        map.end()
    }
}

/// Deserializes from a JSON object, keeping the document order of its keys.
impl<'de> Deserialize<'de> for MultiValueMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MultiValueMapVisitor;

        impl<'de> Visitor<'de> for MultiValueMapVisitor {
            type Value = MultiValueMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of names to a string or an array of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = MultiValueMap::new();
                while let Some((name, values)) = access.next_entry::<String, RawValues>()? {
                    map.append(name, values.into_vec());
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MultiValueMapVisitor)
    }
}
