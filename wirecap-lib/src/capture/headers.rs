use http::header::InvalidHeaderValue;
use http::{HeaderMap, HeaderValue};

/// Ordered header fields that keep the exact casing of their names
///
/// `http::HeaderMap` lowercases names, which loses the bytes a replay tool
/// needs. Each name maps to one or more values; a name may also carry no
/// value at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    entries: Vec<(String, Vec<HeaderValue>)>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, merging with an existing entry of the same name
    pub fn append(&mut self, name: impl Into<String>, value: HeaderValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    pub fn append_str(&mut self, name: impl Into<String>, value: &str) -> Result<(), InvalidHeaderValue> {
        self.append(name, HeaderValue::from_str(value)?);
        Ok(())
    }

    /// Register a name without values
    pub fn insert_empty(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.entries.iter().any(|(n, _)| *n == name) {
            self.entries.push((name, Vec::new()));
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&[HeaderValue]> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// First value of `name`, if it is valid visible ASCII
    pub fn first_str(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .and_then(|v| v.to_str().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderValue])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// One `(name, value)` pair per value, in order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from a transport header map, normalizing names to Train-Case
    pub fn from_header_map_train_case(map: &HeaderMap) -> Self {
        let mut fields = Self::new();
        for (name, value) in map {
            fields.append(train_case(name.as_str()), value.clone());
        }
        fields
    }
}

/// `content-type` -> `Content-Type`
///
/// Only the first character of each dash-separated segment is touched.
pub fn train_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('-').enumerate() {
        if i > 0 {
            out.push('-');
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
