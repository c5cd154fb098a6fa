//! The signed header set produced for one call.

use std::collections::BTreeMap;
use std::fmt;

use crate::headers;

/// Header name to one-or-more values, ordered by name.
pub type HeaderMultiMap = BTreeMap<String, Vec<String>>;

/// Authentication headers produced by a [`Signer`](crate::Signer) for one call.
///
/// A set is built fresh per call and never cached, since the fingerprint
/// differs every time. The `Debug` rendering masks the signature value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignedHeaderSet {
    headers: HeaderMultiMap,
}

impl SignedHeaderSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the known gateway headers out of a received header map.
    ///
    /// Header names are matched exactly; unrelated headers are ignored.
    pub fn from_headers<'a>(received: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut set = Self::new();
        for (name, value) in received {
            if name == headers::SIGNATURE || headers::SIGNED_FIELDS.contains(&name) {
                set.append(name, value);
            }
        }
        set
    }

    /// Set a header to a single value, replacing any previous values.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), vec![value.into()]);
    }

    /// Add a value to a header, keeping previous values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// First value of the given header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of the given header.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.headers
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Iterate headers in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Borrow the underlying multimap.
    #[must_use]
    pub fn as_multimap(&self) -> &HeaderMultiMap {
        &self.headers
    }

    /// Consume the set, returning the underlying multimap.
    #[must_use]
    pub fn into_multimap(self) -> HeaderMultiMap {
        self.headers
    }
}

impl fmt::Debug for SignedHeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, values) in &self.headers {
            if name == headers::SIGNATURE {
                map.entry(name, &"***");
            } else {
                map.entry(name, values);
            }
        }
        map.finish()
    }
}
