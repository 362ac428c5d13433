//! Core domain types for roster - no IO, no async.
//!
//! These types describe the data that crosses the boundary between the
//! presentation layer (`roster-ui`) and the data-access layer
//! (`roster-client`): the raw query the user submits, and the ordered set of
//! name records the collection endpoint answers with.

use serde::Deserialize;
use std::fmt;

/// Raw user input captured at submission time.
///
/// The value is forwarded to the data layer opaque and unvalidated: created
/// when a submission fires, consumed by the fetch that follows, never
/// retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One record from the collection endpoint.
///
/// Only `name` is required; any extra fields the endpoint attaches are
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NameRecord {
    pub name: String,
}

impl NameRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One complete endpoint response, in endpoint order.
///
/// A `ResultSet` is finite and represents a single response, not a stream;
/// the order the endpoint returned is the order callers observe.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResultSet(Vec<NameRecord>);

impl ResultSet {
    #[must_use]
    pub fn new(records: Vec<NameRecord>) -> Self {
        Self(records)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameRecord> {
        self.0.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = NameRecord;
    type IntoIter = std::vec::IntoIter<NameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a NameRecord;
    type IntoIter = std::slice::Iter<'a, NameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<NameRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = NameRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
