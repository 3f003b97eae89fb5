//! # License Field Parsing
//!
//! Turns the `Key: Value` listing produced by the structuring step into an
//! ordered field map.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

/// An insertion-ordered map of license field names to their values.
///
/// Re-inserting an existing key replaces its value but keeps its original
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseFields {
    entries: Vec<(String, String)>,
}

impl LicenseFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LicenseFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl Serialize for LicenseFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parses a `Key: Value` listing into [`LicenseFields`].
///
/// Each line is split on its first colon and both halves are trimmed. Lines
/// without a colon are dropped. Later duplicates overwrite earlier values.
pub fn parse_license_fields(listing: &str) -> LicenseFields {
    let mut fields = LicenseFields::new();
    for line in listing.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        debug!("Parsed field: {} = {}", key, value);
        fields.insert(key, value);
    }
    fields
}
