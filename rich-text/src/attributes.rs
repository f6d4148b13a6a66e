//! Attribute names and values of attachment markers
//!
//! Markers speak two dialects for the same keys:
//!
//! - wire keys: kebab-case HTML attribute names (`content-type`)
//! - domain keys: camelCase keys used by JSON payloads and attachables (`contentType`)
//!
//! [`to_wire_key`] and [`to_domain_key`] convert between them with `heck` (either accepts
//! any casing: kebab, snake, camel or studly), and [`filter_allowed`] reduces a mapping to the fixed
//! allow-list in [`ATTRIBUTES`], in allow-list order. Values are never coerced here.

use crate::fragment::nodes;
use crate::fragment::Handle;
use heck::{ToKebabCase, ToLowerCamelCase};
use indexmap::IndexMap;

/// Recognized marker attributes, in the order they are emitted
pub const ATTRIBUTES: [&str; 11] = [
    "sgid",
    "content-type",
    "url",
    "href",
    "filename",
    "filesize",
    "width",
    "height",
    "previewable",
    "presentation",
    "caption",
];

/// Which dialect a key should be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Wire,
    Domain,
}

impl Direction {
    pub fn key(self, key: &str) -> String {
        match self {
            Direction::Wire => to_wire_key(key),
            Direction::Domain => to_domain_key(key),
        }
    }
}

/// Ordered string attributes. Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every attribute of an element node, in source order
    pub fn from_node(node: &Handle) -> Self {
        nodes::attributes(node).into_iter().collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// `other` wins on key collisions
    pub fn merge(mut self, other: Attributes) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// `contentType` → `content-type`
pub fn to_wire_key(key: &str) -> String {
    key.to_kebab_case()
}

/// `content-type` → `contentType`
pub fn to_domain_key(key: &str) -> String {
    key.to_lower_camel_case()
}

/// Keep only allow-listed keys, re-keyed into `direction`, ordered like [`ATTRIBUTES`].
///
/// When two input keys collapse onto the same allowed key (`contentType` and
/// `content-type`), the later one wins.
pub fn filter_allowed(attributes: &Attributes, direction: Direction) -> Attributes {
    let converted: IndexMap<String, &str> = attributes
        .iter()
        .map(|(key, value)| (direction.key(key), value))
        .collect();

    ATTRIBUTES
        .iter()
        .map(|name| direction.key(name))
        .filter_map(|name| converted.get(&name).map(|value| (name, *value)))
        .collect()
}
