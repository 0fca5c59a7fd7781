// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for gettext-json
//!
//! A decoded catalog is a flat list of [`CatalogEntry`] values. The
//! normalizer folds that list into a [`CatalogDocument`]: one
//! [`MessageFamily`] per base message key, in a deterministic order.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Key of a single decoded catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    /// A singular message, or the header when the text is empty.
    Plain(String),
    /// One variant of a plural message.
    Plural(String, u32),
}

impl CatalogKey {
    pub fn plain(text: impl Into<String>) -> Self {
        CatalogKey::Plain(text.into())
    }

    pub fn plural(text: impl Into<String>, ordinal: u32) -> Self {
        CatalogKey::Plural(text.into(), ordinal)
    }

    /// The base text this key groups under.
    pub fn text(&self) -> &str {
        match self {
            CatalogKey::Plain(text) | CatalogKey::Plural(text, _) => text,
        }
    }

    pub fn ordinal(&self) -> Option<u32> {
        match self {
            CatalogKey::Plain(_) => None,
            CatalogKey::Plural(_, ordinal) => Some(*ordinal),
        }
    }

    /// The empty plain key is reserved for the header blob.
    pub fn is_header(&self) -> bool {
        matches!(self, CatalogKey::Plain(text) if text.is_empty())
    }
}

// Text first, then ordinal. A plain key orders before any plural key of
// the same text so the sort stays total.
impl Ord for CatalogKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text()
            .cmp(other.text())
            .then_with(|| self.ordinal().cmp(&other.ordinal()))
    }
}

impl PartialOrd for CatalogKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKey::Plain(text) => write!(f, "{:?}", text),
            CatalogKey::Plural(text, ordinal) => write!(f, "{:?}[{}]", text, ordinal),
        }
    }
}

/// A key and its translated text. An empty value means "untranslated".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: CatalogKey,
    pub value: String,
}

impl CatalogEntry {
    pub fn new(key: CatalogKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Insertion-ordered map backed by a key list plus an index.
///
/// Re-inserting an existing key replaces the value but keeps the key at
/// the position of its first insertion.
#[derive(Debug, Clone)]
pub struct OrderedTable<V> {
    keys: Vec<String>,
    values: Vec<V>,
    index: HashMap<String, usize>,
}

impl<V> OrderedTable<V> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Insert or overwrite. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.values[slot], value)),
            None => {
                self.index.insert(key.clone(), self.keys.len());
                self.keys.push(key);
                self.values.push(value);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.values[slot])
    }

    /// Mutable access to the value under `key`, inserting `default()` first
    /// if the key is new.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.keys.len();
                self.index.insert(key.to_string(), slot);
                self.keys.push(key.to_string());
                self.values.push(default());
                slot
            }
        };
        &mut self.values[slot]
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.keys.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Rebuild the table with every value mapped, keeping the key order.
    pub fn map_values<W>(self, f: impl FnMut(V) -> W) -> OrderedTable<W> {
        OrderedTable {
            keys: self.keys,
            values: self.values.into_iter().map(f).collect(),
            index: self.index,
        }
    }
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for OrderedTable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl<V: Eq> Eq for OrderedTable<V> {}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = OrderedTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<V: Serialize> Serialize for OrderedTable<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Header fields keyed by normalized name (`content_type`, `plural_forms`, ...).
pub type HeaderTable = OrderedTable<String>;

/// Everything the document holds for one base message key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageFamily {
    Header(HeaderTable),
    /// Serialized as `[null, translation]`; the null slot is reserved.
    Singular(String),
    /// Variants indexed by plural ordinal, starting at 0.
    Plural(Vec<String>),
}

impl Serialize for MessageFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MessageFamily::Header(table) => table.serialize(serializer),
            MessageFamily::Singular(translation) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&None::<String>)?;
                seq.serialize_element(translation)?;
                seq.end()
            }
            MessageFamily::Plural(variants) => variants.serialize(serializer),
        }
    }
}

/// The normalized catalog: base key -> family, in first-sorted-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDocument {
    families: OrderedTable<MessageFamily>,
}

impl CatalogDocument {
    pub fn new(families: OrderedTable<MessageFamily>) -> Self {
        Self { families }
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&MessageFamily> {
        self.families.get(key)
    }

    /// The parsed header, if the catalog carried one.
    pub fn header(&self) -> Option<&HeaderTable> {
        match self.families.get("") {
            Some(MessageFamily::Header(table)) => Some(table),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.families.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageFamily)> {
        self.families.iter()
    }
}

impl Serialize for CatalogDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.families.serialize(serializer)
    }
}
