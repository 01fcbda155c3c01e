use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a selectable item.
///
/// Ids arrive as numeric database keys, as markup attribute strings, or as
/// client-generated temporary tokens. All of them are normalized to a trimmed,
/// non-empty string here so that every map lookup compares like with like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Parse an id from raw text. Returns None for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<ItemId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ItemId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId(n.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId(n.to_string())
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wire shape of an id: servers send either `"12"` or `12`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Text(s) => {
                ItemId::parse(&s).ok_or_else(|| serde::de::Error::custom("empty item id"))
            }
            RawId::Unsigned(n) => Ok(ItemId::from(n)),
            RawId::Signed(n) => Ok(ItemId::from(n)),
        }
    }
}

/// A selectable item: identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Item {
            id,
            name: name.into(),
        }
    }
}
