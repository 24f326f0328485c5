//! Item records: checklist entries, owned inventory records, and the merged view.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::DEFAULT_QUANTITY_FORMATTED;

/// Catalog identifier for an item.
///
/// The host game sends these as numbers in some payloads and strings in others,
/// so both are accepted and normalized to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
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
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(Self(text)),
            RawId::Number(number) => Ok(Self::from(number)),
        }
    }
}

/// A checklist entry. Compiled in per category and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub item_id: ItemId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_gray: Option<String>,
}

impl RequiredItem {
    #[must_use]
    pub fn new(
        item_id: impl Into<ItemId>,
        item_type: impl Into<String>,
        name: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            item_type: item_type.into(),
            name: name.into(),
            thumbnail: thumbnail.into(),
            thumbnail_gray: None,
        }
    }

    #[must_use]
    pub fn with_thumbnail_gray(mut self, thumbnail_gray: impl Into<String>) -> Self {
        self.thumbnail_gray = Some(thumbnail_gray.into());
        self
    }
}

/// An inventory record as reported by the host game.
///
/// Every field is optional on the wire. Empty strings, `null`, and values of
/// the wrong shape all decode to `None` rather than failing the record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OwnedItem {
    #[serde(default, deserialize_with = "lenient::item_id")]
    pub item_id: Option<ItemId>,
    #[serde(rename = "type", default, deserialize_with = "lenient::key")]
    pub item_type: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub thumbnail_gray: Option<String>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub quantity_formatted: Option<String>,
}

impl OwnedItem {
    /// Owned record with a type and a quantity; the formatted quantity mirrors the count.
    #[must_use]
    pub fn new(item_type: impl Into<String>, quantity: u64) -> Self {
        Self {
            item_type: item_type.into(),
            quantity: Some(quantity),
            quantity_formatted: Some(quantity.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_thumbnails(
        mut self,
        thumbnail: impl Into<String>,
        thumbnail_gray: Option<String>,
    ) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self.thumbnail_gray = thumbnail_gray;
        self
    }

    #[must_use]
    pub fn with_quantity_formatted(mut self, formatted: impl Into<String>) -> Self {
        self.quantity_formatted = Some(formatted.into());
        self
    }
}

/// Merged view of a checklist entry and its owned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledItem {
    pub item_id: Option<ItemId>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    /// Resolved display image.
    pub thumbnail: String,
    pub quantity: u64,
    pub quantity_formatted: String,
    /// Limited edition: owned but absent from the checklist.
    pub le: bool,
}

impl ReconciledItem {
    /// Placeholder for a checklist entry with no owned record.
    #[must_use]
    pub fn unowned(required: &RequiredItem) -> Self {
        Self {
            item_id: Some(required.item_id.clone()),
            item_type: required.item_type.clone(),
            name: required.name.clone(),
            thumbnail: required.thumbnail.clone(),
            quantity: 0,
            quantity_formatted: DEFAULT_QUANTITY_FORMATTED.to_string(),
            le: false,
        }
    }

    #[must_use]
    pub const fn is_collected(&self) -> bool {
        self.quantity > 0
    }

    #[must_use]
    pub fn tile_state(&self) -> TileState<'_> {
        let collected = self.is_collected();
        TileState {
            collected,
            limited_edition: collected && self.le,
            badge: collected.then_some(self.quantity_formatted.as_str()),
        }
    }
}

/// What a presentation layer needs to draw one item tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileState<'a> {
    pub collected: bool,
    /// Only set on collected items.
    pub limited_edition: bool,
    /// Quantity badge text, present only when collected.
    pub badge: Option<&'a str>,
}

mod lenient {
    use super::ItemId;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn item_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(text)) if !text.is_empty() => Some(ItemId::new(text)),
            Some(Value::Number(number)) => Some(ItemId::new(number.to_string())),
            _ => None,
        })
    }

    pub fn key<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.unwrap_or_default())
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(text)) if !text.is_empty() => Some(text),
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        })
    }

    pub fn quantity<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(number)) => number.as_u64(),
            Some(Value::String(text)) => text.trim().replace(',', "").parse().ok(),
            _ => None,
        })
    }
}
