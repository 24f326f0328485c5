//! Owned-item extraction from the game's inventory page response.
//!
//! The inventory page answers with `page.tabs[].subtabs[].tags[].items[]`.
//! A category's owned items live under the tab whose `type` matches the
//! checklist's tab, in the first subtab, under the first tag whose `type`
//! matches the checklist's tag. Any missing level means the player owns
//! nothing there; that is not an error.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use thiserror::Error;

use crate::InventorySource;
use crate::items::OwnedItem;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top level of an inventory page response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryResponse {
    #[serde(default)]
    pub page: Option<InventoryPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tabs: Vec<InventoryTab>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTab {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub tab_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtabs: Vec<InventorySubtab>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySubtab {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<InventoryTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTag {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub tag_type: String,
    #[serde(default, deserialize_with = "owned_records")]
    pub items: Vec<OwnedItem>,
}

impl InventoryResponse {
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or the page skeleton has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Owned items stored under `tab` / `tag`, or nothing if any level is missing.
    #[must_use]
    pub fn owned_items(&self, tab: &str, tag: &str) -> &[OwnedItem] {
        let Some(page) = &self.page else {
            return &[];
        };
        page.tabs
            .iter()
            .find(|candidate| candidate.tab_type == tab)
            .and_then(|found| found.subtabs.first())
            .and_then(|subtab| subtab.tags.iter().find(|candidate| candidate.tag_type == tag))
            .map(|found| found.items.as_slice())
            .unwrap_or_default()
    }
}

/// Parse an inventory response and pull out the items for one selector pair.
///
/// # Errors
///
/// Returns an error if the response cannot be parsed.
pub fn extract_owned(json: &str, tab: &str, tag: &str) -> Result<Vec<OwnedItem>, InventoryError> {
    let response = InventoryResponse::from_json(json)?;
    Ok(response.owned_items(tab, tag).to_vec())
}

/// In-memory owned-items source keyed by `(tab, tag)`.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    entries: HashMap<(String, String), Vec<OwnedItem>>,
}

impl StaticInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_items(
        mut self,
        tab: impl Into<String>,
        tag: impl Into<String>,
        items: Vec<OwnedItem>,
    ) -> Self {
        self.insert(tab, tag, items);
        self
    }

    pub fn insert(&mut self, tab: impl Into<String>, tag: impl Into<String>, items: Vec<OwnedItem>) {
        self.entries.insert((tab.into(), tag.into()), items);
    }

    /// Index every tag of every tab's first subtab.
    #[must_use]
    pub fn from_response(response: &InventoryResponse) -> Self {
        let mut inventory = Self::new();
        let Some(page) = &response.page else {
            return inventory;
        };
        for tab in &page.tabs {
            let Some(subtab) = tab.subtabs.first() else {
                continue;
            };
            for tag in &subtab.tags {
                let key = (tab.tab_type.clone(), tag.tag_type.clone());
                inventory
                    .entries
                    .entry(key)
                    .or_insert_with(|| tag.items.clone());
            }
        }
        inventory
    }
}

impl InventorySource for StaticInventory {
    type Error = Infallible;

    fn fetch_owned(&self, tab: &str, tag: &str) -> Result<Vec<OwnedItem>, Self::Error> {
        Ok(self
            .entries
            .get(&(tab.to_string(), tag.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode each record on its own; records that are not objects are skipped.
fn owned_records<'de, D>(deserializer: D) -> Result<Vec<OwnedItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<OwnedItem>(value) {
            Ok(item) => Some(item),
            Err(err) => {
                log::warn!("skipping malformed inventory record: {err}");
                None
            }
        })
        .collect())
}
