//! Compiled-in category checklists.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;
use twox_hash::XxHash64;

use crate::constants::{
    AIRSHIPS_CHECKLIST, CHEST_CHECKLIST, CURRENCY_CHECKLIST, EQUIPMENT_CHECKLIST,
    PLANKRUN_CHECKLIST,
};
use crate::items::RequiredItem;

/// Tracked item categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    /// Treasure chests
    Chest,
    Airships,
    Currency,
    Equipment,
    /// Plankrun's torn journal pages
    Plankrun,
}

impl CategoryKey {
    pub const ALL: [Self; 5] = [
        Self::Chest,
        Self::Airships,
        Self::Currency,
        Self::Equipment,
        Self::Plankrun,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Airships => "airships",
            Self::Currency => "currency",
            Self::Equipment => "equipment",
            Self::Plankrun => "plankrun",
        }
    }

    const fn asset(self) -> &'static str {
        match self {
            Self::Chest => CHEST_CHECKLIST,
            Self::Airships => AIRSHIPS_CHECKLIST,
            Self::Currency => CURRENCY_CHECKLIST,
            Self::Equipment => EQUIPMENT_CHECKLIST,
            Self::Plankrun => PLANKRUN_CHECKLIST,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Errors raised while loading or validating checklists.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("category {0} is not in the catalog")]
    MissingCategory(CategoryKey),
    #[error("checklist for {key} could not be parsed: {source}")]
    Parse {
        key: CategoryKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("checklist for {key} declares category {found}")]
    KeyMismatch { key: CategoryKey, found: CategoryKey },
    #[error("checklist for {0} is empty")]
    EmptyChecklist(CategoryKey),
    #[error("checklist for {key} has an entry without a type at index {index}")]
    MissingType { key: CategoryKey, index: usize },
    #[error("checklist for {key} lists {item_type} more than once")]
    DuplicateType { key: CategoryKey, item_type: String },
}

/// One category's required items plus the inventory selector that finds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub key: CategoryKey,
    pub name: String,
    /// Inventory page tab holding these items.
    pub tab: String,
    /// Tag within the tab's first subtab.
    pub tag: String,
    pub items: Vec<RequiredItem>,
}

impl Checklist {
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a checklist.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse and validate the embedded checklist for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is malformed or fails validation.
    pub fn load_static(key: CategoryKey) -> Result<Self, CatalogError> {
        let checklist =
            Self::from_json(key.asset()).map_err(|source| CatalogError::Parse { key, source })?;
        if checklist.key != key {
            return Err(CatalogError::KeyMismatch {
                key,
                found: checklist.key,
            });
        }
        checklist.validate()?;
        Ok(checklist)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn find(&self, item_type: &str) -> Option<&RequiredItem> {
        self.items.iter().find(|item| item.item_type == item_type)
    }

    /// Check that the checklist is non-empty and every type is present and unique.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.items.is_empty() {
            return Err(CatalogError::EmptyChecklist(self.key));
        }
        let mut seen = HashSet::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            if item.item_type.is_empty() {
                return Err(CatalogError::MissingType {
                    key: self.key,
                    index,
                });
            }
            if !seen.insert(item.item_type.as_str()) {
                return Err(CatalogError::DuplicateType {
                    key: self.key,
                    item_type: item.item_type.clone(),
                });
            }
        }
        Ok(())
    }

    /// Stable hash of the ordered `(type, name)` pairs.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(self.key.as_str().as_bytes());
        for item in &self.items {
            hasher.write_u8(0x1e);
            hasher.write(item.item_type.as_bytes());
            hasher.write_u8(0x1f);
            hasher.write(item.name.as_bytes());
        }
        hasher.finish()
    }
}

/// Every shipped checklist, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    checklists: Vec<Checklist>,
}

impl Catalog {
    #[must_use]
    pub fn from_checklists(checklists: Vec<Checklist>) -> Self {
        Self { checklists }
    }

    /// Load every embedded checklist.
    ///
    /// # Errors
    ///
    /// Returns the first checklist that fails to parse or validate.
    pub fn try_load_static() -> Result<Self, CatalogError> {
        CategoryKey::ALL
            .into_iter()
            .map(Checklist::load_static)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_checklists)
    }

    #[must_use]
    pub fn get(&self, key: CategoryKey) -> Option<&Checklist> {
        self.checklists.iter().find(|checklist| checklist.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checklist> {
        self.checklists.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checklists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checklists.is_empty()
    }
}

/// Shared catalog built from the embedded assets on first use.
#[must_use]
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        Catalog::try_load_static().unwrap_or_else(|err| {
            log::error!("embedded checklists failed to load: {err}");
            Catalog::default()
        })
    })
}
