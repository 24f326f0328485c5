//! Owned items read from saved inventory page responses on disk.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use checkmark_core::{InventoryError, InventorySource, OwnedItem, extract_owned};

/// Reads `<dir>/<tab>.json`, one saved inventory response per tab.
///
/// Without a directory, or without a file for a tab, the player owns nothing there.
#[derive(Debug, Clone, Default)]
pub struct FileInventory {
    dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum FileInventoryError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Inventory {
        path: PathBuf,
        #[source]
        source: InventoryError,
    },
}

impl FileInventory {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn tab_path(&self, tab: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{tab}.json")))
    }
}

impl InventorySource for FileInventory {
    type Error = FileInventoryError;

    fn fetch_owned(&self, tab: &str, tag: &str) -> Result<Vec<OwnedItem>, Self::Error> {
        let Some(path) = self.tab_path(tab) else {
            return Ok(Vec::new());
        };
        if !path.exists() {
            log::info!("no saved inventory for tab {tab} at {}", path.display());
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&path).map_err(|source| FileInventoryError::Io {
            path: path.clone(),
            source,
        })?;
        let owned = extract_owned(&json, tab, tag)
            .map_err(|source| FileInventoryError::Inventory { path, source })?;
        log::debug!("{tab}/{tag}: {} owned records", owned.len());
        Ok(owned)
    }
}
