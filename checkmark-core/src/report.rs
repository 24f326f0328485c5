//! Per-category results handed to a presentation layer.
use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryKey, Checklist};
use crate::items::{OwnedItem, ReconciledItem};
use crate::progress::{ProgressSummary, compute_progress};
use crate::reconcile::reconcile;

/// Reconciled items and progress for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub key: CategoryKey,
    pub name: String,
    /// Fingerprint of the checklist that produced this report.
    pub fingerprint: u64,
    /// Sorted by name.
    pub items: Vec<ReconciledItem>,
    pub progress: ProgressSummary,
}

impl CategoryReport {
    /// Reconcile `owned` against `checklist` and summarize the result.
    #[must_use]
    pub fn build(checklist: &Checklist, owned: &[OwnedItem]) -> Self {
        let items = reconcile(&checklist.items, owned);
        let progress = compute_progress(&items, &checklist.items);
        log::debug!(
            "{}: {} items from {} owned records, {progress}",
            checklist.key,
            items.len(),
            owned.len()
        );
        Self {
            key: checklist.key,
            name: checklist.name.clone(),
            fingerprint: checklist.fingerprint(),
            items,
            progress,
        }
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        self.progress.to_string()
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.progress.checkmark
    }

    pub fn collected(&self) -> impl Iterator<Item = &ReconciledItem> {
        self.items.iter().filter(|item| item.is_collected())
    }

    /// Checklist entries the player does not own yet.
    pub fn missing(&self) -> impl Iterator<Item = &ReconciledItem> {
        self.items
            .iter()
            .filter(|item| !item.le && !item.is_collected())
    }

    /// Owned items outside the checklist.
    pub fn limited_edition(&self) -> impl Iterator<Item = &ReconciledItem> {
        self.items
            .iter()
            .filter(|item| item.le && item.is_collected())
    }
}
