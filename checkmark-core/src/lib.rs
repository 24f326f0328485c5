//! Ultimate Checkmark core
//!
//! Platform-agnostic collection progress for the hunter profile item categories.
//! Checklists are compiled in; owned items come from an [`InventorySource`] that
//! the embedding platform provides. Nothing here renders or performs network I/O.

pub mod catalog;
pub mod constants;
pub mod inventory;
pub mod items;
pub mod progress;
pub mod reconcile;
pub mod report;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CategoryKey, Checklist, catalog};
pub use inventory::{InventoryError, InventoryResponse, StaticInventory, extract_owned};
pub use items::{ItemId, OwnedItem, ReconciledItem, RequiredItem, TileState};
pub use progress::{ProgressSummary, compute_progress, format_progress};
pub use reconcile::reconcile;
pub use report::CategoryReport;

/// Trait for abstracting owned-item lookups
/// Platform-specific implementations should provide this
pub trait InventorySource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the owned records filed under an inventory `tab` / `tag` pair
    ///
    /// # Errors
    ///
    /// Returns an error if the platform could not produce the inventory.
    fn fetch_owned(&self, tab: &str, tag: &str) -> Result<Vec<OwnedItem>, Self::Error>;
}

impl<S: InventorySource + ?Sized> InventorySource for &S {
    type Error = S::Error;

    fn fetch_owned(&self, tab: &str, tag: &str) -> Result<Vec<OwnedItem>, Self::Error> {
        (**self).fetch_owned(tab, tag)
    }
}

/// Runs categories end to end against an owned-items source
pub struct ChecklistTracker<'c, S>
where
    S: InventorySource,
{
    source: S,
    catalog: &'c Catalog,
}

impl<S> ChecklistTracker<'static, S>
where
    S: InventorySource,
{
    /// Create a tracker over the embedded catalog
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: catalog(),
        }
    }
}

impl<'c, S> ChecklistTracker<'c, S>
where
    S: InventorySource,
{
    /// Create a tracker over a caller-supplied catalog
    pub const fn with_catalog(source: S, catalog: &'c Catalog) -> Self {
        Self { source, catalog }
    }

    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, reconcile and summarize one category
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has no checklist for `key`.
    pub fn load_category(&self, key: CategoryKey) -> Result<CategoryReport, CatalogError> {
        self.catalog
            .get(key)
            .map(|checklist| self.load_checklist(checklist))
            .ok_or(CatalogError::MissingCategory(key))
    }

    /// Fetch, reconcile and summarize a checklist.
    ///
    /// A failing source is treated as an empty inventory.
    pub fn load_checklist(&self, checklist: &Checklist) -> CategoryReport {
        let owned = match self.source.fetch_owned(&checklist.tab, &checklist.tag) {
            Ok(owned) => owned,
            Err(err) => {
                log::warn!(
                    "inventory for {} ({}/{}) unavailable, treating as empty: {err}",
                    checklist.key,
                    checklist.tab,
                    checklist.tag
                );
                Vec::new()
            }
        };
        CategoryReport::build(checklist, &owned)
    }

    /// Every catalog category, in display order
    pub fn load_all(&self) -> Vec<CategoryReport> {
        self.catalog
            .iter()
            .map(|checklist| self.load_checklist(checklist))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, thiserror::Error)]
    #[error("inventory request rejected")]
    struct Rejected;

    #[derive(Default)]
    struct CountingSource {
        calls: Cell<usize>,
    }

    impl InventorySource for CountingSource {
        type Error = Rejected;

        fn fetch_owned(&self, _tab: &str, _tag: &str) -> Result<Vec<OwnedItem>, Self::Error> {
            self.calls.set(self.calls.get() + 1);
            Err(Rejected)
        }
    }

    fn tiny_catalog() -> Catalog {
        Catalog::from_checklists(vec![Checklist {
            key: CategoryKey::Currency,
            name: "Currency".to_string(),
            tab: "special".to_string(),
            tag: "currency".to_string(),
            items: vec![
                RequiredItem::new(2217u64, "blood_stone_stat_item", "Bloodstone", "b.png"),
                RequiredItem::new(3071u64, "cloudstone_bangle_stat_item", "Cloudstone Bangle", "c.png"),
            ],
        }])
    }

    #[test]
    fn failing_source_degrades_to_empty_inventory() {
        let catalog = tiny_catalog();
        let tracker = ChecklistTracker::with_catalog(CountingSource::default(), &catalog);
        let report = tracker.load_category(CategoryKey::Currency).unwrap();
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.progress_label(), "0 of 2");
        assert!(report.items.iter().all(|item| item.quantity == 0));
    }

    #[test]
    fn every_load_fetches_fresh_data() {
        let catalog = tiny_catalog();
        let tracker = ChecklistTracker::with_catalog(CountingSource::default(), &catalog);
        let _ = tracker.load_all();
        let _ = tracker.load_all();
        assert_eq!(tracker.source().calls.get(), 2);
    }

    #[test]
    fn missing_category_is_reported() {
        let catalog = tiny_catalog();
        let tracker = ChecklistTracker::with_catalog(StaticInventory::new(), &catalog);
        assert!(matches!(
            tracker.load_category(CategoryKey::Chest),
            Err(CatalogError::MissingCategory(CategoryKey::Chest))
        ));
    }

    #[test]
    fn tracker_reads_owned_items_for_checklist_selector() {
        let catalog = tiny_catalog();
        let source = StaticInventory::new().with_items(
            "special",
            "currency",
            vec![
                OwnedItem::new("blood_stone_stat_item", 40).with_quantity_formatted("40"),
                OwnedItem::new("cloudstone_bangle_stat_item", 1),
            ],
        );
        let tracker = ChecklistTracker::with_catalog(&source, &catalog);
        let report = tracker.load_category(CategoryKey::Currency).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.progress_label(), "2 of 2");
    }
}
