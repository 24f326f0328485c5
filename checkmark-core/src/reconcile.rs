//! Merge a category checklist with the player's owned records.
use std::collections::{HashMap, HashSet};

use crate::constants::DEFAULT_QUANTITY_FORMATTED;
use crate::items::{OwnedItem, ReconciledItem, RequiredItem};

/// Merge `required` with `owned` into one list keyed by item type, sorted by name.
///
/// Every checklist type appears exactly once. Owned types missing from the
/// checklist are kept and flagged limited edition; a record without a type is
/// keyed by the empty string and treated the same way. When either input
/// repeats a type, the first occurrence wins.
///
/// The sort is stable and compares names byte-wise, so ties keep owned records
/// ahead of synthesized placeholders.
#[must_use]
pub fn reconcile(required: &[RequiredItem], owned: &[OwnedItem]) -> Vec<ReconciledItem> {
    let mut checklist: HashMap<&str, &RequiredItem> = HashMap::with_capacity(required.len());
    for item in required {
        checklist.entry(item.item_type.as_str()).or_insert(item);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(required.len() + owned.len());
    let mut items = Vec::with_capacity(required.len() + owned.len());

    for record in owned {
        if !seen.insert(record.item_type.as_str()) {
            log::debug!("ignoring repeated owned record for {}", record.item_type);
            continue;
        }
        let matched = checklist.get(record.item_type.as_str()).copied();
        items.push(resolve(record, matched));
    }

    for item in required {
        if seen.insert(item.item_type.as_str()) {
            items.push(ReconciledItem::unowned(item));
        }
    }

    items.sort_by(|a, b| a.name.cmp(&b.name));
    items
}

fn resolve(record: &OwnedItem, required: Option<&RequiredItem>) -> ReconciledItem {
    let quantity = record.quantity.unwrap_or(0);
    let quantity_formatted = record
        .quantity_formatted
        .clone()
        .unwrap_or_else(|| DEFAULT_QUANTITY_FORMATTED.to_string());

    let Some(required) = required else {
        return ReconciledItem {
            item_id: record.item_id.clone(),
            item_type: record.item_type.clone(),
            name: record.name.clone().unwrap_or_default(),
            thumbnail: display_thumbnail(
                quantity,
                record.thumbnail.as_deref().unwrap_or_default(),
                record.thumbnail_gray.as_deref(),
            ),
            quantity,
            quantity_formatted,
            le: true,
        };
    };

    let thumbnail = record.thumbnail.as_deref().unwrap_or(&required.thumbnail);
    let thumbnail_gray = record
        .thumbnail_gray
        .as_deref()
        .or(required.thumbnail_gray.as_deref());

    ReconciledItem {
        item_id: record
            .item_id
            .clone()
            .or_else(|| Some(required.item_id.clone())),
        item_type: record.item_type.clone(),
        name: record.name.clone().unwrap_or_else(|| required.name.clone()),
        thumbnail: display_thumbnail(quantity, thumbnail, thumbnail_gray),
        quantity,
        quantity_formatted,
        le: false,
    }
}

/// Owned items show their gray variant when one exists.
fn display_thumbnail(quantity: u64, thumbnail: &str, thumbnail_gray: Option<&str>) -> String {
    match thumbnail_gray {
        Some(gray) if quantity > 0 => gray.to_string(),
        _ => thumbnail.to_string(),
    }
}
