//! Shared defaults and embedded checklist assets.

/// Formatted quantity shown for items the player does not own.
pub const DEFAULT_QUANTITY_FORMATTED: &str = "0";

/// Suffix appended to progress labels when limited edition items are owned.
pub(crate) const LE_SUFFIX: &str = "LE";

// Embedded checklists ------------------------------------------------------
pub(crate) const CHEST_CHECKLIST: &str = include_str!("../data/checklists/chest.json");
pub(crate) const AIRSHIPS_CHECKLIST: &str = include_str!("../data/checklists/airships.json");
pub(crate) const CURRENCY_CHECKLIST: &str = include_str!("../data/checklists/currency.json");
pub(crate) const EQUIPMENT_CHECKLIST: &str = include_str!("../data/checklists/equipment.json");
pub(crate) const PLANKRUN_CHECKLIST: &str = include_str!("../data/checklists/plankrun.json");
