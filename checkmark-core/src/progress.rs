//! Completion counts for a reconciled category.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::LE_SUFFIX;
use crate::items::{ReconciledItem, RequiredItem};

/// Completion state of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Every checklist entry is owned.
    pub checkmark: bool,
    /// Owned checklist entries.
    pub completed: usize,
    /// Checklist size.
    pub required: usize,
    /// Owned limited edition items.
    pub le: usize,
}

impl ProgressSummary {
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.required.saturating_sub(self.completed)
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.completed, self.required)?;
        if self.le > 0 {
            write!(f, " (+{} {LE_SUFFIX})", self.le)?;
        }
        Ok(())
    }
}

/// Count owned items in one pass, bucketing by the `le` flag alone.
#[must_use]
pub fn compute_progress(items: &[ReconciledItem], required: &[RequiredItem]) -> ProgressSummary {
    let mut completed = 0;
    let mut le = 0;
    for item in items {
        if item.quantity == 0 {
            continue;
        }
        if item.le {
            le += 1;
        } else {
            completed += 1;
        }
    }

    ProgressSummary {
        checkmark: completed == required.len(),
        completed,
        required: required.len(),
        le,
    }
}

/// Render `"{completed} of {required}"`, with `" (+{le} LE)"` when any are owned.
#[must_use]
pub fn format_progress(summary: &ProgressSummary) -> String {
    summary.to_string()
}
