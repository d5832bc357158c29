//! Record ordering within a group

use std::cmp::Ordering;

use crate::extract::CoverageRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Case-insensitive path
    #[default]
    Path,
    /// Numeric ratio
    Ratio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// How a group's records are ordered before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
    pub enabled: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::default(),
            order: SortOrder::default(),
            enabled: true,
        }
    }
}

impl SortSpec {
    pub fn unsorted() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Stable sort in both directions
pub fn sort_records(records: &mut [&CoverageRecord], spec: SortSpec) {
    if !spec.enabled {
        return;
    }

    let compare = |a: &&CoverageRecord, b: &&CoverageRecord| -> Ordering {
        match spec.key {
            SortKey::Path => a.path.to_lowercase().cmp(&b.path.to_lowercase()),
            SortKey::Ratio => a.ratio.total_cmp(&b.ratio),
        }
    };

    match spec.order {
        SortOrder::Ascending => records.sort_by(compare),
        SortOrder::Descending => records.sort_by(|a, b| compare(b, a)),
    }
}
