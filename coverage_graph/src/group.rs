//! Partition records into the charts that get drawn

use std::fmt;

use tracing::debug;

use crate::extract::CoverageRecord;

/// What a group holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// Every record
    Complete,
    /// Records whose path matched this filter
    Package(String),
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Package(filter) => write!(f, "package {}", filter),
        }
    }
}

/// A view over the records drawn as one chart
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub kind: GroupKind,
    pub records: Vec<&'a CoverageRecord>,
}

impl<'a> Group<'a> {
    pub fn is_complete(&self) -> bool {
        self.kind == GroupKind::Complete
    }

    /// Distinct matched path prefixes, in record order
    pub fn prefixes(&self) -> Vec<&'a str> {
        let mut prefixes: Vec<&'a str> = Vec::new();
        for record in self.records.iter().copied() {
            if let Some(package) = &record.package {
                if !prefixes.contains(&package.prefix.as_str()) {
                    prefixes.push(package.prefix.as_str());
                }
            }
        }
        prefixes
    }
}

/// Complete group first when included, then one group per filter with matches
pub fn build_groups<'a>(
    records: &'a [CoverageRecord],
    filters: &[String],
    include_complete: bool,
) -> Vec<Group<'a>> {
    let mut groups = Vec::with_capacity(filters.len() + 1);

    if include_complete {
        groups.push(Group {
            kind: GroupKind::Complete,
            records: records.iter().collect(),
        });
    }

    for (position, filter) in filters.iter().enumerate() {
        if filters[..position].contains(filter) {
            continue;
        }

        let members: Vec<&CoverageRecord> = records
            .iter()
            .filter(|record| {
                record
                    .package
                    .as_ref()
                    .is_some_and(|package| &package.filter == filter)
            })
            .collect();

        if members.is_empty() {
            debug!(filter = %filter, "No records matched package filter");
            continue;
        }

        let group = Group {
            kind: GroupKind::Package(filter.clone()),
            records: members,
        };
        debug!(
            filter = %filter,
            records = group.records.len(),
            prefixes = ?group.prefixes(),
            "Built package group",
        );
        groups.push(group);
    }

    groups
}
