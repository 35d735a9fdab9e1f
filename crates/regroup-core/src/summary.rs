use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SizeBounds;
use crate::models::{GroupSet, ThemeEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummaryItem {
    pub group_name: String,
    pub reason: String,
    pub member_count: usize,
    pub member_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingTotals {
    pub total_groups: usize,
    pub total_members_grouped: usize,
}

/// Merged view of every extracted group, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingSummary {
    pub groups: Vec<GroupSummaryItem>,
    pub summary: GroupingTotals,
}

#[must_use]
pub fn summarize_groups(groups: &GroupSet) -> GroupingSummary {
    let mut items = groups
        .iter()
        .map(|group| GroupSummaryItem {
            group_name: group.label.clone(),
            reason: group.reason.clone(),
            member_count: group.members.len(),
            member_ids: group.members.clone(),
        })
        .collect::<Vec<_>>();
    items.sort_by_key(|item| Reverse(item.member_count));
    GroupingSummary {
        summary: GroupingTotals {
            total_groups: items.len(),
            total_members_grouped: groups.total_members(),
        },
        groups: items,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub total_themes: usize,
    pub total_subgroups: usize,
    pub total_members: usize,
    pub overflow_members: usize,
    pub rejected_ids: usize,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
}

impl RunReport {
    #[must_use]
    pub fn from_entries(entries: &[ThemeEntry]) -> Self {
        Self {
            total_themes: entries.len(),
            total_subgroups: entries.iter().map(|entry| entry.group_list.len()).sum(),
            total_members: entries.iter().map(ThemeEntry::member_count).sum(),
            overflow_members: entries
                .iter()
                .filter(|entry| entry.is_overflow())
                .map(ThemeEntry::member_count)
                .sum(),
            rejected_ids: 0,
            generated_at: Utc::now(),
            output_location: None,
        }
    }

    #[must_use]
    pub fn with_rejected_ids(mut self, rejected_ids: usize) -> Self {
        self.rejected_ids = rejected_ids;
        self
    }

    #[must_use]
    pub fn with_output_location(mut self, location: impl Into<String>) -> Self {
        self.output_location = Some(location.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundViolation {
    pub theme: String,
    pub subgroup_index: usize,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentCheck {
    pub theme_count: usize,
    pub subgroup_count: usize,
    pub member_count: usize,
    pub duplicate_ids: Vec<String>,
    pub violations: Vec<BoundViolation>,
}

impl DocumentCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.duplicate_ids.is_empty() && self.violations.is_empty()
    }
}

/// Counts a persisted theme document and reports size-bound violations.
/// Overflow sub-groups are only held to the upper bound.
#[must_use]
pub fn check_document(entries: &[ThemeEntry], bounds: SizeBounds) -> DocumentCheck {
    let mut seen = HashSet::new();
    let mut duplicate_ids = Vec::new();
    let mut violations = Vec::new();
    let mut subgroup_count = 0;
    let mut member_count = 0;

    for entry in entries {
        for (subgroup_index, sub) in entry.group_list.iter().enumerate() {
            subgroup_count += 1;
            member_count += sub.id_list.len();
            let size = sub.id_list.len();
            let within = if entry.is_overflow() {
                size <= bounds.max()
            } else {
                bounds.admits(size)
            };
            if !within {
                violations.push(BoundViolation {
                    theme: entry.theme.clone(),
                    subgroup_index,
                    size,
                });
            }
            for id in &sub.id_list {
                if !seen.insert(id.as_str()) {
                    duplicate_ids.push(id.clone());
                }
            }
        }
    }

    DocumentCheck {
        theme_count: entries.len(),
        subgroup_count,
        member_count,
        duplicate_ids,
        violations,
    }
}
