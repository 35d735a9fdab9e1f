//! Size-bounded regrouping of extracted themes.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::config::SizeBounds;
use crate::models::{GroupSet, SubGroup, ThemeEntry};

/// Rebalances `groups` using the thread-local entropy-seeded generator.
#[must_use]
pub fn rebalance(groups: &GroupSet, bounds: SizeBounds) -> Vec<ThemeEntry> {
    rebalance_with_rng(groups, bounds, &mut rand::thread_rng())
}

/// Splits every group into sub-groups of at most `bounds.max()` members.
///
/// Groups smaller than `bounds.min()`, and the short tail chunk of a split
/// group, are routed to the overflow theme. The overflow theme is appended
/// last and is chunked by `bounds.max()` without a lower bound, so no member
/// is ever dropped.
pub fn rebalance_with_rng<R: Rng + ?Sized>(
    groups: &GroupSet,
    bounds: SizeBounds,
    rng: &mut R,
) -> Vec<ThemeEntry> {
    let mut entries = Vec::with_capacity(groups.len() + 1);
    let mut overflow = Vec::new();

    for group in groups {
        let mut members = group.members.clone();
        members.shuffle(rng);
        let group_list = split_group(&group.label, members, bounds, &mut overflow);
        if group_list.is_empty() {
            continue;
        }
        entries.push(ThemeEntry {
            theme: group.label.clone(),
            reason: group.reason.clone(),
            group_list,
        });
    }

    if !overflow.is_empty() {
        overflow.shuffle(rng);
        let total = overflow.len();
        let group_list = chunk_members(overflow, bounds.max());
        info!(
            members = total,
            subgroups = group_list.len(),
            "built overflow theme"
        );
        entries.push(ThemeEntry::overflow(group_list));
    }
    entries
}

fn split_group(
    label: &str,
    members: Vec<String>,
    bounds: SizeBounds,
    overflow: &mut Vec<String>,
) -> Vec<SubGroup> {
    let len = members.len();
    if len < bounds.min() {
        if len > 0 {
            info!(theme = label, members = len, "group below minimum, moved to overflow");
        }
        overflow.extend(members);
        return Vec::new();
    }
    if len <= bounds.max() {
        return vec![SubGroup { id_list: members }];
    }

    let mut group_list = chunk_members(members, bounds.max());
    // Consecutive slicing leaves only the tail chunk short.
    if group_list
        .last()
        .is_some_and(|tail| tail.id_list.len() < bounds.min())
        && let Some(tail) = group_list.pop()
    {
        info!(
            theme = label,
            members = tail.id_list.len(),
            "tail subgroup below minimum, moved to overflow"
        );
        overflow.extend(tail.id_list);
    }
    info!(theme = label, subgroups = group_list.len(), "split group");
    group_list
}

fn chunk_members(members: Vec<String>, size: usize) -> Vec<SubGroup> {
    members
        .chunks(size)
        .map(|chunk| SubGroup {
            id_list: chunk.to_vec(),
        })
        .collect()
}
