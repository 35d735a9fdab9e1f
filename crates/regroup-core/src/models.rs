use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reserved theme that collects members no source group could place.
pub const OVERFLOW_THEME: &str = "切り捨てられたメンバー一覧";
pub const OVERFLOW_REASON: &str = "7人以下のグループから集められたメンバーです";

/// Placeholder entry written when a run yields no theme at all.
pub const EMPTY_RESULT_THEME: &str = "処理結果なし";
pub const EMPTY_RESULT_REASON: &str = "有効なグループが作成されませんでした";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGroup {
    pub label: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl RawGroup {
    pub fn new(label: impl Into<String>, reason: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            label: label.into(),
            reason: reason.into(),
            members,
        }
    }

    /// Appends `other`'s members and adopts its reason only when ours is empty.
    pub fn absorb(&mut self, other: RawGroup) {
        self.members.extend(other.members);
        if self.reason.trim().is_empty() && !other.reason.trim().is_empty() {
            self.reason = other.reason;
        }
    }
}

/// Label-keyed groups in first-seen order. Re-inserting a label merges into
/// the existing entry instead of replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSet {
    groups: Vec<RawGroup>,
    index: HashMap<String, usize>,
}

impl GroupSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: RawGroup) {
        if let Some(&position) = self.index.get(&group.label) {
            self.groups[position].absorb(group);
            return;
        }
        self.index.insert(group.label.clone(), self.groups.len());
        self.groups.push(group);
    }

    /// Returns the group for `label`, creating an empty one when missing.
    pub fn entry(&mut self, label: &str) -> &mut RawGroup {
        let position = match self.index.get(label) {
            Some(&position) => position,
            None => {
                self.index.insert(label.to_string(), self.groups.len());
                self.groups.push(RawGroup::new(label, "", Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }

    pub fn merge(&mut self, other: GroupSet) {
        for group in other.groups {
            self.insert(group);
        }
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&RawGroup> {
        self.index.get(label).map(|&position| &self.groups[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawGroup> {
        self.groups.iter()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.label.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn total_members(&self) -> usize {
        self.groups.iter().map(|group| group.members.len()).sum()
    }
}

impl FromIterator<RawGroup> for GroupSet {
    fn from_iter<T: IntoIterator<Item = RawGroup>>(iter: T) -> Self {
        let mut set = Self::new();
        for group in iter {
            set.insert(group);
        }
        set
    }
}

impl IntoIterator for GroupSet {
    type Item = RawGroup;
    type IntoIter = std::vec::IntoIter<RawGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a GroupSet {
    type Item = &'a RawGroup;
    type IntoIter = std::slice::Iter<'a, RawGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGroup {
    pub id_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub theme: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub group_list: Vec<SubGroup>,
}

impl ThemeEntry {
    #[must_use]
    pub fn overflow(group_list: Vec<SubGroup>) -> Self {
        Self {
            theme: OVERFLOW_THEME.to_string(),
            reason: OVERFLOW_REASON.to_string(),
            group_list,
        }
    }

    #[must_use]
    pub fn empty_result() -> Self {
        Self {
            theme: EMPTY_RESULT_THEME.to_string(),
            reason: EMPTY_RESULT_REASON.to_string(),
            group_list: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.theme == OVERFLOW_THEME
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.group_list.iter().map(|group| group.id_list.len()).sum()
    }
}

/// Serializes a theme document the way downstream readers expect it:
/// four-space indentation, non-ASCII text left unescaped.
pub fn to_document_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn parse_document(text: &str) -> Result<Vec<ThemeEntry>> {
    Ok(serde_json::from_str(text)?)
}
