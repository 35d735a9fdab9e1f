use serde::{Deserialize, Serialize};

/// Keywords the line-based fallback parser uses to classify response lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineMarkers {
    /// A line containing this (and no member label) names a group.
    pub group: String,
    /// Lines mentioning members are never group-name lines.
    pub member_label: String,
    /// Opens a member-id list, optionally followed by `:` and `[`.
    pub member_ids: String,
    pub reasons: Vec<String>,
}

impl Default for LineMarkers {
    fn default() -> Self {
        Self {
            group: "グループ".to_string(),
            member_label: "メンバー".to_string(),
            member_ids: "メンバーID".to_string(),
            reasons: vec!["理由".to_string(), "これらのメンバーは".to_string()],
        }
    }
}

impl LineMarkers {
    #[must_use]
    pub fn english() -> Self {
        Self {
            group: "Group".to_string(),
            member_label: "Member".to_string(),
            member_ids: "Member IDs".to_string(),
            reasons: vec!["Reason".to_string()],
        }
    }

    pub(crate) fn is_reason_line(&self, line: &str) -> bool {
        self.reasons
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| line.contains(marker.as_str()))
    }
}
