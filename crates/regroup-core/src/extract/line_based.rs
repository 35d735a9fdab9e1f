use crate::config::LineMarkers;
use crate::models::{GroupSet, RawGroup};

use super::ids::split_id_tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    GroupName,
    MemberList(&'a str),
    Reason,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Closed,
    /// A member-id marker with nothing after it; the list may open on the next line.
    Pending,
    Open,
}

/// Parses loosely formatted text where a group-name line is followed by a
/// reason line and a (possibly multi-line) bracketed member-id list.
///
/// Group-name lines that never receive a member are dropped; they are
/// headings, not groups.
#[must_use]
pub fn parse_line_based(text: &str, markers: &LineMarkers) -> Vec<RawGroup> {
    let mut groups = GroupSet::new();
    let mut current: Option<String> = None;
    let mut list = ListState::Closed;

    for raw_line in text.lines() {
        let line = normalize_line(raw_line);
        if line.is_empty() {
            continue;
        }
        let kind = classify_line(line, markers);

        if list == ListState::Pending && kind == LineKind::Other && line.starts_with('[') {
            list = ListState::Open;
        }
        if list == ListState::Open && kind != LineKind::GroupName {
            let (ids, closed) = until_bracket_close(line);
            if let Some(label) = current.as_deref() {
                groups.entry(label).members.extend(split_id_tokens(ids));
            }
            if closed {
                list = ListState::Closed;
            }
            continue;
        }
        list = ListState::Closed;

        match kind {
            LineKind::GroupName => {
                groups.entry(line);
                current = Some(line.to_string());
            }
            LineKind::MemberList(rest) => {
                let Some(label) = current.as_deref() else {
                    continue;
                };
                let (ids, closed) = until_bracket_close(rest);
                groups.entry(label).members.extend(split_id_tokens(ids));
                list = if rest.is_empty() {
                    ListState::Pending
                } else if rest.contains('[') && !closed {
                    ListState::Open
                } else {
                    ListState::Closed
                };
            }
            LineKind::Reason => {
                let Some(label) = current.as_deref() else {
                    continue;
                };
                let group = groups.entry(label);
                if group.reason.is_empty() {
                    group.reason = reason_text(line, markers);
                }
            }
            LineKind::Other => {}
        }
    }

    groups
        .into_iter()
        .filter(|group| !group.members.is_empty())
        .collect()
}

/// Text up to the first `]`, and whether the bracket closed on this line.
fn until_bracket_close(line: &str) -> (&str, bool) {
    match line.find(']') {
        Some(end) => (&line[..end], true),
        None => (line, false),
    }
}

fn classify_line<'a>(line: &'a str, markers: &LineMarkers) -> LineKind<'a> {
    if !markers.group.is_empty()
        && line.contains(markers.group.as_str())
        && (markers.member_label.is_empty() || !line.contains(markers.member_label.as_str()))
        && !line.contains([':', '：'])
    {
        return LineKind::GroupName;
    }
    if !markers.member_ids.is_empty()
        && let Some(position) = line.find(markers.member_ids.as_str())
    {
        let rest = line[position + markers.member_ids.len()..]
            .trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == '：');
        return LineKind::MemberList(rest);
    }
    if markers.is_reason_line(line) {
        return LineKind::Reason;
    }
    LineKind::Other
}

/// Strips markdown heading hashes, list bullets and bold markers.
fn normalize_line(raw: &str) -> &str {
    let mut line = raw.trim();
    line = line.trim_start_matches('#').trim_start();
    for bullet in ["- ", "* ", "・"] {
        if let Some(rest) = line.strip_prefix(bullet) {
            line = rest.trim_start();
            break;
        }
    }
    line.trim_matches('*').trim()
}

fn reason_text(line: &str, markers: &LineMarkers) -> String {
    markers
        .reasons
        .iter()
        .filter_map(|marker| line.strip_prefix(marker.as_str()))
        .filter_map(|rest| rest.trim_start().strip_prefix([':', '：']))
        .map(str::trim)
        .find(|rest| !rest.is_empty())
        .unwrap_or(line)
        .to_string()
}
