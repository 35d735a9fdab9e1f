//! Turns one upstream model response into label-keyed groups.
//!
//! The structured JSON parser runs first; loosely formatted text falls back
//! to the line-based parser. Both produce [`RawGroup`]s that then go through
//! identifier cleanup and the duplicate-label merge policy.

use tracing::{debug, warn};

use crate::config::LineMarkers;
use crate::error::{RegroupError, Result};
use crate::models::{GroupSet, RawGroup};

mod ids;
mod line_based;
mod structured;

pub use ids::{clean_token, is_canonical_id, split_id_tokens};
pub use line_based::parse_line_based;
pub use structured::parse_structured;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Drop (and log) member ids that are not hyphenated UUIDs.
    pub strict_ids: bool,
    pub markers: LineMarkers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPayload {
    Structured(Vec<RawGroup>),
    LineBased(Vec<RawGroup>),
}

impl ParsedPayload {
    #[must_use]
    pub fn groups(&self) -> &[RawGroup] {
        match self {
            Self::Structured(groups) | Self::LineBased(groups) => groups,
        }
    }

    #[must_use]
    pub fn into_groups(self) -> Vec<RawGroup> {
        match self {
            Self::Structured(groups) | Self::LineBased(groups) => groups,
        }
    }

    #[must_use]
    pub const fn path_name(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::LineBased(_) => "line_based",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub groups: GroupSet,
    pub path: &'static str,
    pub rejected_ids: Vec<String>,
}

/// Picks a parse path for `payload`.
///
/// A recognized JSON shape with zero groups is still a successful parse
/// (an empty result); only a payload neither parser understands is an error.
pub fn parse_payload(payload: &str, markers: &LineMarkers) -> Result<ParsedPayload> {
    let structured = parse_structured(payload);
    if let Some(groups) = &structured
        && !groups.is_empty()
    {
        debug!(groups = groups.len(), "parsed structured response");
        return Ok(ParsedPayload::Structured(groups.clone()));
    }

    let line_based = parse_line_based(payload, markers);
    if !line_based.is_empty() {
        debug!(groups = line_based.len(), "parsed line-based response");
        return Ok(ParsedPayload::LineBased(line_based));
    }

    match structured {
        Some(groups) => Ok(ParsedPayload::Structured(groups)),
        None => Err(RegroupError::Extraction(
            "no group could be recovered from the response".to_string(),
        )),
    }
}

pub fn extract(payload: &str, options: &ExtractOptions) -> Result<GroupSet> {
    extract_detailed(payload, options).map(|extraction| extraction.groups)
}

pub fn extract_detailed(payload: &str, options: &ExtractOptions) -> Result<Extraction> {
    let parsed = parse_payload(payload, &options.markers)?;
    let path = parsed.path_name();
    let mut groups = GroupSet::new();
    let mut rejected_ids = Vec::new();
    for group in parsed.into_groups() {
        groups.insert(clean_group(group, options.strict_ids, &mut rejected_ids));
    }
    Ok(Extraction {
        groups,
        path,
        rejected_ids,
    })
}

/// Extracts chunked responses in order and merges them into one set.
///
/// A chunk that cannot be parsed is logged and skipped; the call fails only
/// when every chunk fails.
pub fn extract_all<I, S>(payloads: I, options: &ExtractOptions) -> Result<Extraction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged: Option<Extraction> = None;
    let mut last_error = None;
    for (chunk_index, payload) in payloads.into_iter().enumerate() {
        match extract_detailed(payload.as_ref(), options) {
            Ok(extraction) => match merged.as_mut() {
                Some(current) => {
                    current.groups.merge(extraction.groups);
                    current.rejected_ids.extend(extraction.rejected_ids);
                }
                None => merged = Some(extraction),
            },
            Err(err) => {
                warn!(chunk = chunk_index + 1, code = err.code(), "skipping chunk: {err}");
                last_error = Some(err);
            }
        }
    }
    merged.ok_or_else(|| {
        last_error.unwrap_or_else(|| RegroupError::Extraction("no response was given".to_string()))
    })
}

fn clean_group(group: RawGroup, strict_ids: bool, rejected: &mut Vec<String>) -> RawGroup {
    let RawGroup {
        label,
        reason,
        members,
    } = group;
    let mut kept = Vec::with_capacity(members.len());
    for raw in members {
        let Some(token) = clean_token(&raw) else {
            continue;
        };
        if strict_ids && !is_canonical_id(&token) {
            let err = RegroupError::InvalidIdentifier(token.clone());
            warn!(group = %label, code = err.code(), "dropping member: {err}");
            rejected.push(token);
            continue;
        }
        kept.push(token);
    }
    RawGroup {
        label,
        reason,
        members: kept,
    }
}

#[cfg(test)]
mod tests;
