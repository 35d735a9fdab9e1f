use serde_json::{Map, Value};

use crate::llm_io::json_candidates;
use crate::models::RawGroup;

const LABEL_KEYS: &[&str] = &["groupName", "group_name", "name", "グループ名"];
const REASON_KEYS: &[&str] = &["reason", "理由"];
const MEMBER_KEYS: &[&str] = &["memberIds", "member_ids", "members", "メンバーID"];

/// Parses a JSON (or fenced JSON-in-text) response.
///
/// Returns `None` when no candidate parses into a recognized shape, and
/// `Some(vec![])` when the shape is recognized but carries no groups.
#[must_use]
pub fn parse_structured(payload: &str) -> Option<Vec<RawGroup>> {
    json_candidates(payload).iter().find_map(|candidate| {
        serde_json::from_str::<Value>(candidate)
            .ok()
            .and_then(|value| groups_from_value(&value))
    })
}

fn groups_from_value(value: &Value) -> Option<Vec<RawGroup>> {
    match value {
        Value::Array(items) => groups_from_array(items),
        Value::Object(object) => {
            if let Some(items) = object.get("groups").and_then(Value::as_array) {
                return groups_from_array(items);
            }
            groups_from_keyed_object(object)
        }
        _ => None,
    }
}

fn groups_from_array(items: &[Value]) -> Option<Vec<RawGroup>> {
    if items.is_empty() {
        return Some(Vec::new());
    }
    let groups = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(group_from_object)
        .collect::<Vec<_>>();
    (!groups.is_empty()).then_some(groups)
}

fn groups_from_keyed_object(object: &Map<String, Value>) -> Option<Vec<RawGroup>> {
    let groups = object
        .iter()
        .filter_map(|(label, value)| {
            let inner = value.as_object()?;
            let members = read_members(inner)?;
            let label = label.trim();
            (!label.is_empty()).then(|| RawGroup::new(label, read_reason(inner), members))
        })
        .collect::<Vec<_>>();
    (!groups.is_empty()).then_some(groups)
}

fn group_from_object(object: &Map<String, Value>) -> Option<RawGroup> {
    let label = LABEL_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())?;
    Some(RawGroup::new(
        label,
        read_reason(object),
        read_members(object).unwrap_or_default(),
    ))
}

fn read_reason(object: &Map<String, Value>) -> String {
    REASON_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_str)
        .map(|reason| reason.trim().to_string())
        .unwrap_or_default()
}

fn read_members(object: &Map<String, Value>) -> Option<Vec<String>> {
    let items = MEMBER_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_array)?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(raw) => Some(raw.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
            .collect(),
    )
}
