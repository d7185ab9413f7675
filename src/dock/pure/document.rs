// Pinned-list document format and legacy migration (no I/O)

use crate::dock::types::{PinnedEntry, RawPinned, StoreError};
use serde_json::{Map, Value};

/// Top-level key holding the ordered pinned list
pub const PINNED_KEY: &str = "pinned_apps";

/// Parsed pinned-list file. Keys other than [`PINNED_KEY`] are kept so that
/// saving never drops settings written by other tools.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinnedDocument {
    pub pinned: Vec<RawPinned>,
    pub extra: Map<String, Value>,
}

pub fn parse_document(contents: &str) -> Result<PinnedDocument, StoreError> {
    if contents.trim().is_empty() {
        return Ok(PinnedDocument::default());
    }

    let Value::Object(mut extra) = serde_json::from_str::<Value>(contents)? else {
        return Err(StoreError::Format("top level is not an object".to_string()));
    };

    let pinned = match extra.remove(PINNED_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<RawPinned>(item.clone()) {
                Ok(raw) => Some(raw),
                Err(_) => {
                    log::warn!("Ignoring invalid pinned entry {}", item);
                    None
                }
            })
            .collect(),
        Some(other) => {
            return Err(StoreError::Format(format!(
                "{} is not an array: {}",
                PINNED_KEY, other
            )));
        }
    };

    Ok(PinnedDocument { pinned, extra })
}

pub fn render_document(
    entries: &[PinnedEntry],
    extra: &Map<String, Value>,
) -> Result<String, StoreError> {
    let mut doc = extra.clone();
    doc.insert(PINNED_KEY.to_string(), serde_json::to_value(entries)?);
    Ok(serde_json::to_string_pretty(&Value::Object(doc))?)
}

/// Turn raw elements into entries, preserving order.
///
/// Legacy strings go through `lookup` (exact catalog name match); a miss
/// keeps the string as `name`. Blank strings and entries with no non-empty
/// field are dropped.
pub fn migrate<F>(raw: Vec<RawPinned>, lookup: F) -> Vec<PinnedEntry>
where
    F: Fn(&str) -> Option<PinnedEntry>,
{
    raw.into_iter()
        .filter_map(|item| match item {
            RawPinned::Legacy(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(lookup(name).unwrap_or_else(|| PinnedEntry::named(name)))
            }
            RawPinned::Entry(entry) if entry.is_empty() => {
                log::warn!("Dropping pinned entry with no identifying field");
                None
            }
            RawPinned::Entry(entry) => Some(entry),
        })
        .collect()
}
