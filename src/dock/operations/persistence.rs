// Pinned-list file I/O

use crate::dock::pure::document::{parse_document, render_document, PinnedDocument};
use crate::dock::types::{PinnedEntry, StoreError};
use serde_json::{Map, Value};
use std::path::Path;

/// Read and parse the pinned-list file. A missing file is `Ok(None)`.
pub fn read_document(path: &Path) -> Result<Option<PinnedDocument>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_document(&contents).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write the document through a temporary sibling and rename it into place,
/// creating parent directories as needed.
pub fn write_document(
    path: &Path,
    entries: &[PinnedEntry],
    extra: &Map<String, Value>,
) -> Result<(), StoreError> {
    let json = render_document(entries, extra)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
