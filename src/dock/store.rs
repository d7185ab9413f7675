//! Pinned-list store
//!
//! Owns the in-memory pinned list and its JSON file. Every failure is logged
//! and absorbed here; callers only see success flags.

use crate::dock::operations::persistence::{read_document, write_document};
use crate::dock::pure::document::{migrate, PinnedDocument};
use crate::dock::pure::normalize::normalize;
use crate::dock::pure::resolve::{entry_identifiers, IdentityResolver};
use crate::dock::types::{PinnedEntry, StoreError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub struct PinnedStore {
    path: PathBuf,
    entries: Vec<PinnedEntry>,
    extra: Map<String, Value>,
    /// In-memory list differs from the file because the last write failed
    unsaved: bool,
}

impl PinnedStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
            extra: Map::new(),
            unsaved: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[PinnedEntry] {
        &self.entries
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    fn read(&self, resolver: &IdentityResolver) -> Result<Option<(Vec<PinnedEntry>, Map<String, Value>)>, StoreError> {
        let Some(PinnedDocument { pinned, extra }) = read_document(&self.path)? else {
            return Ok(None);
        };
        let entries = migrate(pinned, |name| {
            resolver.find_by_name(name).map(PinnedEntry::from_app)
        });
        Ok(Some((entries, extra)))
    }

    /// Read the file, replacing the in-memory list. A missing or malformed
    /// file gives an empty list.
    pub fn load(&mut self, resolver: &IdentityResolver) -> &[PinnedEntry] {
        match self.read(resolver) {
            Ok(Some((entries, extra))) => {
                log::info!(
                    "Loaded {} pinned entries from {}",
                    entries.len(),
                    self.path.display()
                );
                self.entries = entries;
                self.extra = extra;
            }
            Ok(None) => {
                log::info!("No pinned list at {}", self.path.display());
                self.entries.clear();
                self.extra.clear();
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable pinned list {}: {}",
                    self.path.display(),
                    e
                );
                self.entries.clear();
                self.extra.clear();
            }
        }
        self.unsaved = false;
        &self.entries
    }

    fn write(&mut self) -> bool {
        match write_document(&self.path, &self.entries, &self.extra) {
            Ok(()) => {
                self.unsaved = false;
                true
            }
            Err(e) => {
                log::error!(
                    "Failed to save pinned list {}: {}",
                    self.path.display(),
                    e
                );
                self.unsaved = true;
                false
            }
        }
    }

    /// Replace the list and persist it. The in-memory list is kept even if
    /// the write fails; the next save or poll retries it.
    pub fn save(&mut self, entries: Vec<PinnedEntry>) -> bool {
        self.entries = entries;
        self.write()
    }

    /// Append an entry unless an equal one is already pinned
    pub fn add(&mut self, entry: PinnedEntry) -> bool {
        if entry.is_empty() || self.entries.contains(&entry) {
            return false;
        }
        let mut entries = self.entries.clone();
        entries.push(entry);
        self.save(entries);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<PinnedEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let mut entries = self.entries.clone();
        let removed = entries.remove(index);
        self.save(entries);
        Some(removed)
    }

    /// Remove every entry that names `identifier` directly or resolves to
    /// the same application. Returns how many were removed.
    pub fn remove_matching(&mut self, identifier: &str, resolver: &IdentityResolver) -> usize {
        let wanted = normalize(identifier);
        let target = resolver.resolve_str(identifier).map(|app| app.name.clone());

        let before = self.entries.len();
        let kept: Vec<PinnedEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                let named = entry_identifiers(entry).contains(&wanted);
                let same_app = target.is_some()
                    && resolver.resolve_entry(entry).map(|app| &app.name) == target.as_ref();
                !(named || same_app)
            })
            .cloned()
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            self.save(kept);
        }
        removed
    }

    /// Re-read the file and adopt it when its list differs from memory.
    ///
    /// A pending failed write is retried first so another writer's older
    /// file never overwrites the user's latest change. Unreadable files
    /// leave the in-memory list untouched.
    pub fn poll_for_external_change(&mut self, resolver: &IdentityResolver) -> bool {
        if self.unsaved && !self.write() {
            return false;
        }

        let (entries, extra) = match self.read(resolver) {
            Ok(Some(doc)) => doc,
            Ok(None) => (Vec::new(), Map::new()),
            Err(e) => {
                log::debug!("Skipping pinned list poll: {}", e);
                return false;
            }
        };

        if entries == self.entries {
            return false;
        }
        log::info!(
            "Pinned list changed on disk ({} -> {} entries)",
            self.entries.len(),
            entries.len()
        );
        self.entries = entries;
        self.extra = extra;
        true
    }
}
