use crate::catalog::CatalogApp;
use crate::compositor::{LiveWindow, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("pinned list I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("pinned list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pinned list has an unexpected shape: {0}")]
    Format(String),
}

/// A pinned application as persisted in the pinned-list document.
///
/// Every field is optional but a valid entry has at least one non-empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PinnedEntry {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Canonical entry for a catalog application
    pub fn from_app(app: &CatalogApp) -> Self {
        let opt = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        Self {
            name: opt(&app.name),
            display_name: opt(&app.display_name),
            window_class: app.window_class.clone(),
            executable: app.executable.clone(),
            command_line: app.command_line.clone(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.display_name)
    }

    pub fn window_class(&self) -> Option<&str> {
        non_empty(&self.window_class)
    }

    pub fn executable(&self) -> Option<&str> {
        non_empty(&self.executable)
    }

    pub fn command_line(&self) -> Option<&str> {
        non_empty(&self.command_line)
    }

    pub fn is_empty(&self) -> bool {
        self.name().is_none()
            && self.display_name().is_none()
            && self.window_class().is_none()
            && self.executable().is_none()
            && self.command_line().is_none()
    }

    /// Human-readable label, falling back through the identifying fields
    pub fn label(&self) -> &str {
        self.display_name()
            .or(self.name())
            .or(self.window_class())
            .or(self.executable())
            .or(self.command_line())
            .unwrap_or("")
    }

    /// Command to run when no catalog launch is possible
    pub fn fallback_command(&self) -> Option<&str> {
        self.command_line()
            .or(self.executable())
            .or(self.name())
    }
}

/// One element of the persisted `pinned_apps` array: either a legacy bare
/// string or a full entry object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawPinned {
    Legacy(String),
    Entry(PinnedEntry),
}

/// What a slot stands for: a persisted entry or a raw identifier derived
/// from a running window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Raw(String),
    Entry(PinnedEntry),
}

impl Identifier {
    pub fn label(&self) -> &str {
        match self {
            Identifier::Raw(raw) => raw,
            Identifier::Entry(entry) => entry.label(),
        }
    }

    pub fn fallback_command(&self) -> Option<&str> {
        match self {
            Identifier::Raw(raw) => Some(raw.as_str()).filter(|r| !r.is_empty()),
            Identifier::Entry(entry) => entry.fallback_command(),
        }
    }
}

/// One application unit in the dock
#[derive(Debug, Clone, PartialEq)]
pub struct AppSlot {
    pub identity: Identifier,
    pub resolved_app: Option<CatalogApp>,
    pub instances: Vec<LiveWindow>,
    pub is_pinned: bool,
}

impl AppSlot {
    pub fn label(&self) -> &str {
        match &self.resolved_app {
            Some(app) if !app.display_name.is_empty() => &app.display_name,
            _ => self.identity.label(),
        }
    }
}

/// Dock content is an ordered sequence of app slots with at most one
/// separator between the pinned and the running-only groups
#[derive(Debug, Clone, PartialEq)]
pub enum DockSlot {
    App(AppSlot),
    Separator,
}

impl DockSlot {
    pub fn as_app(&self) -> Option<&AppSlot> {
        match self {
            DockSlot::App(slot) => Some(slot),
            DockSlot::Separator => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, DockSlot::Separator)
    }

    pub fn is_pinned(&self) -> bool {
        self.as_app().is_some_and(|slot| slot.is_pinned)
    }
}

/// Timers owned by the dock's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTimer {
    HideDelay,
    OcclusionPoll,
    ConfigPoll,
}

/// Snapshot of one slot for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    pub pinned: bool,
    pub separator: bool,
    pub instances: usize,
    pub focused: bool,
}

impl SlotView {
    pub fn separator() -> Self {
        Self {
            label: String::new(),
            app: None,
            icon: None,
            pinned: false,
            separator: true,
            instances: 0,
            focused: false,
        }
    }
}

/// Everything the renderer needs to draw the dock
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DockView {
    pub revealed: bool,
    pub workspace: WorkspaceId,
    pub slots: Vec<SlotView>,
}
