use serde::Serialize;
use thiserror::Error;

/// One installed application. Read-only from the dock's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CatalogApp {
    /// Stable identifier (desktop id, e.g. "org.mozilla.firefox")
    pub name: String,
    pub display_name: String,
    pub window_class: Option<String>,
    /// Executable path or bare program name
    pub executable: Option<String>,
    /// Launch command with desktop-entry field codes removed
    pub command_line: Option<String>,
    /// Icon name or absolute path
    pub icon: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read desktop file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no [Desktop Entry] group")]
    MissingGroup,
    #[error("missing required key {0}")]
    MissingKey(&'static str),
    #[error("entry type {0} is not an application")]
    NotApplication(String),
    #[error("entry is marked hidden")]
    Hidden,
}
