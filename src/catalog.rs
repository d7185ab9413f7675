//! Installed-application catalog
//!
//! The dock looks applications up by identifier and launches them; it never
//! owns catalog entries. `DesktopCatalog` reads XDG `.desktop` files.

mod desktop;
pub mod operations;
pub mod pure;
mod types;

pub use desktop::DesktopCatalog;
pub use types::{CatalogApp, CatalogError};

use std::path::PathBuf;

/// Application lookup and launching as consumed by the dock
pub trait AppCatalog {
    /// All installed applications, in the catalog's enumeration order
    fn list_apps(&self) -> Vec<CatalogApp>;

    /// Launch `app`; returns false when the launch could not be started
    fn launch(&self, app: &CatalogApp) -> bool;

    /// Run an arbitrary command line detached from the dock
    fn run_command(&self, command_line: &str) -> bool {
        operations::launch::spawn_detached(command_line)
    }

    /// Icon file for `app` at roughly `size` px
    fn icon(&self, _app: &CatalogApp, _size: u32) -> Option<PathBuf> {
        None
    }
}
