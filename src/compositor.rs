//! Compositor access layer for the dock
//!
//! The dock only needs a narrow view of the compositor: a snapshot of mapped
//! windows, the focused window, focus/close dispatch and a geometry check for
//! the strip of screen the dock occupies. Hyprland is the one backend.

mod events;
mod hyprland;
pub mod pure;
mod types;

pub use events::{spawn_event_reader, CompositorEvent};
pub use hyprland::HyprlandSource;
pub use types::{Address, Edge, LiveWindow, MonitorInfo, QueryError, Rect, WorkspaceId};

/// Window snapshot and geometry queries the dock consumes.
///
/// Only `list_windows` reports failure; every other call degrades to an
/// empty/default value so the dock treats errors as "no windows known".
pub trait WindowSource {
    fn list_windows(&self) -> Result<Vec<LiveWindow>, QueryError>;

    fn focused_window_address(&self) -> Option<Address>;

    fn active_workspace_id(&self) -> WorkspaceId;

    fn focus_window(&self, address: &str);

    fn close_window(&self, address: &str);

    /// Whether a window currently covers the strip of `thickness` px along `edge`
    fn is_region_occluded(&self, edge: Edge, thickness: u32) -> bool;

    /// Screen rectangle of that strip, if the monitor geometry is known
    fn dock_region(&self, edge: Edge, thickness: u32) -> Option<Rect>;

    /// Whether floating windows count for `is_region_occluded`
    fn set_occlusion_includes_floating(&self, _include: bool) {}
}
