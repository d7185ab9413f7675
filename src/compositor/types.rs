use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compositor window handle (Hyprland prints these as "0x55d1...")
pub type Address = String;

pub type WorkspaceId = i64;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Hyprland socket not found")]
    SocketNotFound,
    #[error("compositor I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse compositor reply: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unexpected compositor reply: {0}")]
    Reply(String),
}

/// Screen edge the dock is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Axis-aligned rectangle in logical compositor coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Overlap with positive area; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// One mapped compositor window, valid for a single reconciliation pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveWindow {
    pub address: Address,
    pub class: String,
    /// Class reported when the window was created; used when `class` is empty
    pub initial_class: String,
    pub title: String,
    pub workspace_id: WorkspaceId,
    pub monitor: i64,
    pub floating: bool,
    pub fullscreen: bool,
    pub mapped: bool,
    pub hidden: bool,
    pub rect: Rect,
}

/// Monitor geometry from the compositor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    pub id: i64,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub focused: bool,
    pub active_workspace: WorkspaceId,
}

impl MonitorInfo {
    /// Monitor area in logical coordinates.
    ///
    /// Hyprland reports the position in layout space already but the size in
    /// physical pixels, so only the size is divided by the scale.
    pub fn logical_rect(&self) -> Rect {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        Rect::new(
            self.x,
            self.y,
            (self.width as f64 / scale).round() as i32,
            (self.height as f64 / scale).round() as i32,
        )
    }
}
