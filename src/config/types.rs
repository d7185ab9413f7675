use crate::compositor::Edge;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Dock settings, read from settings.json and re-read while running
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DockConfig {
    /// Screen edge the dock is anchored to
    pub edge: Edge,
    /// Thickness in logical pixels of the strip the dock occupies when revealed
    pub thickness: u32,
    /// Keep the dock hidden unless hovered or dragged, regardless of windows
    pub always_occluded: bool,
    /// Delay between pointer leaving the dock and the hide decision
    pub hide_delay_ms: u64,
    /// Cadence of the occlusion re-check
    pub occlusion_poll_ms: u64,
    /// Cadence of the pinned-list / settings / window-list re-check
    pub config_poll_ms: u64,
    /// Whether floating windows over the dock strip count as occluding it
    pub occlusion_includes_floating: bool,
    /// Pinned-list location override (None = default path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_path: Option<PathBuf>,
}

impl Default for DockConfig {
    fn default() -> Self {
        DockConfig {
            edge: Edge::Bottom,
            thickness: 56,
            always_occluded: false,
            hide_delay_ms: 250,
            occlusion_poll_ms: 250,
            config_poll_ms: 1000,
            occlusion_includes_floating: true,
            pinned_path: None,
        }
    }
}

impl DockConfig {
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn occlusion_poll(&self) -> Duration {
        Duration::from_millis(self.occlusion_poll_ms.max(1))
    }

    pub fn config_poll(&self) -> Duration {
        Duration::from_millis(self.config_poll_ms.max(1))
    }
}
