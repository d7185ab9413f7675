// Pure occlusion geometry (no I/O)

use crate::compositor::types::{Edge, LiveWindow, MonitorInfo, Rect};

/// The strip of `thickness` px the dock occupies along `edge` of `area`.
/// Thickness is clamped to the area size.
pub fn dock_region(area: Rect, edge: Edge, thickness: u32) -> Rect {
    let t = thickness as i32;
    match edge {
        Edge::Top => Rect::new(area.x, area.y, area.width, t.min(area.height)),
        Edge::Bottom => {
            let h = t.min(area.height);
            Rect::new(area.x, area.y + area.height - h, area.width, h)
        }
        Edge::Left => Rect::new(area.x, area.y, t.min(area.width), area.height),
        Edge::Right => {
            let w = t.min(area.width);
            Rect::new(area.x + area.width - w, area.y, w, area.height)
        }
    }
}

/// Whether any visible window on the monitor's active workspace covers `region`.
///
/// Fullscreen windows always occlude. Floating windows are ignored unless
/// `include_floating` is set.
pub fn region_occluded(
    windows: &[LiveWindow],
    monitor: &MonitorInfo,
    region: &Rect,
    include_floating: bool,
) -> bool {
    windows
        .iter()
        .filter(|w| w.mapped && !w.hidden)
        .filter(|w| w.workspace_id == monitor.active_workspace)
        .any(|w| {
            if w.fullscreen {
                return true;
            }
            if w.floating && !include_floating {
                return false;
            }
            w.rect.intersects(region)
        })
}

/// Pick the monitor the dock lives on: the focused one, else the first.
pub fn dock_monitor(monitors: &[MonitorInfo]) -> Option<&MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.focused)
        .or_else(|| monitors.first())
}
