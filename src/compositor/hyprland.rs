//! Hyprland backend via the hyprctl request socket

use crate::compositor::pure::occlusion::{dock_monitor, dock_region, region_occluded};
use crate::compositor::pure::parse::{
    parse_active_window_address, parse_clients, parse_monitors, parse_workspace_id,
};
use crate::compositor::types::{Edge, LiveWindow, MonitorInfo, QueryError, Rect, WorkspaceId};
use crate::compositor::{Address, WindowSource};
use std::cell::Cell;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::time::Duration;

/// Replies slower than this are treated as failures; the dock shares its
/// thread with rendering and cannot wait on a stuck compositor.
const SOCKET_TIMEOUT: Duration = Duration::from_millis(50);

pub struct HyprlandSource {
    instance_dir: Option<PathBuf>,
    include_floating: Cell<bool>,
}

impl HyprlandSource {
    pub fn new() -> Self {
        Self {
            instance_dir: Self::find_instance_dir(),
            include_floating: Cell::new(true),
        }
    }

    fn find_instance_dir() -> Option<PathBuf> {
        let runtime_dir = std::env::var("XDG_RUNTIME_DIR").ok()?;
        let signature = std::env::var("HYPRLAND_INSTANCE_SIGNATURE").ok()?;

        let dir = PathBuf::from(&runtime_dir).join("hypr").join(&signature);
        if dir.join(".socket.sock").exists() {
            return Some(dir);
        }

        // Hyprland < 0.40 kept its sockets under /tmp
        let legacy = PathBuf::from("/tmp/hypr").join(&signature);
        if legacy.join(".socket.sock").exists() {
            Some(legacy)
        } else {
            None
        }
    }

    /// Path of the event socket (`.socket2.sock`)
    pub fn event_socket_path(&self) -> Option<PathBuf> {
        self.instance_dir.as_ref().map(|d| d.join(".socket2.sock"))
    }

    fn hyprctl(&self, command: &str) -> Result<String, QueryError> {
        let socket_path = self
            .instance_dir
            .as_ref()
            .map(|d| d.join(".socket.sock"))
            .ok_or(QueryError::SocketNotFound)?;

        let mut stream = UnixStream::connect(socket_path)?;
        stream.set_read_timeout(Some(SOCKET_TIMEOUT))?;
        stream.set_write_timeout(Some(SOCKET_TIMEOUT))?;
        stream.write_all(command.as_bytes())?;
        stream.flush()?;

        let mut response = String::new();
        stream.read_to_string(&mut response)?;

        Ok(response)
    }

    fn dispatch(&self, dispatcher: &str, arg: &str) {
        let command = format!("dispatch {} {}", dispatcher, arg);
        match self.hyprctl(&command) {
            Ok(reply) if reply.trim() == "ok" => {}
            Ok(reply) => log::warn!("Hyprland rejected `{}`: {}", command, reply.trim()),
            Err(e) => log::warn!("Failed to send `{}`: {}", command, e),
        }
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, QueryError> {
        parse_monitors(&self.hyprctl("j/monitors")?)
    }

    fn occlusion_inputs(
        &self,
        edge: Edge,
        thickness: u32,
    ) -> Result<(Vec<LiveWindow>, MonitorInfo, Rect), QueryError> {
        let monitors = self.monitors()?;
        let monitor = dock_monitor(&monitors)
            .cloned()
            .ok_or_else(|| QueryError::Reply("no monitors reported".to_string()))?;
        let region = dock_region(monitor.logical_rect(), edge, thickness);
        let windows = self.list_windows()?;
        Ok((windows, monitor, region))
    }
}

impl Default for HyprlandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSource for HyprlandSource {
    fn list_windows(&self) -> Result<Vec<LiveWindow>, QueryError> {
        let windows = parse_clients(&self.hyprctl("j/clients")?)?;
        Ok(windows.into_iter().filter(|w| w.mapped).collect())
    }

    fn focused_window_address(&self) -> Option<Address> {
        match self.hyprctl("j/activewindow") {
            Ok(reply) => parse_active_window_address(&reply),
            Err(e) => {
                log::debug!("Active window query failed: {}", e);
                None
            }
        }
    }

    fn active_workspace_id(&self) -> WorkspaceId {
        match self.hyprctl("j/activeworkspace") {
            Ok(reply) => parse_workspace_id(&reply).unwrap_or(0),
            Err(e) => {
                log::debug!("Active workspace query failed: {}", e);
                0
            }
        }
    }

    fn focus_window(&self, address: &str) {
        self.dispatch("focuswindow", &format!("address:{}", address));
    }

    fn close_window(&self, address: &str) {
        self.dispatch("closewindow", &format!("address:{}", address));
    }

    fn is_region_occluded(&self, edge: Edge, thickness: u32) -> bool {
        match self.occlusion_inputs(edge, thickness) {
            Ok((windows, monitor, region)) => {
                region_occluded(&windows, &monitor, &region, self.include_floating.get())
            }
            Err(e) => {
                log::debug!("Occlusion query failed: {}", e);
                false
            }
        }
    }

    fn dock_region(&self, edge: Edge, thickness: u32) -> Option<Rect> {
        let monitors = self.monitors().ok()?;
        let monitor = dock_monitor(&monitors)?;
        Some(dock_region(monitor.logical_rect(), edge, thickness))
    }

    fn set_occlusion_includes_floating(&self, include: bool) {
        self.include_floating.set(include);
    }
}
