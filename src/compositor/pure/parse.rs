// Pure parsers for Hyprland JSON replies (no I/O)

use crate::compositor::types::{Address, LiveWindow, MonitorInfo, QueryError, Rect, WorkspaceId};
use serde_json::Value;

fn str_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or("").to_string()
}

/// Hyprland changed `fullscreen` from a bool to a mode number; accept both.
fn flag_field(value: &Value, key: &str) -> bool {
    let field = &value[key];
    field
        .as_bool()
        .or_else(|| field.as_i64().map(|v| v != 0))
        .unwrap_or(false)
}

fn pair_field(value: &Value, key: &str) -> (i32, i32) {
    let pair = &value[key];
    (
        pair[0].as_i64().unwrap_or(0) as i32,
        pair[1].as_i64().unwrap_or(0) as i32,
    )
}

/// Parse `j/clients` into window snapshots. Entries without an address are skipped.
pub fn parse_clients(response: &str) -> Result<Vec<LiveWindow>, QueryError> {
    let clients: Value = serde_json::from_str(response)?;
    let arr = clients
        .as_array()
        .ok_or_else(|| QueryError::Reply("clients reply is not an array".to_string()))?;

    let mut windows = Vec::with_capacity(arr.len());
    for client in arr {
        let Some(address) = client["address"].as_str() else {
            continue;
        };
        let (x, y) = pair_field(client, "at");
        let (width, height) = pair_field(client, "size");

        windows.push(LiveWindow {
            address: address.to_string(),
            class: str_field(client, "class"),
            initial_class: str_field(client, "initialClass"),
            title: str_field(client, "title"),
            workspace_id: client["workspace"]["id"].as_i64().unwrap_or(0),
            monitor: client["monitor"].as_i64().unwrap_or(-1),
            floating: flag_field(client, "floating"),
            fullscreen: flag_field(client, "fullscreen"),
            // Older Hyprland builds omit `mapped`; everything listed is mapped there
            mapped: client["mapped"].as_bool().unwrap_or(true),
            hidden: flag_field(client, "hidden"),
            rect: Rect::new(x, y, width, height),
        });
    }
    Ok(windows)
}

/// Parse `j/activewindow`; Hyprland answers `{}` when nothing is focused.
pub fn parse_active_window_address(response: &str) -> Option<Address> {
    let value: Value = serde_json::from_str(response).ok()?;
    value["address"]
        .as_str()
        .filter(|a| !a.is_empty())
        .map(str::to_string)
}

/// Parse `j/activeworkspace`
pub fn parse_workspace_id(response: &str) -> Option<WorkspaceId> {
    let value: Value = serde_json::from_str(response).ok()?;
    value["id"].as_i64()
}

/// Parse `j/monitors`
pub fn parse_monitors(response: &str) -> Result<Vec<MonitorInfo>, QueryError> {
    let monitors: Value = serde_json::from_str(response)?;
    let arr = monitors
        .as_array()
        .ok_or_else(|| QueryError::Reply("monitors reply is not an array".to_string()))?;

    Ok(arr
        .iter()
        .map(|mon| MonitorInfo {
            id: mon["id"].as_i64().unwrap_or(0),
            name: str_field(mon, "name"),
            x: mon["x"].as_i64().unwrap_or(0) as i32,
            y: mon["y"].as_i64().unwrap_or(0) as i32,
            width: mon["width"].as_u64().unwrap_or(1920) as u32,
            height: mon["height"].as_u64().unwrap_or(1080) as u32,
            scale: mon["scale"].as_f64().unwrap_or(1.0),
            focused: mon["focused"].as_bool().unwrap_or(false),
            active_workspace: mon["activeWorkspace"]["id"].as_i64().unwrap_or(0),
        })
        .collect())
}
