//! Hyprland event stream (`.socket2.sock`)
//!
//! The reader runs on its own thread and only forwards parsed events; all
//! dock state is mutated on the logic thread that receives them.

use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::thread::JoinHandle;

/// Compositor events that can change the dock's slot list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorEvent {
    WindowOpened,
    WindowClosed,
    FocusChanged,
    /// Title, workspace, floating or fullscreen change of an existing window
    WindowChanged,
    WorkspaceChanged,
}

/// Parse one `event>>data` line. Events the dock does not care about yield None.
pub fn parse_event_line(line: &str) -> Option<CompositorEvent> {
    let (name, _data) = line.split_once(">>")?;
    match name {
        "openwindow" => Some(CompositorEvent::WindowOpened),
        "closewindow" => Some(CompositorEvent::WindowClosed),
        "activewindowv2" => Some(CompositorEvent::FocusChanged),
        "movewindow" | "movewindowv2" | "windowtitle" | "windowtitlev2"
        | "changefloatingmode" | "fullscreen" => Some(CompositorEvent::WindowChanged),
        "workspace" | "workspacev2" | "focusedmon" | "focusedmonv2" => {
            Some(CompositorEvent::WorkspaceChanged)
        }
        _ => None,
    }
}

/// Connect to the event socket and forward events until it closes.
pub fn spawn_event_reader<F>(socket_path: PathBuf, forward: F) -> std::io::Result<JoinHandle<()>>
where
    F: Fn(CompositorEvent) -> bool + Send + 'static,
{
    let stream = UnixStream::connect(&socket_path)?;
    log::info!("Listening for compositor events on {}", socket_path.display());

    let handle = std::thread::Builder::new()
        .name("hyprland-events".to_string())
        .spawn(move || {
            for line in BufReader::new(stream).lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("Compositor event stream failed: {}", e);
                        break;
                    }
                };
                if let Some(event) = parse_event_line(&line) {
                    // Receiver gone means the dock is shutting down
                    if !forward(event) {
                        break;
                    }
                }
            }
            log::info!("Compositor event stream closed");
        })?;

    Ok(handle)
}
