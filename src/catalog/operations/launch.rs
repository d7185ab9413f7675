// Detached command execution

use std::process::{Command, Stdio};

/// Run `command_line` through `sh` in the background and return immediately.
///
/// The shell backgrounds the command and exits, so waiting on it leaves no
/// zombie while the launched program is reparented away from the dock.
pub fn spawn_detached(command_line: &str) -> bool {
    let command_line = command_line.trim();
    if command_line.is_empty() {
        log::warn!("Refusing to launch an empty command");
        return false;
    }

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{} >/dev/null 2>&1 &", command_line))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => {
            log::info!("Launched `{}`", command_line);
            true
        }
        Ok(status) => {
            log::warn!("Launching `{}` failed: {}", command_line, status);
            false
        }
        Err(e) => {
            log::error!("Failed to start shell for `{}`: {}", command_line, e);
            false
        }
    }
}
