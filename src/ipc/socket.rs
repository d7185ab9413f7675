// Control socket and stdin readers. Both only parse and forward; all dock
// state stays on the logic thread.

use crate::ipc::protocol::{parse_line, UiCommand};

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

fn forward_lines<R, F>(reader: R, source: &str, forward: &F) -> bool
where
    R: BufRead,
    F: Fn(UiCommand) -> bool,
{
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Reading {} failed: {}", source, e);
                return true;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(command) => {
                if !forward(command) {
                    return false;
                }
            }
            Err(e) => log::warn!("Ignoring {} line {:?}: {}", source, line, e),
        }
    }
    true
}

/// Bind the control socket (replacing a stale one) and forward every
/// command received on it.
pub fn spawn_control_listener<F>(path: PathBuf, forward: F) -> std::io::Result<JoinHandle<()>>
where
    F: Fn(UiCommand) -> bool + Send + 'static,
{
    if path.exists() {
        if UnixStream::connect(&path).is_ok() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!("another dock is listening on {}", path.display()),
            ));
        }
        std::fs::remove_file(&path)?;
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let listener = UnixListener::bind(&path)?;
    log::info!("Control socket at {}", path.display());

    std::thread::Builder::new()
        .name("hyprdock-control".to_string())
        .spawn(move || {
            for stream in listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(e) => {
                        log::warn!("Control socket accept failed: {}", e);
                        continue;
                    }
                };
                let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
                if !forward_lines(BufReader::new(stream), "control socket", &forward) {
                    break;
                }
            }
            let _ = std::fs::remove_file(&path);
        })
}

pub fn spawn_stdin_reader<F>(forward: F) -> std::io::Result<JoinHandle<()>>
where
    F: Fn(UiCommand) -> bool + Send + 'static,
{
    std::thread::Builder::new()
        .name("hyprdock-stdin".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            forward_lines(stdin.lock(), "stdin", &forward);
            log::debug!("stdin closed");
        })
}

/// Send one command line to a running daemon
pub fn send_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut stream = UnixStream::connect(path)?;
    stream.set_write_timeout(Some(Duration::from_millis(500)))?;
    stream.write_all(line.trim_end().as_bytes())?;
    stream.write_all(b"\n")?;
    Ok(())
}
