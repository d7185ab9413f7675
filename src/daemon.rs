// Dock daemon: one logic thread fed by reader threads over a channel

use crate::catalog::{AppCatalog, DesktopCatalog};
use crate::compositor::{spawn_event_reader, CompositorEvent, HyprlandSource, WindowSource};
use crate::config::DockConfig;
use crate::dock::{Dock, DockView, DropOutcome, PinnedConfigBus};
use crate::ipc::{spawn_control_listener, spawn_stdin_reader, DropPlace, UiCommand};
use crate::paths::{PATH_CONTROL_SOCKET, PATH_DATA_DIRS, PATH_PINNED, PATH_SETTINGS};

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

pub type DockResult<T> = Result<T, Box<dyn Error>>;

/// Idle wait when no timer is armed
const IDLE_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug)]
enum Message {
    Ui(UiCommand),
    Compositor(CompositorEvent),
}

pub fn pinned_path(config: &DockConfig) -> PathBuf {
    config
        .pinned_path
        .clone()
        .unwrap_or_else(|| PATH_PINNED.clone())
}

/// Apply one renderer/CLI command. Returns true if the view changed.
pub fn apply_command<W: WindowSource, C: AppCatalog>(
    dock: &mut Dock<W, C>,
    bus: &PinnedConfigBus,
    command: UiCommand,
    now: Instant,
) -> bool {
    match command {
        UiCommand::HoverEnter => dock.hover_enter(),
        UiCommand::HoverLeave(detail) => {
            dock.hover_leave(detail, now);
            false
        }
        UiCommand::DragBegin(slot) => dock.begin_drag(slot),
        UiCommand::Drop { source, target } => dock.on_drop(source, target) != DropOutcome::Ignored,
        UiCommand::DragEnd { slot, place } => {
            let outside = match place {
                DropPlace::Inside => false,
                DropPlace::Outside => true,
                DropPlace::At(x, y) => dock.drop_is_outside(x, y),
            };
            dock.end_drag(slot, outside)
        }
        UiCommand::Activate(slot) => {
            dock.activate(slot);
            false
        }
        UiCommand::Notify => {
            bus.notify_pinned_config_changed();
            dock.handle_pending_notifications()
        }
        UiCommand::Reconcile => dock.reconcile(),
    }
}

fn emit(out: &mut impl Write, view: &DockView) -> DockResult<()> {
    serde_json::to_writer(&mut *out, view)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn spawn_readers(tx: &Sender<Message>, source: &HyprlandSource) {
    let stdin_tx = tx.clone();
    if let Err(e) = spawn_stdin_reader(move |cmd| stdin_tx.send(Message::Ui(cmd)).is_ok()) {
        log::warn!("Could not read commands from stdin: {}", e);
    }

    let socket_tx = tx.clone();
    if let Err(e) = spawn_control_listener(PATH_CONTROL_SOCKET.clone(), move |cmd| {
        socket_tx.send(Message::Ui(cmd)).is_ok()
    }) {
        log::warn!("Control socket unavailable: {}", e);
    }

    match source.event_socket_path() {
        Some(path) => {
            let event_tx = tx.clone();
            if let Err(e) = spawn_event_reader(path, move |event| {
                event_tx.send(Message::Compositor(event)).is_ok()
            }) {
                log::warn!("No compositor event stream, relying on polling: {}", e);
            }
        }
        None => log::warn!("Hyprland instance not found; the dock will show no windows"),
    }
}

/// One turn of the logic loop. Returns whether the view changed, or None
/// once every sender is gone.
fn step<W: WindowSource, C: AppCatalog>(
    dock: &mut Dock<W, C>,
    bus: &PinnedConfigBus,
    received: Result<Message, RecvTimeoutError>,
) -> Option<bool> {
    let mut changed = match received {
        Ok(Message::Ui(command)) => {
            log::debug!("Command {:?}", command);
            apply_command(dock, bus, command, Instant::now())
        }
        Ok(Message::Compositor(event)) => {
            log::trace!("Compositor event {:?}", event);
            dock.request_reconcile()
        }
        Err(RecvTimeoutError::Timeout) => false,
        Err(RecvTimeoutError::Disconnected) => {
            log::info!("All command inputs closed");
            return None;
        }
    };
    changed |= dock.fire_due(Instant::now());
    changed |= dock.handle_pending_notifications();
    Some(changed)
}

/// Run the dock until every reader thread has stopped or stdout closes. The
/// logic thread owns the dock; reader threads only forward messages.
pub fn run(config: DockConfig) -> DockResult<()> {
    let source = HyprlandSource::new();
    let catalog = DesktopCatalog::load(&PATH_DATA_DIRS);
    let bus = PinnedConfigBus::new();

    let (tx, rx) = mpsc::channel();
    spawn_readers(&tx, &source);
    // Only the reader threads hold senders now
    drop(tx);

    let path = pinned_path(&config);
    let mut dock = Dock::new(source, catalog, config, path, &bus)
        .with_settings_path(PATH_SETTINGS.clone());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &dock.view())?;

    loop {
        let wait = dock
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);

        let Some(changed) = step(&mut dock, &bus, rx.recv_timeout(wait)) else {
            break;
        };

        if changed {
            if let Err(e) = emit(&mut out, &dock.view()) {
                log::error!("Renderer output closed: {}", e);
                break;
            }
        }
    }

    log::info!("Dock stopped");
    Ok(())
}
