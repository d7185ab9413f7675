// In-memory collaborators for dock tests

use crate::catalog::{AppCatalog, CatalogApp};
use crate::compositor::{Address, Edge, LiveWindow, QueryError, Rect, WindowSource, WorkspaceId};
use crate::config::DockConfig;
use crate::dock::bus::PinnedConfigBus;
use crate::dock::operations::persistence::write_document;
use crate::dock::state::Dock;
use crate::dock::types::PinnedEntry;

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::Map;
use std::cell::{Cell, RefCell};

#[derive(Default)]
pub struct FakeSource {
    pub windows: RefCell<Vec<LiveWindow>>,
    pub fail: Cell<bool>,
    pub focused: RefCell<Option<Address>>,
    pub workspace: Cell<WorkspaceId>,
    pub occluded: Cell<bool>,
    pub region: Cell<Option<Rect>>,
    pub include_floating: Cell<bool>,
    pub list_calls: Cell<usize>,
    pub occlusion_calls: Cell<usize>,
    pub focus_calls: RefCell<Vec<String>>,
    pub close_calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_windows(windows: Vec<LiveWindow>) -> Self {
        Self {
            windows: RefCell::new(windows),
            workspace: Cell::new(1),
            include_floating: Cell::new(true),
            ..Self::default()
        }
    }
}

impl WindowSource for FakeSource {
    fn list_windows(&self) -> Result<Vec<LiveWindow>, QueryError> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail.get() {
            return Err(QueryError::SocketNotFound);
        }
        Ok(self.windows.borrow().clone())
    }

    fn focused_window_address(&self) -> Option<Address> {
        self.focused.borrow().clone()
    }

    fn active_workspace_id(&self) -> WorkspaceId {
        self.workspace.get()
    }

    fn focus_window(&self, address: &str) {
        self.focus_calls.borrow_mut().push(address.to_string());
    }

    fn close_window(&self, address: &str) {
        self.close_calls.borrow_mut().push(address.to_string());
    }

    fn is_region_occluded(&self, _edge: Edge, _thickness: u32) -> bool {
        self.occlusion_calls.set(self.occlusion_calls.get() + 1);
        self.occluded.get()
    }

    fn dock_region(&self, _edge: Edge, _thickness: u32) -> Option<Rect> {
        self.region.get()
    }

    fn set_occlusion_includes_floating(&self, include: bool) {
        self.include_floating.set(include);
    }
}

pub struct FakeCatalog {
    pub apps: Vec<CatalogApp>,
    pub launch_ok: Cell<bool>,
    pub command_ok: Cell<bool>,
    pub launched: RefCell<Vec<String>>,
    pub commands: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn new(apps: Vec<CatalogApp>) -> Self {
        Self {
            apps,
            launch_ok: Cell::new(true),
            command_ok: Cell::new(true),
            launched: RefCell::new(Vec::new()),
            commands: RefCell::new(Vec::new()),
        }
    }
}

impl AppCatalog for FakeCatalog {
    fn list_apps(&self) -> Vec<CatalogApp> {
        self.apps.clone()
    }

    fn launch(&self, app: &CatalogApp) -> bool {
        self.launched.borrow_mut().push(app.name.clone());
        self.launch_ok.get()
    }

    fn run_command(&self, command_line: &str) -> bool {
        self.commands.borrow_mut().push(command_line.to_string());
        self.command_ok.get()
    }
}

pub fn make_window(address: &str, class: &str) -> LiveWindow {
    LiveWindow {
        address: address.to_string(),
        class: class.to_string(),
        title: class.to_string(),
        workspace_id: 1,
        mapped: true,
        ..LiveWindow::default()
    }
}

pub fn make_app(name: &str, display: &str, class: &str) -> CatalogApp {
    CatalogApp {
        name: name.to_string(),
        display_name: display.to_string(),
        window_class: Some(class.to_string()),
        executable: Some(format!("/usr/bin/{}", name)),
        command_line: Some(format!("/usr/bin/{}", name)),
        icon: None,
    }
}

pub fn entry(name: &str) -> PinnedEntry {
    PinnedEntry {
        name: Some(name.to_string()),
        window_class: Some(name.to_string()),
        ..PinnedEntry::default()
    }
}

pub fn default_apps() -> Vec<CatalogApp> {
    vec![
        make_app("firefox", "Firefox", "firefox"),
        make_app("code", "Code", "code"),
        make_app("nautilus", "Files", "org.gnome.Nautilus"),
    ]
}

pub struct TestDock {
    pub dock: Dock<FakeSource, FakeCatalog>,
    pub bus: PinnedConfigBus,
    pub dir: tempfile::TempDir,
}

impl TestDock {
    pub fn pinned_path(&self) -> std::path::PathBuf {
        self.dir.path().join("pinned.json")
    }
}

/// Dock over fakes with `pinned` already on disk
pub fn make_dock(pinned: &[PinnedEntry], windows: Vec<LiveWindow>) -> TestDock {
    make_dock_with(pinned, windows, DockConfig::default())
}

pub fn make_dock_with(
    pinned: &[PinnedEntry],
    windows: Vec<LiveWindow>,
    config: DockConfig,
) -> TestDock {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pinned.json");
    write_document(&path, pinned, &Map::new()).unwrap();

    let bus = PinnedConfigBus::new();
    let dock = Dock::new(
        FakeSource::with_windows(windows),
        FakeCatalog::new(default_apps()),
        config,
        path,
        &bus,
    );
    TestDock { dock, bus, dir }
}

// ── log capture ─────────────────────────────────────────────────────

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Run `f` and return the log records it produced on this thread
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    // Already installed by an earlier test on another thread
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    CAPTURED.with(|c| c.borrow_mut().clear());
    let out = f();
    (out, CAPTURED.with(|c| c.take()))
}
