//! Catalog backed by XDG `.desktop` files

use crate::catalog::operations::icons::find_icon;
use crate::catalog::operations::launch::spawn_detached;
use crate::catalog::pure::desktop_entry::{desktop_id, parse_desktop_entry};
use crate::catalog::{AppCatalog, CatalogApp, CatalogError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct DesktopCatalog {
    apps: Vec<CatalogApp>,
    data_dirs: Vec<PathBuf>,
}

impl DesktopCatalog {
    /// Scan `<dir>/applications` for every data dir, in priority order.
    ///
    /// Order is deterministic: data-dir priority first, then path order
    /// within a dir. A desktop id already seen in a higher-priority dir
    /// shadows later copies.
    pub fn load(data_dirs: &[PathBuf]) -> Self {
        let mut apps = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for dir in data_dirs {
            let app_dir = dir.join("applications");
            if !app_dir.is_dir() {
                continue;
            }

            let mut files: Vec<PathBuf> = WalkDir::new(&app_dir)
                .min_depth(1)
                .max_depth(4)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "desktop"))
                .collect();
            files.sort();

            for file in files {
                let Some(id) = file.strip_prefix(&app_dir).ok().and_then(desktop_id) else {
                    continue;
                };
                if !seen.insert(id.clone()) {
                    continue;
                }
                match Self::read_entry(&id, &file) {
                    Ok(app) => apps.push(app),
                    Err(e) => log::debug!("Skipping {}: {}", file.display(), e),
                }
            }
        }

        log::info!("Loaded {} applications from desktop files", apps.len());

        Self {
            apps,
            data_dirs: data_dirs.to_vec(),
        }
    }

    fn read_entry(id: &str, path: &Path) -> Result<CatalogApp, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        parse_desktop_entry(id, &contents)
    }
}

impl AppCatalog for DesktopCatalog {
    fn list_apps(&self) -> Vec<CatalogApp> {
        self.apps.clone()
    }

    fn launch(&self, app: &CatalogApp) -> bool {
        match app.command_line.as_deref() {
            Some(command) => spawn_detached(command),
            None => {
                log::warn!("{} has no launch command", app.name);
                false
            }
        }
    }

    fn icon(&self, app: &CatalogApp, size: u32) -> Option<PathBuf> {
        find_icon(app.icon.as_deref()?, size, &self.data_dirs)
    }
}
