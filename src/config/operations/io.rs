use crate::config::types::DockConfig;
use crate::paths::PATH_SETTINGS;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn load_cfg() -> DockConfig {
    load_cfg_from(&PATH_SETTINGS)
}

/// Load settings from `path`, falling back to defaults on any error
pub fn load_cfg_from(path: &Path) -> DockConfig {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to open settings {}: {}", path.display(), e);
            }
            return DockConfig::default();
        }
    };

    match serde_json::from_reader::<_, DockConfig>(BufReader::new(file)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!(
                "Malformed settings {}, using defaults: {}",
                path.display(),
                e
            );
            DockConfig::default()
        }
    }
}

pub fn save_cfg(path: &Path, config: &DockConfig) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
