use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
});

pub static PATH_CONFIG: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return PathBuf::from(xdg_config_home).join("hyprdock");
        }
    }
    PATH_HOME.join(".config/hyprdock")
});

pub static PATH_SETTINGS: LazyLock<PathBuf> = LazyLock::new(|| PATH_CONFIG.join("settings.json"));

pub static PATH_PINNED: LazyLock<PathBuf> = LazyLock::new(|| PATH_CONFIG.join("pinned.json"));

pub static PATH_RUNTIME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var("XDG_RUNTIME_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir)
});

/// Control socket other processes use to poke a running dock
pub static PATH_CONTROL_SOCKET: LazyLock<PathBuf> =
    LazyLock::new(|| PATH_RUNTIME.join("hyprdock.sock"));

/// XDG data directories in lookup priority order (user dir first)
pub static PATH_DATA_DIRS: LazyLock<Vec<PathBuf>> = LazyLock::new(|| {
    data_dirs_from(
        env::var("XDG_DATA_HOME").ok(),
        env::var("XDG_DATA_DIRS").ok(),
        &PATH_HOME,
    )
});

/// Build the data directory list from raw XDG variables.
///
/// Empty or missing variables fall back to the XDG defaults; duplicate
/// entries keep their first (highest priority) position.
pub fn data_dirs_from(
    data_home: Option<String>,
    data_dirs: Option<String>,
    home: &PathBuf,
) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    match data_home.filter(|s| !s.is_empty()) {
        Some(dir) => dirs.push(PathBuf::from(dir)),
        None => dirs.push(home.join(".local/share")),
    }

    let system = data_dirs
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());

    for dir in system.split(':').filter(|d| !d.is_empty()) {
        let path = PathBuf::from(dir);
        if !dirs.contains(&path) {
            dirs.push(path);
        }
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dirs_defaults_when_unset() {
        let home = PathBuf::from("/home/user");
        let dirs = data_dirs_from(None, None, &home);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/home/user/.local/share"),
                PathBuf::from("/usr/local/share"),
                PathBuf::from("/usr/share"),
            ]
        );
    }

    #[test]
    fn data_dirs_respects_overrides_and_dedups() {
        let home = PathBuf::from("/home/user");
        let dirs = data_dirs_from(
            Some("/data".to_string()),
            Some("/opt/share::/data:/usr/share".to_string()),
            &home,
        );
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/data"),
                PathBuf::from("/opt/share"),
                PathBuf::from("/usr/share"),
            ]
        );
    }

    #[test]
    fn data_dirs_empty_strings_fall_back() {
        let home = PathBuf::from("/h");
        let dirs = data_dirs_from(Some(String::new()), Some(String::new()), &home);
        assert_eq!(dirs[0], PathBuf::from("/h/.local/share"));
        assert_eq!(dirs.len(), 3);
    }
}
