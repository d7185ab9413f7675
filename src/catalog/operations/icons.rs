// Best-effort icon file lookup. Full icon-theme resolution belongs to the renderer.

use std::path::{Path, PathBuf};

const EXTENSIONS: &[&str] = &["png", "svg", "xpm"];

/// Find a file for `icon` (a name or an absolute path) near `size` px.
pub fn find_icon(icon: &str, size: u32, data_dirs: &[PathBuf]) -> Option<PathBuf> {
    let as_path = Path::new(icon);
    if as_path.is_absolute() {
        return as_path.exists().then(|| as_path.to_path_buf());
    }

    for dir in data_dirs {
        let candidates = [
            dir.join(format!("icons/hicolor/{}x{}/apps", size, size)),
            dir.join("icons/hicolor/scalable/apps"),
            dir.join("pixmaps"),
        ];
        for base in &candidates {
            for ext in EXTENSIONS {
                let file = base.join(format!("{}.{}", icon, ext));
                if file.exists() {
                    return Some(file);
                }
            }
        }
    }
    None
}
