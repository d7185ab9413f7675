// Identifier normalization and window-key derivation

use crate::compositor::LiveWindow;

/// Key used for windows with no class and no title
pub const UNKNOWN_APP: &str = "unknown-app";

/// Shortest string allowed to take part in a substring match
pub const MIN_SUBSTRING_LEN: usize = 3;

/// Packaging suffixes that show up in window classes but not in app ids
const CLASS_SUFFIXES: &[&str] = &[".bin", ".exe", ".so", "-bin", "-gtk"];

pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Lower-case and drop one known packaging suffix (`Code-bin` -> `code`).
pub fn normalize_class(s: &str) -> String {
    let lower = normalize(s);
    for suffix in CLASS_SUFFIXES {
        if let Some(stripped) = lower.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    lower
}

/// Last path component (`/usr/bin/firefox` -> `firefox`)
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Basename of the first token of a command line
pub fn command_basename(command_line: &str) -> Option<&str> {
    let first = command_line.split_whitespace().next()?;
    let name = basename(first.trim_matches(|c| c == '"' || c == '\''));
    (!name.is_empty()).then_some(name)
}

/// Application name guessed from a title: the part before the first
/// " - " when that is longer than one character, otherwise the whole title.
pub fn title_app_name(title: &str) -> Option<&str> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    match title.split_once(" - ") {
        Some((head, _)) if head.trim().chars().count() > 1 => Some(head.trim()),
        _ => Some(title),
    }
}

/// Group key for a live window: class, then initial class, then a
/// title-derived name, then [`UNKNOWN_APP`].
pub fn window_key(window: &LiveWindow) -> String {
    let class = window.class.trim();
    if !class.is_empty() {
        return class.to_string();
    }
    let initial = window.initial_class.trim();
    if !initial.is_empty() {
        return initial.to_string();
    }
    title_app_name(&window.title)
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_APP.to_string())
}

/// Both sides long enough and one contains the other
pub fn substring_match(a: &str, b: &str) -> bool {
    a.chars().count() >= MIN_SUBSTRING_LEN
        && b.chars().count() >= MIN_SUBSTRING_LEN
        && (a.contains(b) || b.contains(a))
}
