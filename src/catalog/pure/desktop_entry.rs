// Pure desktop-entry parsing (no I/O)

use crate::catalog::types::{CatalogApp, CatalogError};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static FIELD_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(%|[a-zA-Z])").expect("field code pattern is valid"));

/// Remove `%f`, `%U`, ... field codes from an Exec value; `%%` becomes `%`.
pub fn strip_field_codes(exec: &str) -> String {
    let stripped = FIELD_CODE.replace_all(exec, |caps: &regex::Captures| {
        if &caps[1] == "%" {
            "%".to_string()
        } else {
            String::new()
        }
    });
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The program an Exec line runs, skipping an `env VAR=value` prefix.
pub fn exec_program(command: &str) -> Option<String> {
    let mut tokens = command.split_whitespace().peekable();
    if tokens.peek() == Some(&"env") {
        tokens.next();
    }
    tokens
        .find(|t| !is_env_assignment(t))
        .map(|t| t.trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|t| !t.is_empty())
}

fn is_env_assignment(token: &str) -> bool {
    match token.split_once('=') {
        Some((key, _)) => {
            !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Desktop id for a file below an `applications` dir:
/// `kde4/konsole.desktop` becomes `kde4-konsole`.
pub fn desktop_id(relative: &Path) -> Option<String> {
    let without_ext = relative.to_str()?.strip_suffix(".desktop")?;
    if without_ext.is_empty() {
        return None;
    }
    Some(without_ext.replace('/', "-"))
}

/// Parse the `[Desktop Entry]` group of a desktop file.
///
/// Localized keys (`Name[de]`) are ignored. Entries that are not
/// applications, are marked `Hidden`, or lack `Name`/`Exec` are rejected.
/// `NoDisplay` entries are kept: they never show in menus but their windows
/// still need an identity.
pub fn parse_desktop_entry(id: &str, contents: &str) -> Result<CatalogApp, CatalogError> {
    let mut in_entry = false;
    let mut seen_entry = false;
    let mut keys: HashMap<&str, &str> = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            seen_entry |= in_entry;
            continue;
        }
        if !in_entry {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.contains('[') {
                continue;
            }
            // First occurrence wins, matching most desktop-file readers
            keys.entry(key).or_insert(value.trim());
        }
    }

    if !seen_entry {
        return Err(CatalogError::MissingGroup);
    }

    let kind = keys.get("Type").copied().unwrap_or("Application");
    if kind != "Application" {
        return Err(CatalogError::NotApplication(kind.to_string()));
    }
    if keys.get("Hidden").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
        return Err(CatalogError::Hidden);
    }

    let display_name = keys
        .get("Name")
        .filter(|v| !v.is_empty())
        .ok_or(CatalogError::MissingKey("Name"))?;
    let exec = keys
        .get("Exec")
        .filter(|v| !v.is_empty())
        .ok_or(CatalogError::MissingKey("Exec"))?;

    let command_line = strip_field_codes(exec);
    let executable = keys
        .get("TryExec")
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .or_else(|| exec_program(&command_line));

    let non_empty = |key: &str| {
        keys.get(key)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    };

    Ok(CatalogApp {
        name: id.to_string(),
        display_name: display_name.to_string(),
        window_class: non_empty("StartupWMClass"),
        executable,
        command_line: Some(command_line).filter(|c| !c.is_empty()),
        icon: non_empty("Icon"),
    })
}
