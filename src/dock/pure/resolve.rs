// Identity resolution: map free-form identifiers to catalog applications

use crate::catalog::CatalogApp;
use crate::dock::pure::normalize::{
    basename, command_basename, normalize, normalize_class, substring_match,
};
use crate::dock::types::{Identifier, PinnedEntry};
use std::collections::HashMap;

fn push_unique(out: &mut Vec<String>, value: &str) {
    let value = normalize(value);
    if !value.is_empty() && !out.contains(&value) {
        out.push(value);
    }
}

/// Normalized strings an application can be found by: name, display name,
/// window class, executable basename, command basename.
pub fn app_candidates(app: &CatalogApp) -> Vec<String> {
    let mut out = Vec::new();
    push_unique(&mut out, &app.name);
    push_unique(&mut out, &app.display_name);
    if let Some(class) = &app.window_class {
        push_unique(&mut out, class);
    }
    if let Some(exe) = &app.executable {
        push_unique(&mut out, basename(exe));
    }
    if let Some(cmd) = app.command_line.as_deref().and_then(command_basename) {
        push_unique(&mut out, cmd);
    }
    out
}

/// Normalized identifiers of a pinned entry in resolution priority order:
/// window class, executable, command line, name, display name.
pub fn entry_identifiers(entry: &PinnedEntry) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(class) = entry.window_class() {
        push_unique(&mut out, class);
    }
    if let Some(exe) = entry.executable() {
        push_unique(&mut out, basename(exe));
    }
    if let Some(cmd) = entry.command_line().and_then(command_basename) {
        push_unique(&mut out, cmd);
    }
    if let Some(name) = entry.name() {
        push_unique(&mut out, name);
    }
    if let Some(display) = entry.display_name() {
        push_unique(&mut out, display);
    }
    out
}

/// Lookup tables built once per catalog load.
///
/// When two applications share a normalized candidate the one the catalog
/// enumerated first keeps it.
pub struct IdentityResolver {
    apps: Vec<CatalogApp>,
    candidates: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl IdentityResolver {
    pub fn new(apps: Vec<CatalogApp>) -> Self {
        let candidates: Vec<Vec<String>> = apps.iter().map(app_candidates).collect();
        let mut index = HashMap::new();
        for (i, cands) in candidates.iter().enumerate() {
            for cand in cands {
                index.entry(cand.clone()).or_insert(i);
            }
        }
        Self {
            apps,
            candidates,
            index,
        }
    }

    pub fn apps(&self) -> &[CatalogApp] {
        &self.apps
    }

    /// Exact match on the stable `name`, as used for legacy pinned strings
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogApp> {
        self.apps.iter().find(|app| app.name == name)
    }

    pub fn resolve(&self, identifier: &Identifier) -> Option<&CatalogApp> {
        match identifier {
            Identifier::Raw(raw) => self.resolve_str(raw),
            Identifier::Entry(entry) => self.resolve_entry(entry),
        }
    }

    /// Fields are tried in [`entry_identifiers`] order, each through the
    /// full lookup chain before the next field is considered.
    pub fn resolve_entry(&self, entry: &PinnedEntry) -> Option<&CatalogApp> {
        entry_identifiers(entry)
            .iter()
            .find_map(|id| self.lookup(id))
            .map(|i| &self.apps[i])
    }

    pub fn resolve_str(&self, identifier: &str) -> Option<&CatalogApp> {
        self.lookup(identifier).map(|i| &self.apps[i])
    }

    /// Exact, then class-normalized, then substring (first catalog hit wins)
    fn lookup(&self, identifier: &str) -> Option<usize> {
        let norm = normalize(identifier);
        if norm.is_empty() {
            return None;
        }
        if let Some(&i) = self.index.get(&norm) {
            return Some(i);
        }
        if let Some(&i) = self.index.get(&normalize_class(&norm)) {
            return Some(i);
        }
        self.candidates
            .iter()
            .position(|cands| cands.iter().any(|c| substring_match(c, &norm)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app(name: &str, display: &str, class: Option<&str>, exec: Option<&str>) -> CatalogApp {
        CatalogApp {
            name: name.to_string(),
            display_name: display.to_string(),
            window_class: class.map(str::to_string),
            executable: exec.map(str::to_string),
            command_line: exec.map(|e| format!("{} --flag", e)),
            icon: None,
        }
    }

    fn catalog() -> IdentityResolver {
        IdentityResolver::new(vec![
            make_app("firefox", "Firefox", Some("firefox"), Some("/usr/lib/firefox/firefox")),
            make_app("org.gnome.Nautilus", "Files", None, Some("nautilus")),
            make_app("code", "Visual Studio Code", Some("Code"), Some("/usr/bin/code")),
            make_app("org.wezfurlong.wezterm", "WezTerm", None, Some("wezterm")),
        ])
    }

    // ── candidates ──────────────────────────────────────────────────

    #[test]
    fn app_candidates_cover_all_fields() {
        let app = make_app("firefox", "Firefox Web", Some("Firefox"), Some("/usr/bin/firefox-bin"));
        assert_eq!(
            app_candidates(&app),
            vec!["firefox", "firefox web", "firefox-bin"]
        );
    }

    #[test]
    fn entry_identifiers_in_priority_order() {
        let entry = PinnedEntry {
            name: Some("Name".to_string()),
            display_name: Some("Display".to_string()),
            window_class: Some("Class".to_string()),
            executable: Some("/bin/exe".to_string()),
            command_line: Some("/bin/cmd --x".to_string()),
        };
        assert_eq!(
            entry_identifiers(&entry),
            vec!["class", "exe", "cmd", "name", "display"]
        );
    }

    // ── resolve ─────────────────────────────────────────────────────

    #[test]
    fn resolution_is_case_insensitive() {
        let r = catalog();
        let upper = r.resolve_str("Firefox").map(|a| a.name.clone());
        let lower = r.resolve_str("firefox").map(|a| a.name.clone());
        assert_eq!(upper, Some("firefox".to_string()));
        assert_eq!(upper, lower);
    }

    #[test]
    fn display_name_and_executable_resolve() {
        let r = catalog();
        assert_eq!(r.resolve_str("files").unwrap().name, "org.gnome.Nautilus");
        assert_eq!(r.resolve_str("nautilus").unwrap().name, "org.gnome.Nautilus");
    }

    #[test]
    fn class_suffix_normalization() {
        let r = catalog();
        assert_eq!(r.resolve_str("Code-bin").unwrap().name, "code");
        assert_eq!(r.resolve_str("wezterm.exe").unwrap().name, "org.wezfurlong.wezterm");
    }

    #[test]
    fn substring_fallback() {
        let r = catalog();
        // "org.wezfurlong.wezterm-gui" contains "wezterm"
        assert_eq!(
            r.resolve_str("org.wezfurlong.wezterm-gui").unwrap().name,
            "org.wezfurlong.wezterm"
        );
    }

    #[test]
    fn short_identifiers_do_not_substring_match() {
        let r = catalog();
        assert!(r.resolve_str("fi").is_none());
        assert!(r.resolve_str("").is_none());
        assert!(r.resolve_str("kitty").is_none());
    }

    #[test]
    fn collision_first_registered_wins() {
        let r = IdentityResolver::new(vec![
            make_app("foo-a", "Foo A", None, Some("/usr/bin/foo")),
            make_app("foo-b", "Foo B", Some("foo"), Some("/opt/foo")),
        ]);
        assert_eq!(r.resolve_str("foo").unwrap().name, "foo-a");
    }

    #[test]
    fn entry_resolves_by_highest_priority_field() {
        let r = catalog();
        let entry = PinnedEntry {
            name: Some("firefox".to_string()),
            window_class: Some("code".to_string()),
            ..PinnedEntry::default()
        };
        let app = r.resolve(&Identifier::Entry(entry)).unwrap();
        assert_eq!(app.name, "code");
    }

    #[test]
    fn entry_falls_through_unmatched_fields() {
        let r = catalog();
        let entry = PinnedEntry {
            name: Some("org.gnome.Nautilus".to_string()),
            window_class: Some("zz".to_string()),
            ..PinnedEntry::default()
        };
        let app = r.resolve(&Identifier::Entry(entry)).unwrap();
        assert_eq!(app.name, "org.gnome.Nautilus");
    }

    #[test]
    fn find_by_name_is_exact() {
        let r = catalog();
        assert!(r.find_by_name("firefox").is_some());
        assert!(r.find_by_name("Firefox").is_none());
    }
}
