// Pure reconciliation of pinned entries against live windows (no I/O)

use crate::catalog::CatalogApp;
use crate::compositor::LiveWindow;
use crate::dock::pure::normalize::{
    normalize, normalize_class, substring_match, title_app_name, window_key,
};
use crate::dock::pure::resolve::{app_candidates, entry_identifiers, IdentityResolver};
use crate::dock::types::{AppSlot, DockSlot, Identifier, PinnedEntry};
use std::collections::HashMap;

/// Windows sharing one window key, in query order
#[derive(Debug, Clone, PartialEq)]
pub struct RunningGroup {
    pub key: String,
    pub instances: Vec<LiveWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchTier {
    Exact,
    Class,
    Substring,
}

const TIERS: [MatchTier; 3] = [MatchTier::Exact, MatchTier::Class, MatchTier::Substring];

/// Live windows grouped by key, with the normalized and class-normalized
/// form of every key registered as an alias of its group.
#[derive(Debug, Default)]
pub struct RunningGroups {
    groups: Vec<RunningGroup>,
    exact: HashMap<String, usize>,
    by_class: HashMap<String, usize>,
}

impl RunningGroups {
    pub fn from_windows(windows: &[LiveWindow]) -> Self {
        let mut running = Self::default();
        for window in windows {
            let key = window_key(window);
            let norm = normalize(&key);
            match running.exact.get(&norm) {
                Some(&i) => running.groups[i].instances.push(window.clone()),
                None => {
                    let i = running.groups.len();
                    running.exact.insert(norm.clone(), i);
                    running.by_class.entry(normalize_class(&norm)).or_insert(i);
                    running.groups.push(RunningGroup {
                        key,
                        instances: vec![window.clone()],
                    });
                }
            }
        }
        running
    }

    pub fn groups(&self) -> &[RunningGroup] {
        &self.groups
    }

    /// First unconsumed group matching any candidate at the given tier
    fn find(&self, tier: MatchTier, candidates: &[String], consumed: &[bool]) -> Option<usize> {
        let free = |i: &usize| !consumed[*i];
        candidates.iter().find_map(|cand| match tier {
            MatchTier::Exact => self.exact.get(cand).copied().filter(free),
            MatchTier::Class => self
                .by_class
                .get(&normalize_class(cand))
                .copied()
                .filter(free),
            MatchTier::Substring => (0..self.groups.len())
                .filter(free)
                .find(|&i| substring_match(&normalize(&self.groups[i].key), cand)),
        })
    }
}

/// Everything a pinned entry may be recognised by: its own fields first,
/// then those of the application it resolves to.
pub fn pinned_candidates(entry: &PinnedEntry, app: Option<&CatalogApp>) -> Vec<String> {
    let mut out = entry_identifiers(entry);
    if let Some(app) = app {
        for cand in app_candidates(app) {
            if !out.contains(&cand) {
                out.push(cand);
            }
        }
    }
    out
}

fn running_slot(group: &RunningGroup, resolver: &IdentityResolver) -> DockSlot {
    let first = group.instances.first();
    let resolved = resolver
        .resolve_str(&group.key)
        .or_else(|| {
            first
                .map(|w| w.initial_class.as_str())
                .filter(|c| !c.trim().is_empty())
                .and_then(|c| resolver.resolve_str(c))
        })
        .or_else(|| {
            first
                .and_then(|w| title_app_name(&w.title))
                .and_then(|name| resolver.resolve_str(name))
        });

    DockSlot::App(AppSlot {
        identity: Identifier::Raw(group.key.clone()),
        resolved_app: resolved.cloned(),
        instances: group.instances.clone(),
        is_pinned: false,
    })
}

/// Build the ordered slot list: pinned slots in persisted order, a separator
/// when both groups are non-empty, then one slot per unmatched window group.
///
/// A window whose key equals an entry's own `window_class` always goes to
/// that entry. The rest is matched tier by tier across all pinned entries,
/// so an exact match for a later entry is never stolen by a substring match
/// of an earlier one. A group is consumed by at most one pinned entry.
pub fn reconcile(
    pinned: &[PinnedEntry],
    windows: &[LiveWindow],
    resolver: &IdentityResolver,
) -> Vec<DockSlot> {
    let running = RunningGroups::from_windows(windows);
    let resolved: Vec<Option<&CatalogApp>> =
        pinned.iter().map(|e| resolver.resolve_entry(e)).collect();
    let candidates: Vec<Vec<String>> = pinned
        .iter()
        .zip(&resolved)
        .map(|(entry, app)| pinned_candidates(entry, *app))
        .collect();

    let mut consumed = vec![false; running.groups.len()];
    let mut matched: Vec<Option<usize>> = vec![None; pinned.len()];
    for (i, entry) in pinned.iter().enumerate() {
        let Some(class) = entry.window_class().map(normalize).filter(|c| !c.is_empty()) else {
            continue;
        };
        if let Some(group) = running.find(MatchTier::Exact, &[class], &consumed) {
            consumed[group] = true;
            matched[i] = Some(group);
        }
    }
    for tier in TIERS {
        for (i, cands) in candidates.iter().enumerate() {
            if matched[i].is_some() {
                continue;
            }
            if let Some(group) = running.find(tier, cands, &consumed) {
                consumed[group] = true;
                matched[i] = Some(group);
            }
        }
    }

    let mut slots: Vec<DockSlot> = pinned
        .iter()
        .zip(resolved)
        .zip(matched)
        .map(|((entry, app), group)| {
            DockSlot::App(AppSlot {
                identity: Identifier::Entry(entry.clone()),
                resolved_app: app.cloned(),
                instances: group
                    .map(|g| running.groups[g].instances.clone())
                    .unwrap_or_default(),
                is_pinned: true,
            })
        })
        .collect();

    let unpinned: Vec<DockSlot> = running
        .groups
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(group, _)| running_slot(group, resolver))
        .collect();

    if !slots.is_empty() && !unpinned.is_empty() {
        slots.push(DockSlot::Separator);
    }
    slots.extend(unpinned);
    slots
}
