// Drag and drop of dock slots

use crate::catalog::AppCatalog;
use crate::compositor::WindowSource;
use crate::dock::state::{obstructed, Dock};
use crate::dock::pure::reorder::{move_slot, pinned_order, MoveOutcome};
use crate::dock::types::{DockSlot, Identifier};

/// What a drop inside the dock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Ignored,
    /// Running-only slots reordered; nothing persisted
    Moved,
    /// Pinned order written, slots left as they are
    Persisted,
    /// Pinned membership changed; written and fully reconciled
    Reconciled,
}

impl<W: WindowSource, C: AppCatalog> Dock<W, C> {
    pub fn begin_drag(&mut self, index: usize) -> bool {
        if !matches!(self.slots.get(index), Some(DockSlot::App(_))) {
            log::debug!("Ignoring drag of slot {}", index);
            return false;
        }
        self.drag = Some(index);
        self.visibility.drag_begin(&mut self.timers)
    }

    /// Save the pinned order shown by the slots. The slots may predate the
    /// store's list (a deferred reconcile), so the order is merged into it.
    fn persist_pinned_order(&mut self) -> bool {
        let order = pinned_order(&mut self.slots, self.store.entries());
        self.store.save(order)
    }

    fn unpin_slot(&mut self, index: usize) {
        let Some(DockSlot::App(slot)) = self.slots.get(index) else {
            return;
        };
        let Identifier::Entry(entry) = &slot.identity else {
            return;
        };
        match self.store.entries().iter().position(|e| e == entry) {
            Some(position) => {
                log::info!("Unpinning {}", slot.label());
                self.store.remove(position);
            }
            None => log::debug!("{} is no longer pinned", slot.label()),
        }
    }

    /// Move slot `source` to `target` (an index into the list without the
    /// moved slot)
    pub fn on_drop(&mut self, source: usize, target: usize) -> DropOutcome {
        match move_slot(&mut self.slots, source, target) {
            MoveOutcome::Unchanged => DropOutcome::Ignored,
            MoveOutcome::Reordered => {
                let target = target.min(self.slots.len().saturating_sub(1));
                if self.drag.is_some() {
                    self.drag = Some(target);
                }
                if self.slots[target].is_pinned() {
                    self.persist_pinned_order();
                    DropOutcome::Persisted
                } else {
                    DropOutcome::Moved
                }
            }
            MoveOutcome::CrossedSeparator => {
                self.persist_pinned_order();
                self.reconcile();
                self.reconcile_deferred = false;
                DropOutcome::Reconciled
            }
        }
    }

    /// Finish a drag. A slot dropped outside the dock is unpinned when
    /// pinned and has its first window closed otherwise.
    pub fn end_drag(&mut self, index: usize, dropped_outside: bool) -> bool {
        self.drag = None;

        if dropped_outside {
            if self.slots.get(index).is_some_and(DockSlot::is_pinned) {
                self.unpin_slot(index);
                self.reconcile_deferred = true;
            } else if let Some(DockSlot::App(slot)) = self.slots.get(index) {
                if let Some(window) = slot.instances.first() {
                    log::info!("Closing {} ({})", window.address, slot.label());
                    self.source.close_window(&window.address);
                }
                self.reconcile_deferred = true;
            } else {
                log::debug!("Ignoring drop of slot {} outside the dock", index);
            }
        }

        let mut changed = false;
        if self.reconcile_deferred {
            self.reconcile_deferred = false;
            changed |= self.reconcile();
        }
        changed |= self
            .visibility
            .drag_end(&mut self.timers, || obstructed(&self.source, &self.config, &self.slots));
        changed
    }

    /// Whether a drop at screen position (`x`, `y`) lies outside the dock.
    /// Unknown geometry counts as inside so nothing gets unpinned by accident.
    pub fn drop_is_outside(&self, x: i32, y: i32) -> bool {
        self.source
            .dock_region(self.config.edge, self.config.thickness)
            .is_some_and(|region| !region.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Rect;
    use crate::dock::fakes::*;
    use crate::dock::store::PinnedStore;
    use crate::dock::pure::resolve::IdentityResolver;

    fn names_on_disk(t: &TestDock) -> Vec<String> {
        let mut store = PinnedStore::new(t.pinned_path());
        store
            .load(&IdentityResolver::new(Vec::new()))
            .iter()
            .filter_map(|e| e.name().map(str::to_string))
            .collect()
    }

    // ── on_drop ─────────────────────────────────────────────────────

    #[test]
    fn reorder_within_pinned_persists_without_reconcile() {
        let mut t = make_dock(
            &[entry("firefox"), entry("code"), entry("nautilus")],
            vec![make_window("0x1", "firefox")],
        );
        let calls = t.dock.source.list_calls.get();

        t.dock.begin_drag(0);
        assert_eq!(t.dock.on_drop(0, 2), DropOutcome::Persisted);

        assert_eq!(t.dock.source.list_calls.get(), calls);
        assert_eq!(names_on_disk(&t), vec!["code", "nautilus", "firefox"]);
        // Instances travel with the slot
        assert_eq!(t.dock.slots()[2].as_app().unwrap().instances.len(), 1);
    }

    #[test]
    fn reorder_across_separator_reconciles() {
        let mut t = make_dock(
            &[entry("firefox")],
            vec![make_window("0x1", "kitty")],
        );
        assert_eq!(t.dock.slots().len(), 3);
        let calls = t.dock.source.list_calls.get();

        t.dock.begin_drag(2);
        assert_eq!(t.dock.on_drop(2, 0), DropOutcome::Reconciled);

        assert!(t.dock.source.list_calls.get() > calls);
        assert_eq!(names_on_disk(&t), vec!["kitty", "firefox"]);
        let slots = t.dock.slots();
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.is_pinned()));
        assert_eq!(slots[0].as_app().unwrap().instances.len(), 1);
    }

    #[test]
    fn unpinned_reorder_not_persisted() {
        let mut t = make_dock(
            &[],
            vec![make_window("0x1", "kitty"), make_window("0x2", "foot")],
        );
        let before = std::fs::read_to_string(t.pinned_path()).unwrap();
        assert_eq!(t.dock.on_drop(0, 1), DropOutcome::Moved);
        assert_eq!(std::fs::read_to_string(t.pinned_path()).unwrap(), before);
    }

    #[test]
    fn separator_drop_ignored() {
        let mut t = make_dock(&[entry("firefox")], vec![make_window("0x1", "kitty")]);
        assert_eq!(t.dock.on_drop(1, 0), DropOutcome::Ignored);
    }

    // ── end_drag ────────────────────────────────────────────────────

    #[test]
    fn pinned_dropped_outside_is_unpinned() {
        let mut t = make_dock(&[entry("firefox"), entry("code")], vec![]);
        t.dock.begin_drag(0);
        t.dock.end_drag(0, true);

        assert_eq!(names_on_disk(&t), vec!["code"]);
        assert_eq!(t.dock.slots().len(), 1);
        assert!(!t.dock.is_dragging());
    }

    #[test]
    fn drop_keeps_entry_pinned_elsewhere_during_drag() {
        let mut t = make_dock(&[entry("firefox"), entry("code")], vec![]);
        t.dock.begin_drag(0);

        let mut other = PinnedStore::new(t.pinned_path());
        other.load(&IdentityResolver::new(Vec::new()));
        other.add(entry("nautilus"));
        t.bus.notify_pinned_config_changed();
        t.dock.handle_pending_notifications();
        // Reconcile waits for the drag to end
        assert_eq!(t.dock.slots().len(), 2);

        assert_eq!(t.dock.on_drop(0, 1), DropOutcome::Persisted);
        t.dock.end_drag(1, false);

        assert_eq!(names_on_disk(&t), vec!["code", "firefox", "nautilus"]);
        assert_eq!(t.dock.slots().len(), 3);
    }

    #[test]
    fn unpin_keeps_entry_pinned_elsewhere_during_drag() {
        let mut t = make_dock(&[entry("firefox"), entry("code")], vec![]);
        t.dock.begin_drag(0);

        let mut other = PinnedStore::new(t.pinned_path());
        other.load(&IdentityResolver::new(Vec::new()));
        other.add(entry("nautilus"));
        t.bus.notify_pinned_config_changed();
        t.dock.handle_pending_notifications();

        t.dock.end_drag(0, true);
        assert_eq!(names_on_disk(&t), vec!["code", "nautilus"]);
    }

    #[test]
    fn second_drop_in_one_drag_keeps_every_pin() {
        let mut t = make_dock(&[entry("firefox"), entry("code"), entry("nautilus")], vec![]);
        t.dock.begin_drag(0);
        t.dock.on_drop(0, 2);
        t.dock.on_drop(2, 0);
        t.dock.end_drag(0, false);
        assert_eq!(names_on_disk(&t), vec!["firefox", "code", "nautilus"]);
    }

    #[test]
    fn running_dropped_outside_closes_first_window() {
        let mut t = make_dock(
            &[],
            vec![make_window("0x1", "kitty"), make_window("0x2", "kitty")],
        );
        t.dock.begin_drag(0);
        t.dock.end_drag(0, true);
        assert_eq!(*t.dock.source.close_calls.borrow(), vec!["0x1"]);
    }

    #[test]
    fn drop_inside_only_ends_drag() {
        let mut t = make_dock(&[entry("firefox")], vec![]);
        t.dock.begin_drag(0);
        assert!(t.dock.visibility_state().dragging);
        t.dock.end_drag(0, false);
        assert!(!t.dock.visibility_state().dragging);
        assert_eq!(names_on_disk(&t), vec!["firefox"]);
        assert!(t.dock.source.close_calls.borrow().is_empty());
    }

    #[test]
    fn drag_end_rechecks_occlusion() {
        let mut t = make_dock(&[entry("firefox")], vec![]);
        t.dock.begin_drag(0);
        t.dock.source.occluded.set(true);
        assert!(t.dock.end_drag(0, false));
        assert!(!t.dock.visibility_state().revealed);
    }

    #[test]
    fn drop_position_against_region() {
        let t = make_dock(&[], vec![]);
        assert!(!t.dock.drop_is_outside(5000, 5000));

        t.dock.source.region.set(Some(Rect::new(0, 1024, 1920, 56)));
        assert!(!t.dock.drop_is_outside(100, 1050));
        assert!(t.dock.drop_is_outside(100, 500));
    }
}
