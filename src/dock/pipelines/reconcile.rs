// Rebuilding the slot list from the store and the live window set

use crate::catalog::AppCatalog;
use crate::compositor::WindowSource;
use crate::dock::state::Dock;
use crate::dock::pure::reconcile::reconcile;

impl<W: WindowSource, C: AppCatalog> Dock<W, C> {
    /// Reconcile now, or once the current drag ends so slot indices stay
    /// stable under the pointer
    pub fn request_reconcile(&mut self) -> bool {
        if self.drag.is_some() {
            self.reconcile_deferred = true;
            return false;
        }
        self.reconcile()
    }

    /// Rebuild the slot list. A failed window query keeps the previous
    /// slots. Returns true if anything the renderer shows changed.
    pub fn reconcile(&mut self) -> bool {
        let windows = match self.source.list_windows() {
            Ok(windows) => windows,
            Err(e) => {
                log::warn!("Window query failed, keeping {} slots: {}", self.slots.len(), e);
                return false;
            }
        };

        let focused = self.source.focused_window_address();
        let workspace = self.source.active_workspace_id();
        let slots = reconcile(self.store.entries(), &windows, &self.resolver);

        let changed = slots != self.slots || focused != self.focused || workspace != self.workspace;
        if changed {
            log::debug!(
                "Reconciled {} windows into {} slots",
                windows.len(),
                slots.len()
            );
        }
        self.slots = slots;
        self.focused = focused;
        self.workspace = workspace;
        changed
    }
}
