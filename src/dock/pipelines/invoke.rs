// Clicking a slot: launch when nothing runs, otherwise cycle focus

use crate::catalog::AppCatalog;
use crate::compositor::WindowSource;
use crate::dock::state::Dock;
use crate::dock::pure::focus::next_focus_address;
use crate::dock::types::{AppSlot, DockSlot};

impl<W: WindowSource, C: AppCatalog> Dock<W, C> {
    /// Activate the slot at `index`. Returns false when nothing could be
    /// launched or focused.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(DockSlot::App(slot)) = self.slots.get(index) else {
            log::debug!("Ignoring activation of slot {}", index);
            return false;
        };

        if slot.instances.is_empty() {
            return self.launch_slot(slot);
        }

        let focused = self.source.focused_window_address();
        match next_focus_address(&slot.instances, focused.as_deref()) {
            Some(address) => {
                log::debug!("Focusing {} ({})", address, slot.label());
                self.source.focus_window(address);
                true
            }
            None => false,
        }
    }

    /// Catalog launch first, then the entry's own command as a detached shell
    fn launch_slot(&self, slot: &AppSlot) -> bool {
        if let Some(app) = &slot.resolved_app {
            if self.catalog.launch(app) {
                log::info!("Launched {}", app.name);
                return true;
            }
            log::warn!("Launching {} failed, trying fallback command", app.name);
        }

        let Some(command) = slot.identity.fallback_command() else {
            log::warn!("No way to launch {}", slot.label());
            return false;
        };
        if self.catalog.run_command(command) {
            log::info!("Started `{}`", command);
            true
        } else {
            log::error!("Failed to start `{}`", command);
            false
        }
    }
}
