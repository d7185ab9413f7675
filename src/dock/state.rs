// Dock state and event-loop entry points

use crate::catalog::AppCatalog;
use crate::compositor::{Address, WindowSource, WorkspaceId};
use crate::config::{load_cfg_from, DockConfig};
use crate::dock::bus::{PinnedConfigBus, Subscription};
use crate::dock::pure::resolve::IdentityResolver;
use crate::dock::store::PinnedStore;
use crate::dock::timers::TimerQueue;
use crate::dock::types::{DockSlot, DockTimer, DockView, PinnedEntry, SlotView};
use crate::dock::visibility::{CrossingDetail, Visibility, VisibilityController, VisibilityState};

use std::path::PathBuf;
use std::time::Instant;

/// Hide when a window covers the dock strip or there is nothing to show
pub(super) fn obstructed<W: WindowSource>(source: &W, config: &DockConfig, slots: &[DockSlot]) -> bool {
    slots.is_empty() || source.is_region_occluded(config.edge, config.thickness)
}

/// One dock instance. Everything here runs on the logic thread.
pub struct Dock<W: WindowSource, C: AppCatalog> {
    pub(super) source: W,
    pub(super) catalog: C,
    pub(super) resolver: IdentityResolver,
    pub(super) store: PinnedStore,
    pub(super) config: DockConfig,
    pub(super) settings_path: Option<PathBuf>,

    /// Slot arena; the renderer refers to slots by index only
    pub(super) slots: Vec<DockSlot>,
    pub(super) focused: Option<Address>,
    pub(super) workspace: WorkspaceId,

    pub(super) visibility: VisibilityController,
    pub(super) timers: TimerQueue<DockTimer>,
    pub(super) subscription: Subscription,

    /// Index of the slot being dragged
    pub(super) drag: Option<usize>,
    /// A reconciliation was requested during a drag
    pub(super) reconcile_deferred: bool,
}

impl<W: WindowSource, C: AppCatalog> Dock<W, C> {
    pub fn new(
        source: W,
        catalog: C,
        config: DockConfig,
        pinned_path: PathBuf,
        bus: &PinnedConfigBus,
    ) -> Self {
        let resolver = IdentityResolver::new(catalog.list_apps());
        let mut store = PinnedStore::new(pinned_path);
        store.load(&resolver);
        source.set_occlusion_includes_floating(config.occlusion_includes_floating);

        let now = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule_in(now, config.occlusion_poll(), DockTimer::OcclusionPoll);
        timers.schedule_in(now, config.config_poll(), DockTimer::ConfigPoll);

        let mut dock = Self {
            visibility: VisibilityController::new(config.always_occluded, config.hide_delay()),
            source,
            catalog,
            resolver,
            store,
            config,
            settings_path: None,
            slots: Vec::new(),
            focused: None,
            workspace: 0,
            timers,
            subscription: bus.subscribe(),
            drag: None,
            reconcile_deferred: false,
        };
        dock.reconcile();
        dock.visibility
            .poll(&mut dock.timers, || obstructed(&dock.source, &dock.config, &dock.slots));
        dock
    }

    /// Re-read `path` on every config poll and apply changes live
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    pub fn slots(&self) -> &[DockSlot] {
        &self.slots
    }

    pub fn pinned(&self) -> &[PinnedEntry] {
        self.store.entries()
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.visibility()
    }

    pub fn visibility_state(&self) -> &VisibilityState {
        self.visibility.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Run every timer due at `now`. Returns true if the view changed.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for (handle, timer) in self.timers.pop_due(now) {
            match timer {
                DockTimer::HideDelay => {
                    changed |= self.visibility.hide_timer_fired(handle, &mut self.timers, || {
                        obstructed(&self.source, &self.config, &self.slots)
                    });
                }
                DockTimer::OcclusionPoll => {
                    changed |= self
                        .visibility
                        .poll(&mut self.timers, || obstructed(&self.source, &self.config, &self.slots));
                    self.timers
                        .schedule_in(now, self.config.occlusion_poll(), DockTimer::OcclusionPoll);
                }
                DockTimer::ConfigPoll => {
                    changed |= self.reload_config();
                    // Reconciles even without a pinned change so window changes
                    // are seen when no event stream is available
                    self.store.poll_for_external_change(&self.resolver);
                    changed |= self.request_reconcile();
                    self.timers
                        .schedule_in(now, self.config.config_poll(), DockTimer::ConfigPoll);
                }
            }
        }
        changed
    }

    /// Immediate re-poll after a `notify_pinned_config_changed` broadcast
    pub fn handle_pending_notifications(&mut self) -> bool {
        if self.subscription.take_pending() {
            log::debug!("Pinned list change notified");
            return self.poll_pinned();
        }
        false
    }

    fn poll_pinned(&mut self) -> bool {
        if self.store.poll_for_external_change(&self.resolver) {
            return self.request_reconcile();
        }
        false
    }

    fn reload_config(&mut self) -> bool {
        let Some(path) = &self.settings_path else {
            return false;
        };
        let config = load_cfg_from(path);
        if config == self.config {
            return false;
        }
        self.apply_config(config)
    }

    /// Apply a new configuration. Poll intervals take effect when their
    /// timers are next re-armed; the pinned-list path needs a restart.
    pub fn apply_config(&mut self, config: DockConfig) -> bool {
        if config.pinned_path != self.config.pinned_path {
            log::warn!("pinned_path changes take effect after a restart");
        }
        if config.occlusion_includes_floating != self.config.occlusion_includes_floating {
            self.source
                .set_occlusion_includes_floating(config.occlusion_includes_floating);
        }
        self.visibility.set_hide_delay(config.hide_delay());

        let always_occluded = config.always_occluded;
        let geometry_changed = config.edge != self.config.edge
            || config.thickness != self.config.thickness
            || config.occlusion_includes_floating != self.config.occlusion_includes_floating;
        self.config = config;

        let obstructed_now = || obstructed(&self.source, &self.config, &self.slots);
        if self.visibility.state().always_occluded != always_occluded {
            self.visibility
                .set_always_occluded(always_occluded, &mut self.timers, obstructed_now)
        } else if geometry_changed {
            self.visibility.poll(&mut self.timers, obstructed_now)
        } else {
            false
        }
    }

    pub fn hover_enter(&mut self) -> bool {
        self.visibility.hover_enter(&mut self.timers)
    }

    pub fn hover_leave(&mut self, detail: CrossingDetail, now: Instant) {
        self.visibility.hover_leave(detail, &mut self.timers, now);
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> DockView {
        let slots = self
            .slots
            .iter()
            .map(|slot| match slot {
                DockSlot::Separator => SlotView::separator(),
                DockSlot::App(app) => SlotView {
                    label: app.label().to_string(),
                    app: app.resolved_app.as_ref().map(|a| a.name.clone()),
                    icon: app
                        .resolved_app
                        .as_ref()
                        .and_then(|a| self.catalog.icon(a, self.config.thickness)),
                    pinned: app.is_pinned,
                    separator: false,
                    instances: app.instances.len(),
                    focused: self
                        .focused
                        .as_deref()
                        .is_some_and(|f| app.instances.iter().any(|w| w.address == f)),
                },
            })
            .collect();

        DockView {
            revealed: self.visibility.is_revealed(),
            workspace: self.workspace,
            slots,
        }
    }
}
