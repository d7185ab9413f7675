//! Dock core - pinned list, window reconciliation and visibility
//!
//! The dock merges the persisted pinned list with the compositor's live
//! windows into an ordered slot list (pinned, separator, running-only) and
//! decides when the dock should be revealed.
//!
//! ## Module Structure
//! - `types.rs`: PinnedEntry, Identifier, DockSlot, DockView
//! - `pure/`: normalization, identity resolution, reconciliation, reordering
//! - `operations/`: pinned-list file I/O
//! - `pipelines/`: `impl Dock` blocks for reconcile, activate and drag
//! - `store.rs`, `visibility.rs`, `timers.rs`, `bus.rs`: stateful pieces

mod bus;
#[cfg(test)]
pub(crate) mod fakes;
mod operations;
mod pipelines;
pub mod pure;
mod state;
mod store;
mod timers;
mod types;
mod visibility;

pub use bus::{PinnedConfigBus, Subscription};
pub use state::Dock;
pub use pipelines::DropOutcome;
pub use pure::resolve::IdentityResolver;
pub use store::PinnedStore;
pub use timers::{TimerHandle, TimerQueue};
pub use types::{
    AppSlot, DockSlot, DockTimer, DockView, Identifier, PinnedEntry, RawPinned, SlotView,
    StoreError,
};
pub use visibility::{CrossingDetail, Visibility, VisibilityController, VisibilityState};
