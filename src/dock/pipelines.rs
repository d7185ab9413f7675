//! Dock pipelines - high-level orchestration
//!
//! Each file adds an `impl Dock` block composing pure functions, the store
//! and the compositor/catalog collaborators.

mod drag;
mod invoke;
mod reconcile;

pub use drag::DropOutcome;
