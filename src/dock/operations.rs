//! Dock operations - atomic side effects (filesystem)

pub mod persistence;
