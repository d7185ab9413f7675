pub mod operations;
pub mod types;

// Re-export types
pub use types::DockConfig;

// Re-export operations
pub use operations::{load_cfg, load_cfg_from, save_cfg};
