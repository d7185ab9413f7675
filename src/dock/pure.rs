// Pure dock logic (no I/O)

pub mod document;
pub mod focus;
pub mod normalize;
pub mod reconcile;
pub mod reorder;
pub mod resolve;
