// Pure compositor helpers (no I/O)

pub mod occlusion;
pub mod parse;
