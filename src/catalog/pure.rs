// Pure catalog helpers (no I/O)

pub mod desktop_entry;
