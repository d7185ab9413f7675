//! Control protocol between the dock daemon, its renderer and other processes
//!
//! One command per line on the daemon's stdin or its control socket.

mod protocol;
mod socket;

pub use protocol::{parse_line, DropPlace, ParseError, UiCommand};
pub use socket::{send_line, spawn_control_listener, spawn_stdin_reader};
