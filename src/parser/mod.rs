// Module declarations
mod clause;
mod command;
mod common;

// Re-export the public parsing surface
pub use clause::{parse_set, parse_where, Clause};
pub use command::{parse_command, Command};
pub use common::scalar;
