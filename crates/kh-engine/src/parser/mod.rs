//! Command parsing for player input.

mod command;

pub use command::{Command, Verb, parse_command};
