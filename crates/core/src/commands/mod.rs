mod context;
mod error;
mod toggle;

pub use context::ExecutionContext;
pub use error::{CommandError, CommandResult, RuntimeError};
pub use toggle::{determine_target, TOGGLE_COMMAND, TOGGLE_OTHER_PERMISSION};

/// Whoever issued a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    Player(String),
    Console,
}
