use crate::preferences::PersistenceError;
use thiserror::Error;

/// Problems with how a command was used. The message is shown to whoever ran it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Console does not generate chat events.")]
    NoImplicitTarget,
    #[error("You don't have permission to change other players.")]
    Unauthorized { permission: String },
    #[error("Player not found")]
    TargetNotFound { name: String },
    #[error("Too many arguments.")]
    TooManyArguments,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("Could not save preferences: {0}")]
    Persistence(#[from] PersistenceError),
}

pub type CommandResult<T> = Result<T, CommandError>;
