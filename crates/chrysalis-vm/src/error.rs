//! Errors that end a run.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The cancellation token was set, either between instructions or
    /// while a built-in was mining.
    #[error("execution cancelled")]
    Cancelled,

    #[error("failed to write program output: {0}")]
    Output(#[from] io::Error),
}
