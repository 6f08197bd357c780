//! DAP error types.

use thiserror::Error;

/// Errors surfaced by the harness through failed pending results.
#[derive(Debug, Error)]
pub enum DapError {
    /// Connecting to or spawning the debug adapter failed.
    #[error("adapter connection failed: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level communication error.
    #[error("transport error: {0}")]
    Transport(String),

    /// A caller-imposed deadline elapsed before the result arrived.
    #[error("timed out waiting for {command}")]
    Timeout {
        /// The command or event that was awaited.
        command: String,
    },

    /// Server answered the request with `success: false`.
    #[error("server rejected {command}: {message}")]
    Rejected {
        /// The command that was rejected.
        command: String,
        /// The rejection message from the server.
        message: String,
    },

    /// Server sent an invalid or unparseable message.
    #[error("server sent invalid response: {0}")]
    InvalidResponse(String),

    /// The session was disconnected or the connection closed.
    #[error("session already terminated")]
    Terminated,

    /// A stopped-event interest is already registered on the sink.
    #[error("a stopped-event interest is already registered")]
    InterestOccupied,
}
