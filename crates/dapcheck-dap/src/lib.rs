//! dapcheck-dap — Debug Adapter Protocol test driver.
//!
//! This crate drives a live debug adapter from tests. It builds typed
//! requests, correlates actions with the `stopped` events they cause, and
//! provides a framed connection that routes responses and events.

pub mod connection;
pub mod correlate;
pub mod dispatcher;
pub mod driver;
pub mod error;
pub mod events;
pub mod pending;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-export key types for convenience.
pub use connection::DapConnection;
pub use correlate::do_with_caused_event;
pub use error::DapError;
pub use events::{DebugEvent, EventSink, StoppedHandler};
pub use pending::{Completer, PendingResult};
pub use protocol::*;
pub use server::DebugServer;
