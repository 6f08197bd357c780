//! Request/response dispatcher for DAP.
//!
//! Tracks outstanding requests by sequence number so each response can be
//! handed to the handler registered for it.
use std::collections::HashMap;

use crate::error::DapError;
use crate::protocol::Response;

/// Callback completing one outstanding request.
pub type ResponseHandler = Box<dyn FnOnce(Result<Response, DapError>) + Send>;

/// Manages outstanding requests and routes responses.
#[derive(Default)]
pub struct Dispatcher {
    pending: HashMap<i64, ResponseHandler>,
    closed: bool,
}

impl Dispatcher {
    /// Create an open dispatcher with nothing outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request `seq`.
    ///
    /// Once the dispatcher is closed the handler is failed immediately with
    /// [`DapError::Terminated`] and `false` is returned; the request must
    /// not be sent.
    pub fn register(&mut self, seq: i64, handler: ResponseHandler) -> bool {
        if self.closed {
            handler(Err(DapError::Terminated));
            return false;
        }
        self.pending.insert(seq, handler);
        true
    }

    /// Remove the handler for `seq`, leaving it to the caller to complete.
    ///
    /// Callers run the handler after releasing whatever lock guards the
    /// dispatcher.
    pub fn take(&mut self, seq: i64) -> Option<ResponseHandler> {
        self.pending.remove(&seq)
    }

    /// Refuse new requests while letting outstanding ones complete.
    pub fn refuse_new(&mut self) {
        self.closed = true;
    }

    /// Refuse new requests and fail every outstanding one with `err`.
    pub fn close(&mut self, err: impl Fn() -> DapError) {
        self.closed = true;
        for (_, handler) in self.pending.drain() {
            handler(Err(err()));
        }
    }

    /// Whether new requests are refused.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// How many requests are outstanding.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
