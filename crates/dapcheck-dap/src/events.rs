//! Inbound event routing.
//!
//! [`DebugEvent`] is the typed form of every server-to-client event the
//! harness knows about. [`EventSink`] receives all of them through a single
//! entry point and hands `stopped` events to at most one registered
//! interest.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::DapError;
use crate::protocol::{
    BreakpointEventBody, ContinuedEventBody, Event, ExitedEventBody, LoadedSourceEventBody,
    ModuleEventBody, OutputEventBody, ProcessEventBody, StoppedEventBody, TerminatedEventBody,
    ThreadEventBody,
};

/// A typed server-to-client event.
#[derive(Debug, Clone, PartialEq)]
pub enum DebugEvent {
    /// The adapter is ready to accept configuration requests.
    Initialized,
    /// Execution suspended.
    Stopped(StoppedEventBody),
    /// Execution resumed.
    Continued(ContinuedEventBody),
    /// The debuggee exited.
    Exited(ExitedEventBody),
    /// The debug session ended.
    Terminated(TerminatedEventBody),
    /// A thread started or exited.
    Thread(ThreadEventBody),
    /// The debuggee produced output.
    Output(OutputEventBody),
    /// A breakpoint changed.
    Breakpoint(BreakpointEventBody),
    /// A module was loaded, changed, or removed.
    Module(ModuleEventBody),
    /// A source was loaded, changed, or removed.
    LoadedSource(LoadedSourceEventBody),
    /// The adapter started or attached to a process.
    Process(ProcessEventBody),
    /// An event kind this crate does not model.
    Other {
        /// The raw event name.
        event: String,
        /// The raw event body.
        body: Option<serde_json::Value>,
    },
}

impl DebugEvent {
    /// Decode a wire-level [`Event`] into its typed form.
    pub fn from_event(event: Event) -> Result<Self, DapError> {
        fn body<T: serde::de::DeserializeOwned>(event: &Event) -> Result<T, DapError> {
            let value = event.body.clone().unwrap_or(serde_json::Value::Null);
            serde_json::from_value(value).map_err(|e| {
                DapError::InvalidResponse(format!("bad `{}` event body: {e}", event.event))
            })
        }

        Ok(match event.event.as_str() {
            "initialized" => DebugEvent::Initialized,
            "stopped" => DebugEvent::Stopped(body(&event)?),
            "continued" => DebugEvent::Continued(body(&event)?),
            "exited" => DebugEvent::Exited(body(&event)?),
            "terminated" => DebugEvent::Terminated(
                event
                    .body
                    .as_ref()
                    .map(|_| body(&event))
                    .transpose()?
                    .unwrap_or_default(),
            ),
            "thread" => DebugEvent::Thread(body(&event)?),
            "output" => DebugEvent::Output(body(&event)?),
            "breakpoint" => DebugEvent::Breakpoint(body(&event)?),
            "module" => DebugEvent::Module(body(&event)?),
            "loadedSource" => DebugEvent::LoadedSource(body(&event)?),
            "process" => DebugEvent::Process(body(&event)?),
            _ => DebugEvent::Other {
                event: event.event.clone(),
                body: event.body.clone(),
            },
        })
    }

    /// The protocol name of this event kind.
    pub fn name(&self) -> &str {
        match self {
            DebugEvent::Initialized => "initialized",
            DebugEvent::Stopped(_) => "stopped",
            DebugEvent::Continued(_) => "continued",
            DebugEvent::Exited(_) => "exited",
            DebugEvent::Terminated(_) => "terminated",
            DebugEvent::Thread(_) => "thread",
            DebugEvent::Output(_) => "output",
            DebugEvent::Breakpoint(_) => "breakpoint",
            DebugEvent::Module(_) => "module",
            DebugEvent::LoadedSource(_) => "loadedSource",
            DebugEvent::Process(_) => "process",
            DebugEvent::Other { event, .. } => event,
        }
    }
}

/// One-shot handler for the next `stopped` event.
pub type StoppedHandler = Box<dyn FnOnce(StoppedEventBody) + Send>;

/// Receives every inbound event and routes `stopped` events to at most one
/// registered interest.
///
/// The interest slot holds a single handler. Registering while another is
/// outstanding replaces it, and the replaced handler never fires. Callers
/// are expected to register, trigger the causing action, and await the
/// result before registering again.
#[derive(Default)]
pub struct EventSink {
    stopped: Mutex<Option<StoppedHandler>>,
}

impl EventSink {
    /// Create a sink with no registered interest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for the next `stopped` event.
    ///
    /// Replaces any handler already registered.
    pub fn register_stopped_interest(&self, handler: StoppedHandler) {
        if self.slot().replace(handler).is_some() {
            tracing::warn!("replaced an outstanding stopped-event interest; it will never fire");
        }
    }

    /// Register the handler for the next `stopped` event, refusing to
    /// replace one that is already registered.
    pub fn try_register_stopped_interest(&self, handler: StoppedHandler) -> Result<(), DapError> {
        let mut slot = self.slot();
        if slot.is_some() {
            return Err(DapError::InterestOccupied);
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Drop any registered `stopped` interest without firing it.
    ///
    /// Returns whether one was registered.
    pub fn clear_stopped_interest(&self) -> bool {
        self.slot().take().is_some()
    }

    /// Whether a `stopped` interest is currently registered.
    pub fn has_stopped_interest(&self) -> bool {
        self.slot().is_some()
    }

    /// Deliver a `stopped` event.
    ///
    /// The slot is cleared before the handler runs, so the handler may
    /// register a new interest. Without a registered handler the event is
    /// dropped.
    pub fn on_stopped(&self, event: StoppedEventBody) {
        let handler = self.slot().take();
        match handler {
            Some(handler) => handler(event),
            None => tracing::trace!(
                reason = event.reason.as_str(),
                "stopped event with no interest"
            ),
        }
    }

    /// Deliver any inbound event.
    pub fn on_event(&self, event: DebugEvent) {
        match event {
            DebugEvent::Stopped(body) => self.on_stopped(body),
            other => tracing::trace!(event = other.name(), "event ignored"),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<StoppedHandler>> {
        // Handlers run outside the lock.
        self.stopped.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("stopped_interest", &self.has_stopped_interest())
            .finish()
    }
}
