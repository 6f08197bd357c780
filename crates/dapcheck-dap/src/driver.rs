//! Request helpers for driving a debug server from tests.
//!
//! Each operation turns plain test parameters into the protocol arguments
//! for one request and submits it to a [`DebugServer`]. The `*_args`
//! builders are exposed separately so the argument shapes can be checked
//! without a server.

use crate::pending::PendingResult;
use crate::protocol::{
    AttachArguments, Capabilities, ContinueArguments, ContinueResponseBody, DisconnectArguments,
    EvaluateArguments, EvaluateResponseBody, InitializeRequestArguments, NextArguments, Scope,
    ScopesArguments, ScopesResponseBody, SetBreakpointsArguments, SetBreakpointsResponseBody,
    Source, SourceBreakpoint, StackTraceArguments, StackTraceResponseBody, StepInArguments,
    StepOutArguments, VariablesArguments, VariablesResponseBody,
};
use crate::server::DebugServer;

/// Client id sent by [`initialize`].
pub const CLIENT_ID: &str = "test";

/// Adapter id sent by [`initialize`].
pub const ADAPTER_ID: &str = "dapcheck";

// ---------------------------------------------------------------------------
// Argument builders
// ---------------------------------------------------------------------------

/// `initialize` arguments carrying only the client and adapter ids.
pub fn initialize_args(client_id: &str, adapter_id: &str) -> InitializeRequestArguments {
    InitializeRequestArguments {
        client_id: Some(client_id.to_string()),
        client_name: None,
        adapter_id: adapter_id.to_string(),
        lines_start_at1: None,
        columns_start_at1: None,
        path_format: None,
    }
}

/// One line-only breakpoint per entry of `lines`, all under `path`.
pub fn set_breakpoints_args(path: &str, lines: &[i64]) -> SetBreakpointsArguments {
    let breakpoints = lines
        .iter()
        .map(|&line| SourceBreakpoint {
            line,
            column: None,
            condition: None,
            hit_condition: None,
        })
        .collect();

    SetBreakpointsArguments {
        source: Source {
            path: Some(path.to_string()),
            ..Default::default()
        },
        breakpoints: Some(breakpoints),
    }
}

/// `stackTrace` arguments for a whole thread.
pub fn stack_trace_args(thread_id: i64) -> StackTraceArguments {
    StackTraceArguments {
        thread_id,
        start_frame: None,
        levels: None,
    }
}

/// `scopes` arguments.
pub fn scopes_args(frame_id: i64) -> ScopesArguments {
    ScopesArguments { frame_id }
}

/// `variables` arguments for every child of a container.
pub fn variables_args(variables_reference: i64) -> VariablesArguments {
    VariablesArguments {
        variables_reference,
        filter: None,
        start: None,
        count: None,
    }
}

/// `continue` arguments.
pub fn continue_args(thread_id: i64) -> ContinueArguments {
    ContinueArguments {
        thread_id,
        single_thread: None,
    }
}

/// `stepIn` arguments.
pub fn step_in_args(thread_id: i64) -> StepInArguments {
    StepInArguments {
        thread_id,
        target_id: None,
        granularity: None,
    }
}

/// `stepOut` arguments.
pub fn step_out_args(thread_id: i64) -> StepOutArguments {
    StepOutArguments {
        thread_id,
        granularity: None,
    }
}

/// `next` arguments; stepping over maps to the protocol's `next`.
pub fn step_over_args(thread_id: i64) -> NextArguments {
    NextArguments {
        thread_id,
        granularity: None,
    }
}

/// `evaluate` arguments in the context of a frame.
pub fn evaluate_args(frame_id: i64, expression: &str) -> EvaluateArguments {
    EvaluateArguments {
        expression: expression.to_string(),
        frame_id: Some(frame_id),
        context: None,
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Start the session as client [`CLIENT_ID`].
pub fn initialize<S: DebugServer + ?Sized>(server: &S) -> PendingResult<Capabilities> {
    initialize_as(server, CLIENT_ID, ADAPTER_ID)
}

/// Start the session with explicit client and adapter ids.
pub fn initialize_as<S: DebugServer + ?Sized>(
    server: &S,
    client_id: &str,
    adapter_id: &str,
) -> PendingResult<Capabilities> {
    server.initialize(initialize_args(client_id, adapter_id))
}

/// Replace the breakpoints of `path` with one per line in `lines`.
pub fn set_breakpoints<S: DebugServer + ?Sized>(
    server: &S,
    path: &str,
    lines: &[i64],
) -> PendingResult<SetBreakpointsResponseBody> {
    server.set_breakpoints(set_breakpoints_args(path, lines))
}

/// Attach with an empty configuration.
pub fn attach<S: DebugServer + ?Sized>(server: &S) -> PendingResult<()> {
    attach_with(server, AttachArguments::new())
}

/// Attach with an adapter-specific configuration.
pub fn attach_with<S: DebugServer + ?Sized>(
    server: &S,
    config: AttachArguments,
) -> PendingResult<()> {
    server.attach(config)
}

/// Fetch the stack of a thread.
pub fn stack_trace<S: DebugServer + ?Sized>(
    server: &S,
    thread_id: i64,
) -> PendingResult<StackTraceResponseBody> {
    server.stack_trace(stack_trace_args(thread_id))
}

/// Fetch the scopes of a frame.
pub fn scopes<S: DebugServer + ?Sized>(
    server: &S,
    frame_id: i64,
) -> PendingResult<ScopesResponseBody> {
    server.scopes(scopes_args(frame_id))
}

/// Fetch the children of a variables reference.
pub fn variables<S: DebugServer + ?Sized>(
    server: &S,
    variables_reference: i64,
) -> PendingResult<VariablesResponseBody> {
    server.variables(variables_args(variables_reference))
}

/// Fetch the variables of a scope.
pub fn scope_variables<S: DebugServer + ?Sized>(
    server: &S,
    scope: &Scope,
) -> PendingResult<VariablesResponseBody> {
    variables(server, scope.variables_reference)
}

/// Resume a thread. Usually wrapped in
/// [`do_with_caused_event`](crate::correlate::do_with_caused_event) to await
/// the next stop.
pub fn continue_thread<S: DebugServer + ?Sized>(
    server: &S,
    thread_id: i64,
) -> PendingResult<ContinueResponseBody> {
    server.continue_(continue_args(thread_id))
}

/// Step into the next call on a thread.
pub fn step_in<S: DebugServer + ?Sized>(server: &S, thread_id: i64) -> PendingResult<()> {
    server.step_in(step_in_args(thread_id))
}

/// Step out of the current frame on a thread.
pub fn step_out<S: DebugServer + ?Sized>(server: &S, thread_id: i64) -> PendingResult<()> {
    server.step_out(step_out_args(thread_id))
}

/// Step over the current line on a thread.
pub fn step_over<S: DebugServer + ?Sized>(server: &S, thread_id: i64) -> PendingResult<()> {
    server.next(step_over_args(thread_id))
}

/// Evaluate `expression` in the context of a frame.
pub fn evaluate<S: DebugServer + ?Sized>(
    server: &S,
    frame_id: i64,
    expression: &str,
) -> PendingResult<EvaluateResponseBody> {
    server.evaluate(evaluate_args(frame_id, expression))
}

/// End the session.
pub fn disconnect<S: DebugServer + ?Sized>(server: &S) -> PendingResult<()> {
    server.disconnect(DisconnectArguments::default())
}
