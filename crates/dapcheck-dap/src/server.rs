//! The debug server as seen from the harness.

use crate::pending::PendingResult;
use crate::protocol::{
    AttachArguments, Capabilities, ContinueArguments, ContinueResponseBody, DisconnectArguments,
    EvaluateArguments, EvaluateResponseBody, InitializeRequestArguments, NextArguments,
    ScopesArguments, ScopesResponseBody, SetBreakpointsArguments, SetBreakpointsResponseBody,
    StackTraceArguments, StackTraceResponseBody, StepInArguments, StepOutArguments,
    VariablesArguments, VariablesResponseBody,
};

/// One method per DAP request the harness issues.
///
/// Each call initiates the request before returning and hands back a
/// [`PendingResult`] for the response. Transport and server failures
/// surface as a failed result; nothing is retried.
pub trait DebugServer {
    /// `initialize`
    fn initialize(&self, args: InitializeRequestArguments) -> PendingResult<Capabilities>;

    /// `attach`
    fn attach(&self, args: AttachArguments) -> PendingResult<()>;

    /// `setBreakpoints`
    fn set_breakpoints(
        &self,
        args: SetBreakpointsArguments,
    ) -> PendingResult<SetBreakpointsResponseBody>;

    /// `stackTrace`
    fn stack_trace(&self, args: StackTraceArguments) -> PendingResult<StackTraceResponseBody>;

    /// `scopes`
    fn scopes(&self, args: ScopesArguments) -> PendingResult<ScopesResponseBody>;

    /// `variables`
    fn variables(&self, args: VariablesArguments) -> PendingResult<VariablesResponseBody>;

    /// `continue`
    fn continue_(&self, args: ContinueArguments) -> PendingResult<ContinueResponseBody>;

    /// `stepIn`
    fn step_in(&self, args: StepInArguments) -> PendingResult<()>;

    /// `stepOut`
    fn step_out(&self, args: StepOutArguments) -> PendingResult<()>;

    /// `next`
    fn next(&self, args: NextArguments) -> PendingResult<()>;

    /// `evaluate`
    fn evaluate(&self, args: EvaluateArguments) -> PendingResult<EvaluateResponseBody>;

    /// `disconnect`
    fn disconnect(&self, args: DisconnectArguments) -> PendingResult<()>;
}
