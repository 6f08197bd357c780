//! Wire types for the Debug Adapter Protocol.
//!
//! Only the subset of the Debug Adapter Protocol the harness drives is
//! modelled here. Everything derives serde Serialize/Deserialize so the
//! same types serve the runtime and scripted test adapters.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Base protocol messages
// ---------------------------------------------------------------------------

/// Any message on the wire, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// A request (client to server, or a reverse request).
    Request(Request),
    /// A response to an earlier request.
    Response(Response),
    /// An unsolicited event.
    Event(Event),
}

/// A request. Sent by the harness, or by the adapter as a reverse request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Sequence number.
    pub seq: i64,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

/// The adapter's answer to one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Sequence number.
    pub seq: i64,
    /// `seq` of the request being answered.
    pub request_seq: i64,
    pub success: bool,
    pub command: String,
    /// Short failure reason; only meaningful when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// An unsolicited notification from the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Sequence number.
    pub seq: i64,
    /// The event type.
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Session setup
// ---------------------------------------------------------------------------

/// `initialize` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequestArguments {
    #[serde(rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(rename = "adapterID")]
    pub adapter_id: String,
    /// Whether lines are 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_start_at1: Option<bool>,
    /// Whether columns are 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_start_at1: Option<bool>,
    /// `"path"` or `"uri"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_format: Option<String>,
}

/// What the adapter reported it can do. Unlisted capabilities are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_configuration_done_request: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_conditional_breakpoints: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_hit_conditional_breakpoints: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_evaluate_for_hovers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_set_variable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_terminate_request: Option<bool>,
}

/// Free-form `attach` configuration; its shape is adapter-specific.
pub type AttachArguments = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// `setBreakpoints` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBreakpointsArguments {
    pub source: Source,
    /// Breakpoints to set (replaces all previous ones in the source).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<SourceBreakpoint>>,
}

/// One requested breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBreakpoint {
    pub line: i64,
    /// Optional column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    /// Condition expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_condition: Option<String>,
}

/// `setBreakpoints` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBreakpointsResponseBody {
    /// One entry per requested breakpoint, in request order.
    pub breakpoints: Vec<Breakpoint>,
}

/// A breakpoint as reported by the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Whether the breakpoint could be set.
    pub verified: bool,
    /// Optional explanation of the breakpoint state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Where the adapter actually placed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
}

/// A source location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File system path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Handle for sources that have no path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<i64>,
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// `stackTrace` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceArguments {
    /// Thread whose stack to retrieve.
    pub thread_id: i64,
    /// Index of the first frame to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<i64>,
    /// Maximum number of frames to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<i64>,
}

/// `stackTrace` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceResponseBody {
    /// Frames, topmost first.
    pub stack_frames: Vec<StackFrame>,
    /// Total number of frames available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<i64>,
}

/// One frame of a `stackTrace` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// Pass to `scopes` and `evaluate`.
    pub id: i64,
    pub name: String,
    /// Source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    pub line: i64,
    pub column: i64,
}

/// `scopes` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopesArguments {
    /// Frame whose scopes to retrieve.
    pub frame_id: i64,
}

/// `scopes` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopesResponseBody {
    /// Scopes of the frame.
    pub scopes: Vec<Scope>,
}

/// A named group of variables within a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub name: String,
    /// Pass to `variables` to list the scope's contents.
    pub variables_reference: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expensive: Option<bool>,
}

/// `variables` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesArguments {
    /// Reference of the container to expand.
    pub variables_reference: i64,
    /// Filter: "indexed" or "named".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Index of the first child to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Number of children to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// `variables` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesResponseBody {
    /// Child variables.
    pub variables: Vec<Variable>,
}

/// A variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Name of the variable.
    pub name: String,
    pub value: String,
    /// Type of the variable.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<String>,
    /// Non-zero when the variable has children.
    #[serde(default)]
    pub variables_reference: i64,
}

// ---------------------------------------------------------------------------
// Flow control
// ---------------------------------------------------------------------------

/// `continue` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueArguments {
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,
}

/// `continue` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueResponseBody {
    /// Whether every thread was resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_continued: Option<bool>,
}

/// `next` arguments. This is the protocol's name for step over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextArguments {
    /// The thread to step.
    pub thread_id: i64,
    /// Stepping granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

/// `stepIn` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInArguments {
    /// The thread to step.
    pub thread_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    /// Stepping granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

/// `stepOut` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutArguments {
    /// The thread to step.
    pub thread_id: i64,
    /// Stepping granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<String>,
}

// ---------------------------------------------------------------------------
// Evaluate
// ---------------------------------------------------------------------------

/// `evaluate` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateArguments {
    pub expression: String,
    /// Frame supplying the scope; global scope when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<i64>,
    /// `"watch"`, `"repl"`, `"hover"`, or `"clipboard"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// `evaluate` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponseBody {
    /// The result string.
    pub result: String,
    /// Type of the result.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    /// Non-zero when the result has children.
    #[serde(default)]
    pub variables_reference: i64,
}

// ---------------------------------------------------------------------------
// Disconnect
// ---------------------------------------------------------------------------

/// `disconnect` arguments. All fields are left to the adapter's defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectArguments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_debuggee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspend_debuggee: Option<bool>,
}

// ---------------------------------------------------------------------------
// Event bodies
// ---------------------------------------------------------------------------

/// Why execution stopped.
///
/// Reasons outside the protocol's fixed set are kept verbatim in
/// [`StopReason::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StopReason {
    Step,
    Breakpoint,
    Exception,
    Pause,
    Entry,
    Goto,
    FunctionBreakpoint,
    DataBreakpoint,
    InstructionBreakpoint,
    /// An adapter-specific reason.
    Other(String),
}

impl StopReason {
    /// The reason as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            StopReason::Step => "step",
            StopReason::Breakpoint => "breakpoint",
            StopReason::Exception => "exception",
            StopReason::Pause => "pause",
            StopReason::Entry => "entry",
            StopReason::Goto => "goto",
            StopReason::FunctionBreakpoint => "function breakpoint",
            StopReason::DataBreakpoint => "data breakpoint",
            StopReason::InstructionBreakpoint => "instruction breakpoint",
            StopReason::Other(reason) => reason,
        }
    }
}

impl From<String> for StopReason {
    fn from(reason: String) -> Self {
        match reason.as_str() {
            "step" => StopReason::Step,
            "breakpoint" => StopReason::Breakpoint,
            "exception" => StopReason::Exception,
            "pause" => StopReason::Pause,
            "entry" => StopReason::Entry,
            "goto" => StopReason::Goto,
            "function breakpoint" => StopReason::FunctionBreakpoint,
            "data breakpoint" => StopReason::DataBreakpoint,
            "instruction breakpoint" => StopReason::InstructionBreakpoint,
            _ => StopReason::Other(reason),
        }
    }
}

impl From<StopReason> for String {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::Other(reason) => reason,
            known => known.as_str().to_string(),
        }
    }
}

/// `stopped` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppedEventBody {
    pub reason: StopReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Thread that stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_stopped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// `continued` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuedEventBody {
    /// Thread that resumed.
    pub thread_id: i64,
    /// Whether every thread resumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_threads_continued: Option<bool>,
}

/// `exited` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitedEventBody {
    pub exit_code: i64,
}

/// `terminated` event. Adapters may omit the body entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminatedEventBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<serde_json::Value>,
}

/// `thread` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEventBody {
    /// "started", "exited", or adapter-specific.
    pub reason: String,
    /// The thread concerned.
    pub thread_id: i64,
}

/// `output` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputEventBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
}

/// `breakpoint` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointEventBody {
    /// "changed", "new", "removed", or adapter-specific.
    pub reason: String,
    /// The breakpoint concerned.
    pub breakpoint: Breakpoint,
}

/// `module` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEventBody {
    /// "new", "changed", or "removed".
    pub reason: String,
    /// The module; kept opaque.
    pub module: serde_json::Value,
}

/// `loadedSource` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedSourceEventBody {
    /// "new", "changed", or "removed".
    pub reason: String,
    /// The source concerned.
    pub source: Source,
}

/// `process` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEventBody {
    /// Logical name of the process.
    pub name: String,
    /// OS process id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_process_id: Option<i64>,
    /// Whether the process runs on the same machine as the adapter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_local_process: Option<bool>,
    /// "launch", "attach", or "attachForSuspendedLaunch".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_method: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_initialize_uses_upper_case_id_fields() {
        let args = InitializeRequestArguments {
            client_id: Some("test".into()),
            client_name: None,
            adapter_id: "dapcheck".into(),
            lines_start_at1: Some(true),
            columns_start_at1: None,
            path_format: None,
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["clientID"], "test");
        assert_eq!(json["adapterID"], "dapcheck");
        assert_eq!(json["linesStartAt1"], true);
        assert!(json.get("clientName").is_none());
    }

    #[test]
    fn protocol_message_tagged_by_type() {
        let msg = Message::Request(Request {
            seq: 1,
            command: "initialize".into(),
            arguments: Some(serde_json::json!({"adapterID": "dapcheck"})),
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "request");
        assert_eq!(json["command"], "initialize");

        let decoded: Message = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn protocol_response_without_body_decodes() {
        let msg: Message = serde_json::from_value(serde_json::json!({
            "seq": 4,
            "type": "response",
            "request_seq": 2,
            "success": true,
            "command": "attach"
        }))
        .unwrap();
        match msg {
            Message::Response(resp) => {
                assert_eq!(resp.request_seq, 2);
                assert!(resp.success);
                assert!(resp.body.is_none());
                assert!(resp.message.is_none());
            }
            other => panic!("expected response, got {other:?}"),
        }
    }

    #[test]
    fn protocol_event_decodes() {
        let msg: Message = serde_json::from_str(
            r#"{"seq":3,"type":"event","event":"stopped","body":{"reason":"breakpoint","threadId":1}}"#,
        )
        .unwrap();
        let Message::Event(evt) = msg else {
            panic!("expected event");
        };
        assert_eq!(evt.event, "stopped");
        let body: StoppedEventBody = serde_json::from_value(evt.body.unwrap()).unwrap();
        assert_eq!(body.reason, StopReason::Breakpoint);
        assert_eq!(body.thread_id, Some(1));
    }

    #[test]
    fn protocol_set_breakpoints_shape() {
        let args = SetBreakpointsArguments {
            source: Source {
                path: Some("/a/b.cfm".into()),
                ..Default::default()
            },
            breakpoints: Some(vec![SourceBreakpoint {
                line: 42,
                column: None,
                condition: None,
                hit_condition: None,
            }]),
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["source"], serde_json::json!({"path": "/a/b.cfm"}));
        assert_eq!(json["breakpoints"], serde_json::json!([{"line": 42}]));
    }

    #[test]
    fn protocol_variable_reference_defaults_to_zero() {
        let var: Variable =
            serde_json::from_str(r#"{"name":"counter","value":"42","type":"numeric"}"#).unwrap();
        assert_eq!(var.variables_reference, 0);
        assert_eq!(var.variable_type.as_deref(), Some("numeric"));
    }

    #[test]
    fn protocol_evaluate_response_decodes() {
        let body: EvaluateResponseBody =
            serde_json::from_str(r#"{"result":"2","variablesReference":0}"#).unwrap();
        assert_eq!(body.result, "2");
        assert!(body.result_type.is_none());
    }

    #[test]
    fn protocol_stop_reason_wire_names() {
        let cases = [
            (StopReason::Step, "\"step\""),
            (StopReason::Breakpoint, "\"breakpoint\""),
            (StopReason::Exception, "\"exception\""),
            (StopReason::Pause, "\"pause\""),
            (StopReason::Entry, "\"entry\""),
            (StopReason::Goto, "\"goto\""),
            (StopReason::FunctionBreakpoint, "\"function breakpoint\""),
            (StopReason::DataBreakpoint, "\"data breakpoint\""),
        ];
        for (reason, wire) in cases {
            assert_eq!(serde_json::to_string(&reason).unwrap(), wire);
        }
    }

    #[test]
    fn protocol_stop_reason_keeps_adapter_specific_text() {
        let body: StoppedEventBody =
            serde_json::from_str(r#"{"reason":"hot reload","threadId":2}"#).unwrap();
        assert_eq!(body.reason, StopReason::Other("hot reload".into()));
        assert_eq!(body.reason.as_str(), "hot reload");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["reason"], "hot reload");
    }

    #[test]
    fn protocol_stop_reason_instruction_breakpoint_round_trips() {
        let reason: StopReason = serde_json::from_str("\"instruction breakpoint\"").unwrap();
        assert_eq!(reason, StopReason::InstructionBreakpoint);
        assert_eq!(
            serde_json::to_string(&reason).unwrap(),
            "\"instruction breakpoint\""
        );
    }
}
