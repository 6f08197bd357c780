//! A scripted in-process debug adapter.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use dapcheck::config::{HarnessConfig, LogLevel};
use dapcheck::dap::transport::{encode_message, read_message};
use dapcheck::dap::{Event, Message, Request, Response};
use dapcheck::{logging, Harness};

/// Thread the adapter reports stops on.
pub const THREAD_ID: i64 = 1;

/// Frame id of the only stack frame.
pub const FRAME_ID: i64 = 1000;

/// Variables reference of the `Local` scope.
pub const LOCALS_REF: i64 = 7;

/// Requests the adapter has received, in order.
pub type Requests = Arc<Mutex<Vec<Request>>>;

/// Config with short deadlines so a missing reply fails fast.
pub fn test_config() -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.timeouts.request_ms = 2_000;
    config.timeouts.event_ms = 500;
    config
}

/// Start a fake adapter on an in-memory pipe and a harness talking to it.
pub fn start() -> (Harness, Requests) {
    start_with(test_config())
}

pub fn start_with(config: HarnessConfig) -> (Harness, Requests) {
    logging::init_for_tests(LogLevel::Debug);
    let (client, adapter) = tokio::io::duplex(64 * 1024);
    let requests = Requests::default();
    let (read, write) = tokio::io::split(adapter);
    tokio::spawn(serve(read, write, requests.clone()));
    let (read, write) = tokio::io::split(client);
    (Harness::over(config, read, write), requests)
}

/// Commands received so far.
pub fn commands(requests: &Requests) -> Vec<String> {
    requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.command.clone())
        .collect()
}

/// Arguments of the last `command` request.
pub fn last_arguments(requests: &Requests, command: &str) -> Value {
    requests
        .lock()
        .unwrap()
        .iter()
        .rev()
        .find(|r| r.command == command)
        .and_then(|r| r.arguments.clone())
        .unwrap_or(Value::Null)
}

/// Response body or failure message, plus the events sent after it.
type Reply = (Result<Value, String>, Vec<(&'static str, Value)>);

#[derive(Default)]
struct Debuggee {
    breakpoints: Vec<i64>,
    line: i64,
}

impl Debuggee {
    fn handle(&mut self, command: &str, args: &Value) -> Reply {
        let thread_id = args["threadId"].as_i64().unwrap_or(THREAD_ID);
        match command {
            "initialize" => (
                Ok(json!({
                    "supportsConfigurationDoneRequest": true,
                    "supportsEvaluateForHovers": true,
                })),
                vec![("initialized", Value::Null)],
            ),
            "attach" => (
                Ok(json!({})),
                vec![(
                    "process",
                    json!({"name": "cfml", "startMethod": "attach"}),
                )],
            ),
            "setBreakpoints" => {
                self.breakpoints = args["breakpoints"]
                    .as_array()
                    .map(|bps| bps.iter().filter_map(|b| b["line"].as_i64()).collect())
                    .unwrap_or_default();
                let breakpoints: Vec<Value> = self
                    .breakpoints
                    .iter()
                    .enumerate()
                    .map(|(i, line)| json!({"id": i + 1, "verified": true, "line": line}))
                    .collect();
                (Ok(json!({ "breakpoints": breakpoints })), Vec::new())
            }
            "continue" => {
                self.line = self.breakpoints.first().copied().unwrap_or(1);
                (
                    Ok(json!({"allThreadsContinued": true})),
                    vec![
                        ("output", json!({"category": "stdout", "output": "running\n"})),
                        (
                            "stopped",
                            json!({"reason": "breakpoint", "threadId": thread_id}),
                        ),
                    ],
                )
            }
            "next" | "stepIn" | "stepOut" => {
                self.line += 1;
                (
                    Ok(json!({})),
                    vec![("stopped", json!({"reason": "step", "threadId": thread_id}))],
                )
            }
            "stackTrace" => (
                Ok(json!({
                    "stackFrames": [{
                        "id": FRAME_ID,
                        "name": "b.cfm",
                        "source": {"path": "/a/b.cfm"},
                        "line": self.line,
                        "column": 1,
                    }],
                    "totalFrames": 1,
                })),
                Vec::new(),
            ),
            "scopes" => (
                Ok(json!({"scopes": [
                    {"name": "Local", "variablesReference": LOCALS_REF, "expensive": false},
                ]})),
                Vec::new(),
            ),
            "variables" if args["variablesReference"] == json!(LOCALS_REF) => (
                Ok(json!({"variables": [
                    {"name": "x", "value": "1", "type": "numeric", "variablesReference": 0},
                    {"name": "line", "value": self.line.to_string(), "variablesReference": 0},
                ]})),
                Vec::new(),
            ),
            "variables" => (Ok(json!({"variables": []})), Vec::new()),
            "evaluate" => {
                let expression = args["expression"].as_str().unwrap_or_default();
                match sum(expression) {
                    Some(n) => (
                        Ok(json!({"result": n.to_string(), "variablesReference": 0})),
                        Vec::new(),
                    ),
                    None => (Err(format!("cannot evaluate `{expression}`")), Vec::new()),
                }
            }
            "disconnect" => (Ok(json!({})), vec![("terminated", Value::Null)]),
            other => (Err(format!("unsupported request `{other}`")), Vec::new()),
        }
    }
}

/// `"1+1"` -> `2`.
fn sum(expression: &str) -> Option<i64> {
    expression
        .split('+')
        .map(|term| term.trim().parse::<i64>().ok())
        .sum()
}

async fn serve<R, W>(read: R, mut write: W, requests: Requests)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(read);
    let mut debuggee = Debuggee::default();
    let mut seq = 0;
    let mut next_seq = move || {
        seq += 1;
        seq
    };

    while let Ok(Some(message)) = read_message(&mut reader).await {
        let Message::Request(request) = message else {
            continue;
        };
        requests.lock().unwrap().push(request.clone());

        let args = request.arguments.clone().unwrap_or_else(|| json!({}));
        let (outcome, events) = debuggee.handle(&request.command, &args);
        let (success, message, body) = match outcome {
            Ok(body) => (true, None, Some(body)),
            Err(message) => (false, Some(message), None),
        };

        let mut out = vec![Message::Response(Response {
            seq: next_seq(),
            request_seq: request.seq,
            success,
            command: request.command.clone(),
            message,
            body,
        })];
        out.extend(events.into_iter().map(|(event, body)| {
            Message::Event(Event {
                seq: next_seq(),
                event: event.to_string(),
                body: (!body.is_null()).then_some(body),
            })
        }));
        for message in out {
            let bytes = encode_message(&message).unwrap();
            if write.write_all(&bytes).await.is_err() {
                return;
            }
        }
        let _ = write.flush().await;

        if request.command == "disconnect" {
            // Give the client a moment to read the tail before hanging up.
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = write.shutdown().await;
            return;
        }
    }
}

/// Serve one TCP client with the scripted adapter.
pub async fn serve_tcp(listener: tokio::net::TcpListener, requests: Requests) {
    if let Ok((stream, _)) = listener.accept().await {
        let (read, write) = stream.into_split();
        serve(read, write, requests).await;
    }
}
