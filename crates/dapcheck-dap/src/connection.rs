//! A live connection to a debug adapter.
//!
//! Owns the reader and writer tasks for one adapter, hands out sequence
//! numbers, and implements [`DebugServer`] on top of the framed transport.
//! Inbound events are pushed into the connection's [`EventSink`].
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::process::{Child, Command as TokioCommand};
use tokio::sync::mpsc;

use crate::dispatcher::{Dispatcher, ResponseHandler};
use crate::error::DapError;
use crate::events::{DebugEvent, EventSink};
use crate::pending::PendingResult;
use crate::protocol::{
    AttachArguments, Capabilities, ContinueArguments, ContinueResponseBody, DisconnectArguments,
    EvaluateArguments, EvaluateResponseBody, InitializeRequestArguments, Message, NextArguments,
    Request, Response, ScopesArguments, ScopesResponseBody, SetBreakpointsArguments,
    SetBreakpointsResponseBody, StackTraceArguments, StackTraceResponseBody, StepInArguments,
    StepOutArguments, VariablesArguments, VariablesResponseBody,
};
use crate::server::DebugServer;
use crate::transport::{encode_message, read_message};

/// A connection to one debug adapter.
pub struct DapConnection {
    writer_tx: mpsc::UnboundedSender<Vec<u8>>,
    dispatcher: Arc<Mutex<Dispatcher>>,
    sink: Arc<EventSink>,
    next_seq: AtomicI64,
    child: Option<Child>,
}

impl DapConnection {
    /// Start the reader and writer tasks over an existing byte stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<R, W>(reader: R, writer: W, sink: Arc<EventSink>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (writer_tx, mut writer_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        tokio::spawn(async move {
            let mut writer = writer;
            while let Some(msg) = writer_rx.recv().await {
                if let Err(e) = writer.write_all(&msg).await {
                    tracing::warn!("write to adapter failed: {e}");
                    break;
                }
                if writer.flush().await.is_err() {
                    break;
                }
            }
        });

        let dispatcher = Arc::new(Mutex::new(Dispatcher::new()));
        tokio::spawn(read_loop(reader, dispatcher.clone(), sink.clone()));

        Self {
            writer_tx,
            dispatcher,
            sink,
            next_seq: AtomicI64::new(1),
            child: None,
        }
    }

    /// Connect to an adapter listening on a TCP socket.
    pub async fn connect_tcp<A: ToSocketAddrs>(
        addr: A,
        sink: Arc<EventSink>,
    ) -> Result<Self, DapError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (reader, writer) = stream.into_split();
        Ok(Self::new(reader, writer, sink))
    }

    /// Spawn an adapter process and talk to it over stdio.
    ///
    /// The process is killed when the connection is dropped.
    pub fn spawn_adapter(
        command: &str,
        args: &[String],
        sink: Arc<EventSink>,
    ) -> Result<Self, DapError> {
        let mut child = TokioCommand::new(command)
            .args(args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DapError::Transport("could not capture adapter stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DapError::Transport("could not capture adapter stdout".into()))?;

        let mut conn = Self::new(stdout, stdin, sink);
        conn.child = Some(child);
        Ok(conn)
    }

    /// The sink receiving this connection's events.
    pub fn sink(&self) -> &Arc<EventSink> {
        &self.sink
    }

    /// OS process id of a spawned adapter that is still running.
    pub fn adapter_pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    /// Whether new requests are refused.
    pub fn is_closed(&self) -> bool {
        self.dispatcher().is_closed()
    }

    /// How many requests are awaiting a response.
    pub fn pending_requests(&self) -> usize {
        self.dispatcher().pending_count()
    }

    fn dispatcher(&self) -> MutexGuard<'_, Dispatcher> {
        self.dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Send `command` and decode its response with `decode`.
    fn request<A, T>(
        &self,
        command: &str,
        args: A,
        decode: fn(Response) -> Result<T, DapError>,
    ) -> PendingResult<T>
    where
        A: Serialize,
        T: Send + 'static,
    {
        let arguments = match serde_json::to_value(args) {
            Ok(v) => v,
            Err(e) => {
                return PendingResult::failed(DapError::Transport(format!(
                    "cannot serialize {command} arguments: {e}"
                )))
            }
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let bytes = match encode_message(&Message::Request(Request {
            seq,
            command: command.to_string(),
            arguments: Some(arguments),
        })) {
            Ok(b) => b,
            Err(e) => return PendingResult::failed(e),
        };

        let (completer, pending) = PendingResult::channel();
        let handler: ResponseHandler =
            Box::new(move |result| completer.complete(result.and_then(decode)));
        if !self.dispatcher().register(seq, handler) {
            return pending;
        }

        tracing::debug!(seq, command, "sending request");
        if self.writer_tx.send(bytes).is_err() {
            let handler = self.dispatcher().take(seq);
            if let Some(handler) = handler {
                handler(Err(DapError::Transport(format!(
                    "cannot queue {command}: writer unavailable"
                ))));
            }
        }
        pending
    }
}

impl std::fmt::Debug for DapConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DapConnection")
            .field("next_seq", &self.next_seq)
            .field("pending_requests", &self.pending_requests())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Decode a successful response body into `T`.
fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, DapError> {
    let response = check_success(response)?;
    let body = response
        .body
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    serde_json::from_value(body).map_err(|e| {
        DapError::InvalidResponse(format!("bad `{}` response body: {e}", response.command))
    })
}

/// Accept a successful response, ignoring any body.
fn decode_ack(response: Response) -> Result<(), DapError> {
    check_success(response).map(|_| ())
}

fn check_success(response: Response) -> Result<Response, DapError> {
    if response.success {
        return Ok(response);
    }
    Err(DapError::Rejected {
        message: response
            .message
            .unwrap_or_else(|| "request failed".to_string()),
        command: response.command,
    })
}

/// Read messages until the stream ends, then fail whatever is outstanding.
async fn read_loop<R>(reader: R, dispatcher: Arc<Mutex<Dispatcher>>, sink: Arc<EventSink>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    loop {
        match read_message(&mut reader).await {
            Ok(Some(Message::Response(response))) => {
                tracing::debug!(
                    request_seq = response.request_seq,
                    command = %response.command,
                    success = response.success,
                    "received response"
                );
                // Take the handler first so it runs without the lock held.
                let handler = dispatcher
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take(response.request_seq);
                match handler {
                    Some(handler) => handler(Ok(response)),
                    None => tracing::warn!(
                        request_seq = response.request_seq,
                        "response for unknown request"
                    ),
                }
            }
            Ok(Some(Message::Event(event))) => match DebugEvent::from_event(event) {
                Ok(event) => sink.on_event(event),
                Err(e) => tracing::warn!("dropping event: {e}"),
            },
            Ok(Some(Message::Request(request))) => {
                tracing::debug!(command = %request.command, "ignoring reverse request");
            }
            Ok(None) => {
                tracing::debug!("adapter closed the connection");
                break;
            }
            Err(DapError::InvalidResponse(e)) => {
                tracing::warn!("skipping malformed message: {e}");
            }
            Err(e) => {
                tracing::warn!("adapter connection failed: {e}");
                break;
            }
        }
    }
    dispatcher
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .close(|| DapError::Terminated);
}

impl DebugServer for DapConnection {
    fn initialize(&self, args: InitializeRequestArguments) -> PendingResult<Capabilities> {
        self.request("initialize", args, decode_body)
    }

    fn attach(&self, args: AttachArguments) -> PendingResult<()> {
        self.request("attach", args, decode_ack)
    }

    fn set_breakpoints(
        &self,
        args: SetBreakpointsArguments,
    ) -> PendingResult<SetBreakpointsResponseBody> {
        self.request("setBreakpoints", args, decode_body)
    }

    fn stack_trace(&self, args: StackTraceArguments) -> PendingResult<StackTraceResponseBody> {
        self.request("stackTrace", args, decode_body)
    }

    fn scopes(&self, args: ScopesArguments) -> PendingResult<ScopesResponseBody> {
        self.request("scopes", args, decode_body)
    }

    fn variables(&self, args: VariablesArguments) -> PendingResult<VariablesResponseBody> {
        self.request("variables", args, decode_body)
    }

    fn continue_(&self, args: ContinueArguments) -> PendingResult<ContinueResponseBody> {
        self.request("continue", args, decode_body)
    }

    fn step_in(&self, args: StepInArguments) -> PendingResult<()> {
        self.request("stepIn", args, decode_ack)
    }

    fn step_out(&self, args: StepOutArguments) -> PendingResult<()> {
        self.request("stepOut", args, decode_ack)
    }

    fn next(&self, args: NextArguments) -> PendingResult<()> {
        self.request("next", args, decode_ack)
    }

    fn evaluate(&self, args: EvaluateArguments) -> PendingResult<EvaluateResponseBody> {
        self.request("evaluate", args, decode_body)
    }

    fn disconnect(&self, args: DisconnectArguments) -> PendingResult<()> {
        let pending = self.request("disconnect", args, decode_ack);
        self.dispatcher().refuse_new();
        pending
    }
}
