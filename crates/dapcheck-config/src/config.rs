use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the harness reaches the debug adapter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Connect to an adapter already listening on a socket.
    #[default]
    Tcp,
    /// Spawn the adapter and talk over its stdin/stdout.
    Stdio,
}

/// Log verbosity level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Debug messages.
    Debug,
    /// Informational messages (default).
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Where the debug adapter lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Transport used to reach the adapter.
    #[serde(default)]
    pub transport: TransportKind,
    /// `host:port` for the TCP transport.
    #[serde(default = "default_address")]
    pub address: String,
    /// Adapter executable for the stdio transport.
    #[serde(default)]
    pub command: Option<String>,
    /// Arguments passed to `command`.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_address() -> String {
    "127.0.0.1:10000".to_string()
}

impl ServerConfig {
    /// Parse [`address`](Self::address) as a socket address.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.address.parse().ok()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Tcp,
            address: default_address(),
            command: None,
            args: Vec::new(),
        }
    }
}

/// Deadlines applied by tests when awaiting pending results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Upper bound for a request's response, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_ms: u64,
    /// Upper bound for a correlated event, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub event_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5_000
}

impl TimeoutConfig {
    /// The request deadline.
    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }

    /// The event deadline.
    pub fn event(&self) -> Duration {
        Duration::from_millis(self.event_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_ms: default_timeout_ms(),
            event_ms: default_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log verbosity level.
    #[serde(default)]
    pub level: LogLevel,
}

/// Top-level harness configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Client id sent in `initialize`.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Adapter id sent in `initialize`.
    #[serde(default = "default_adapter_id")]
    pub adapter_id: String,
    /// Adapter location.
    #[serde(default)]
    pub server: ServerConfig,
    /// Wait deadlines.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_client_id() -> String {
    "test".to_string()
}

fn default_adapter_id() -> String {
    "dapcheck".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            adapter_id: default_adapter_id(),
            server: ServerConfig::default(),
            timeouts: TimeoutConfig::default(),
            log: LogConfig::default(),
        }
    }
}
