//! A configured connection to the adapter under test.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncRead, AsyncWrite};

use dapcheck_config::{HarnessConfig, TransportKind};
use dapcheck_dap::{
    do_with_caused_event, driver, Capabilities, DapConnection, DapError, EventSink, PendingResult,
    StoppedEventBody,
};

/// A [`DapConnection`] plus the configuration it was opened with.
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    connection: DapConnection,
}

impl Harness {
    /// Open the transport named by `config.server`.
    ///
    /// # Errors
    ///
    /// Fails when the adapter cannot be reached or spawned.
    pub async fn connect(config: HarnessConfig) -> Result<Self> {
        let sink = Arc::new(EventSink::new());
        let connection = match config.server.transport {
            TransportKind::Tcp => {
                tracing::info!(address = %config.server.address, "connecting to adapter");
                DapConnection::connect_tcp(config.server.address.as_str(), sink)
                    .await
                    .with_context(|| {
                        format!("failed to connect to adapter at {}", config.server.address)
                    })?
            }
            TransportKind::Stdio => {
                let Some(command) = config.server.command.as_deref() else {
                    bail!("stdio transport needs server.command");
                };
                tracing::info!(command, "spawning adapter");
                DapConnection::spawn_adapter(command, &config.server.args, sink)
                    .with_context(|| format!("failed to spawn adapter `{command}`"))?
            }
        };
        Ok(Self { config, connection })
    }

    /// Use an already-open byte stream instead of the configured transport.
    ///
    /// Must be called from within a tokio runtime.
    pub fn over<R, W>(config: HarnessConfig, reader: R, writer: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let connection = DapConnection::new(reader, writer, Arc::new(EventSink::new()));
        Self { config, connection }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The server handle to pass to [`driver`] operations.
    pub fn server(&self) -> &DapConnection {
        &self.connection
    }

    pub fn sink(&self) -> &EventSink {
        self.connection.sink()
    }

    /// Await a response within `timeouts.request_ms`.
    pub async fn response<T>(
        &self,
        pending: PendingResult<T>,
        command: &str,
    ) -> Result<T, DapError> {
        pending.timeout(self.config.timeouts.request(), command).await
    }

    /// Await a correlated event within `timeouts.event_ms`.
    pub async fn event<T>(&self, pending: PendingResult<T>, event: &str) -> Result<T, DapError> {
        pending.timeout(self.config.timeouts.event(), event).await
    }

    /// `initialize` with the configured client and adapter ids.
    pub async fn initialize(&self) -> Result<Capabilities, DapError> {
        let pending = driver::initialize_as(
            &self.connection,
            &self.config.client_id,
            &self.config.adapter_id,
        );
        self.response(pending, "initialize").await
    }

    /// Run `action` and wait for both its `command` response and the stop
    /// it causes.
    ///
    /// The response is awaited first; a stop that arrives before it is
    /// still captured. On failure the stop interest is withdrawn, so the
    /// sink is free for the next registration.
    pub async fn until_stopped<T, F>(
        &self,
        command: &str,
        action: F,
    ) -> Result<(T, StoppedEventBody), DapError>
    where
        F: FnOnce(&DapConnection) -> PendingResult<T>,
    {
        let mut response = None;
        let stopped = do_with_caused_event(self.sink(), || {
            response = Some(action(&self.connection));
        });
        let outcome = async {
            let response = response.ok_or(DapError::Terminated)?;
            let response = self.response(response, command).await?;
            let stopped = self.event(stopped, "stopped").await?;
            Ok::<_, DapError>((response, stopped))
        }
        .await;
        if outcome.is_err() && self.sink().clear_stopped_interest() {
            tracing::debug!(command, "withdrew unanswered stop interest");
        }
        outcome
    }

    /// `disconnect` and wait for the acknowledgement.
    pub async fn disconnect(&self) -> Result<(), DapError> {
        self.response(driver::disconnect(&self.connection), "disconnect")
            .await
    }
}
