use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use dapcheck::dap::driver;
use dapcheck::{logging, Harness};
use dapcheck_config::load_or_default;

/// Connect to the configured adapter, initialize, attach, and disconnect.
async fn smoke_check(config_path: PathBuf) -> Result<()> {
    let config = load_or_default(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    logging::init(config.log.level);

    let harness = Harness::connect(config).await?;
    if let Some(pid) = harness.server().adapter_pid() {
        info!(pid, "adapter process started");
    }
    let caps = harness.initialize().await.context("initialize failed")?;
    info!(?caps, "adapter initialized");

    harness
        .response(driver::attach(harness.server()), "attach")
        .await
        .context("attach failed")?;
    harness.disconnect().await.context("disconnect failed")?;

    info!("adapter passed the smoke check");
    Ok(())
}

#[tokio::main]
async fn main() {
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dapcheck.toml"));

    if let Err(e) = smoke_check(config_path).await {
        eprintln!("dapcheck: {:#}", e);
        std::process::exit(1);
    }
}
