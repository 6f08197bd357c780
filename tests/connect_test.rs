//! Opening the configured transport.

mod common;

use dapcheck::config::{load_from_str, TransportKind};
use dapcheck::dap::driver;
use dapcheck::Harness;

#[tokio::test]
async fn connects_over_tcp_from_config() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let requests = common::Requests::default();
    tokio::spawn(common::serve_tcp(listener, requests.clone()));

    let config = load_from_str(&format!(
        "client_id = \"ci\"\n[server]\naddress = \"{address}\"\n"
    ))
    .unwrap();
    assert_eq!(config.server.transport, TransportKind::Tcp);

    let harness = Harness::connect(config).await.unwrap();
    harness.initialize().await.unwrap();
    let result = harness
        .response(
            driver::evaluate(harness.server(), common::FRAME_ID, "20+22"),
            "evaluate",
        )
        .await
        .unwrap();
    assert_eq!(result.result, "42");
    harness.disconnect().await.unwrap();

    assert_eq!(
        common::last_arguments(&requests, "initialize")["clientID"],
        "ci"
    );
    assert_eq!(
        common::last_arguments(&requests, "initialize")["adapterID"],
        "dapcheck"
    );
}

#[tokio::test]
async fn unreachable_adapter_reports_address() {
    // Bind then drop to get a port nothing listens on.
    let address = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let config = load_from_str(&format!("[server]\naddress = \"{address}\"\n")).unwrap();

    let err = Harness::connect(config).await.unwrap_err();
    assert!(
        format!("{err:#}").contains(&address.to_string()),
        "got: {err:#}"
    );
}

#[tokio::test]
async fn missing_adapter_binary_fails_to_spawn() {
    let config = load_from_str(
        "[server]\ntransport = \"stdio\"\ncommand = \"/nonexistent/dap-adapter\"\n",
    )
    .unwrap();

    let err = Harness::connect(config).await.unwrap_err();
    assert!(
        format!("{err:#}").contains("/nonexistent/dap-adapter"),
        "got: {err:#}"
    );
}

#[tokio::test]
async fn spawned_adapter_reports_its_pid() {
    // `cat` stands in for an adapter: it is alive but never answers.
    let config =
        load_from_str("[server]\ntransport = \"stdio\"\ncommand = \"cat\"\n").unwrap();

    let harness = Harness::connect(config).await.unwrap();
    assert!(harness.server().adapter_pid().is_some());
    assert!(!harness.server().is_closed());
}
