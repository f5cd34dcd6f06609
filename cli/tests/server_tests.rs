// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! End-to-end tests: a real listener, the production router and the CLI client.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use telemetron_cli::commands::StateClient;
use telemetron_cli::server;
use telemetron_core::domain::config::TelemetronConfig;

struct RunningServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
}

async fn spawn_server(config: TelemetronConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        server::run(listener, &config, async {
            let _ = rx.await;
        })
        .await
    });

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}

impl RunningServer {
    fn client(&self) -> StateClient {
        StateClient::new(&self.addr.ip().to_string(), self.addr.port()).unwrap()
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_client_reads_system_state() {
    let server = spawn_server(TelemetronConfig::default()).await;

    let state = server.client().system_state().await.unwrap();

    assert_eq!(state.id, "system-1");
    assert_eq!(state.agents.len(), 2);
    assert_eq!(state.workload[0].pods.len(), 3);
    server.stop().await;
}

#[tokio::test]
async fn test_client_agent_lookup() {
    let server = spawn_server(TelemetronConfig::default()).await;
    let client = server.client();

    let agent = client.agent("agent-1").await.unwrap().unwrap();
    assert_eq!(agent.max_parallel_invocations, 5);
    assert!(client.agent("nobody").await.unwrap().is_none());
    // Reserved characters stay inside the name segment
    assert!(client.agent("agent-1?verbose").await.unwrap().is_none());
    assert!(client.agent("agent-1/extra").await.unwrap().is_none());
    server.stop().await;
}

#[tokio::test]
async fn test_cached_server_serves_identical_snapshots() {
    let mut config = TelemetronConfig::default();
    config.cache.ttl_seconds = 60;
    config.data_sources.activity_interval_seconds = 1;
    let server = spawn_server(config).await;
    let client = server.client();

    let first = client.system_state().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(1_200)).await;
    let second = client.system_state().await.unwrap();

    assert_eq!(first, second);
    server.stop().await;
}

#[tokio::test]
async fn test_run_rejects_disabled_mock_data() {
    let mut config = TelemetronConfig::default();
    config.data_sources.mock_data = false;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let result = server::run(listener, &config, std::future::pending()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_client_reports_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = StateClient::new("127.0.0.1", port).unwrap();

    assert!(client.system_state().await.is_err());
}
