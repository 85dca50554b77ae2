//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use reservation_router::config::RouterConfig;
use reservation_router::http::HttpServer;
use reservation_router::lifecycle::Shutdown;

/// A running shell bound to an ephemeral port.
pub struct TestShell {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub updates: mpsc::UnboundedSender<RouterConfig>,
}

impl TestShell {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestShell {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the shell with the given configuration.
pub async fn start_shell(config: RouterConfig) -> TestShell {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestShell {
        addr,
        shutdown,
        updates,
    }
}

/// Client that never follows redirects and bypasses system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
