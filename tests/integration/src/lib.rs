//! End-to-end tests for the ListKeeper HTTP server.
//!
//! Each test spawns the real hyper service on an ephemeral loopback port
//! over a private in-memory store, then drives it with `reqwest`.

use std::sync::{Arc, Once};

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;

use listkeeper_core::handler::ListKeeperCoreHandler;
use listkeeper_core::provider::ListKeeperProvider;
use listkeeper_core::store::ListStore;
use listkeeper_http::{ListKeeperHttpConfig, ListKeeperHttpService};

#[cfg(test)]
mod test_error;
#[cfg(test)]
mod test_lists;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A server running on a background task.
#[derive(Debug)]
pub struct TestServer {
    base_url: String,
    store: ListStore,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store.
    pub async fn start() -> Self {
        init_tracing();

        let store = ListStore::open_in_memory()
            .await
            .expect("in-memory store should open");
        let provider = ListKeeperProvider::new(store.clone());
        let handler = ListKeeperCoreHandler::new(Arc::new(provider));
        let service =
            ListKeeperHttpService::new(Arc::new(handler), ListKeeperHttpConfig::default());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback bind should succeed");
        let addr = listener.local_addr().expect("bound listener has an address");

        let task = tokio::spawn(async move {
            let http = HttpConnBuilder::new(TokioExecutor::new());
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    continue;
                };
                let conn = http
                    .serve_connection(TokioIo::new(stream), service.clone())
                    .into_owned();
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        tracing::debug!(error = %e, "connection error");
                    }
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
            task,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Direct access to the backing store, for asserting on side effects.
    #[must_use]
    pub fn store(&self) -> &ListStore {
        &self.store
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Create a list over HTTP and return the response JSON.
pub async fn create_list(
    client: &reqwest::Client,
    server: &TestServer,
    name: &str,
    description: &str,
) -> serde_json::Value {
    let resp = client
        .put(server.url("/lists/add"))
        .json(&serde_json::json!({"name": name, "description": description}))
        .send()
        .await
        .expect("create list request should complete");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    resp.json().await.expect("create list returns JSON")
}
