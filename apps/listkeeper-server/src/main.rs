//! ListKeeper Server - lists and todos over HTTP.
//!
//! # Usage
//!
//! ```text
//! LISTKEEPER_LISTEN=0.0.0.0:4000 DATABASE_URL=sqlite://todo.db listkeeper-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LISTKEEPER_LISTEN` | `0.0.0.0:4000` | Bind address |
//! | `DATABASE_URL` | `sqlite://todo.db` | SQLite database, created if missing |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | Connection pool size |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use listkeeper_core::config::ListKeeperConfig;
use listkeeper_core::handler::ListKeeperCoreHandler;
use listkeeper_core::provider::ListKeeperProvider;
use listkeeper_core::store::ListStore;
use listkeeper_http::service::HEALTH_PATH;
use listkeeper_http::{ListKeeperHttpConfig, ListKeeperHttpService};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

type Service = ListKeeperHttpService<ListKeeperCoreHandler>;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: Service) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Address a local health probe should dial for the configured bind address.
fn probe_addr(listen: &str) -> String {
    listen.replace("0.0.0.0", "127.0.0.1")
}

/// Perform a health check by connecting to the server and requesting the health endpoint.
///
/// Succeeds only on a 200 response reporting a running store.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request =
        format!("GET {HEALTH_PATH} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

/// Wire store, provider, handler and HTTP service together.
fn build_service(store: ListStore) -> Service {
    let provider = ListKeeperProvider::new(store);
    let handler = ListKeeperCoreHandler::new(Arc::new(provider));
    ListKeeperHttpService::new(Arc::new(handler), ListKeeperHttpConfig::default())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ListKeeperConfig::from_env();

    // Handle --health-check flag for container health probes.
    if std::env::args().any(|a| a == "--health-check") {
        let healthy = run_health_check(&probe_addr(&config.listen)).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    let store = ListStore::open(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open store at {}", config.database_url))?;

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        database_url = %config.database_url,
        version = VERSION,
        "starting ListKeeper Server",
    );

    serve(listener, build_service(store)).await
}
