use std::net::SocketAddr;
use std::thread::JoinHandle;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::Collection;

/// json-server compatible HTTP service over one in-memory collection.
pub struct JsonServer {
    config: ServerConfig,
    collection: Collection,
}

impl JsonServer {
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        if config.collection.trim_matches('/').is_empty() {
            return Err(ServerError::Config("collection name must not be empty".into()));
        }
        Ok(Self {
            config,
            collection: Collection::new(),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(&self.config.collection, self.collection.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            "json-server listening on {} (collection: /{})",
            listener.local_addr()?,
            self.config.collection.trim_matches('/')
        );
        axum::serve(listener, self.router())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }

    /// Serve on a dedicated thread with its own runtime.
    ///
    /// The listener is bound before this returns, so the address is
    /// immediately connectable. Blocking HTTP clients can be driven from the
    /// calling thread. The server stops when the handle is dropped.
    pub fn spawn_background(self) -> ServerResult<BackgroundServer> {
        let listener = std::net::TcpListener::bind(self.config.bind_addr)?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let collection = self.config.collection.trim_matches('/').to_string();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = self.router();

        let thread = std::thread::Builder::new()
            .name("demo-jsonserver".into())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = match TcpListener::from_std(listener) {
                        Ok(l) => l,
                        Err(e) => {
                            tracing::error!("json-server listener setup failed: {e}");
                            return;
                        }
                    };
                    let shutdown = async move {
                        let _ = shutdown_rx.await;
                    };
                    if let Err(e) = axum::serve(listener, app)
                        .with_graceful_shutdown(shutdown)
                        .await
                    {
                        tracing::error!("json-server stopped: {e}");
                    }
                });
            })?;

        tracing::info!("json-server listening on {addr} (collection: /{collection})");
        Ok(BackgroundServer {
            addr,
            collection,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }
}

/// A [`JsonServer`] running on a background thread.
pub struct BackgroundServer {
    addr: SocketAddr,
    collection: String,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl BackgroundServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the collection, e.g. `http://127.0.0.1:39213/posts`.
    pub fn collection_url(&self) -> String {
        format!("http://{}/{}", self.addr, self.collection)
    }

    /// Stop the server and wait for its thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for BackgroundServer {
    fn drop(&mut self) {
        self.stop();
    }
}
