mod liveness;

use std::net::SocketAddr;

use axum::{Router, extract::DefaultBodyLimit};
use lingo_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the chunking tokenizer cannot be loaded. TTS and
    /// embeddings providers that fail to initialize are logged and skipped
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let chunker_state = lingo_chunker::build_server(config)?;
        let tts_state = tts::build_server(config);
        let embeddings_state = lingo_embeddings::build_server(config);

        let mut app = liveness::router(&config.server.liveness_message);

        // TTS routes
        app = app.merge(tts::endpoint_router().with_state(tts_state));

        // Embeddings routes
        app = app.merge(lingo_embeddings::endpoint_router().with_state(embeddings_state));

        // Chunking routes
        app = app.merge(lingo_chunker::endpoint_router().with_state(chunker_state));

        app = app
            .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
            .layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address: config.server.listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the configured listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
