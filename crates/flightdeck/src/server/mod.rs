//! HTTP server for flightdeck.
//!
//! Exposes a [`FlightRepository`] over five routes:
//!
//! | Method | Path            | Success                        |
//! |--------|-----------------|--------------------------------|
//! | POST   | `/flights`      | 201, the stored record         |
//! | GET    | `/flights`      | 200, every record              |
//! | GET    | `/flights/{id}` | 200, the matched record        |
//! | PUT    | `/flights/{id}` | 200, the merged record         |
//! | DELETE | `/flights/{id}` | 200, `[removed record]`        |
//!
//! Lookups that match nothing answer 404 with the plain-text body
//! `Flight not found`.

mod body;
pub mod handlers;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use body::FlightBody;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::store::FlightRepository;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    repository: Arc<dyn FlightRepository>,
}

impl AppState {
    /// Create handler state backed by `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn FlightRepository>) -> Self {
        Self { repository }
    }

    /// The repository requests operate on.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn FlightRepository> {
        &self.repository
    }
}

/// Build the `/flights` router.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route(
            "/flights",
            get(handlers::list_flights).post(handlers::create_flight),
        )
        .route(
            "/flights/{id}",
            get(handlers::get_flight)
                .put(handlers::update_flight)
                .delete(handlers::delete_flight),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A bound, not yet running, HTTP server.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Bind the listener described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the address cannot be bound.
    pub async fn bind(config: &ServerConfig, repository: Arc<dyn FlightRepository>) -> Result<Self> {
        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        let router = router(AppState::new(repository), config.request_timeout());
        Ok(Self { listener, router })
    }

    /// The address the server is listening on.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be read.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails while accepting connections.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        info!("Flight app listening at http://{addr}");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server has been shut down");
        Ok(())
    }
}

/// Resolve when the process receives Ctrl-C.
///
/// Passed to [`Server::run`] by the binary.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {err}");
    }
    info!("Starting graceful shutdown...");
}
