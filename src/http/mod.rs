//! HTTP binding for the account service
//!
//! Exposes the seven account operations as JSON routes under
//! `/api/accounts`. Creation answers 201, reads and updates 200, deletion 204
//! with an empty body.

pub mod error;
pub mod handlers;

use crate::core::{AccountService, AccountStore};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use error::ErrorBody;

/// Build the account router around `service`
pub fn router<S: AccountStore + 'static>(service: AccountService<S>) -> Router {
    Router::new()
        .route(
            "/api/accounts",
            get(handlers::list_accounts::<S>).post(handlers::create_account::<S>),
        )
        .route(
            "/api/accounts/:id",
            get(handlers::get_account::<S>)
                .put(handlers::update_account::<S>)
                .delete(handlers::delete_account::<S>),
        )
        .route(
            "/api/accounts/display-name/:name",
            get(handlers::get_account_by_display_name::<S>),
        )
        .route(
            "/api/accounts/contact/:address",
            get(handlers::get_account_by_contact_address::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// HTTP server for the account routes
pub struct AccountServer<S> {
    service: AccountService<S>,
    bind_addr: SocketAddr,
}

impl<S: AccountStore + 'static> AccountServer<S> {
    pub fn new(service: AccountService<S>, bind_addr: SocketAddr) -> Self {
        Self { service, bind_addr }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.bind_addr).await?;
        info!(addr = %listener.local_addr()?, "account server listening");

        axum::serve(listener, router(self.service))
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server just runs until killed
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}
