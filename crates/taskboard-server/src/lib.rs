//! Taskboard Server - JSON endpoints for the page controllers
//!
//! Serves the current user's notifications and the user-name lookup used by
//! autocomplete, and records task activity as notifications.

pub mod activity;
pub mod config;
pub mod http;
pub mod session;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use store::{Store, StoreError};
use taskboard_core::ConfigError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Shared application state
pub struct AppState {
    pub store: RwLock<Store>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// State with the configured users registered
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let store = Store::with_users(config.users.iter().map(String::as_str))?;
        tracing::info!("Registered {} users", store.user_count());
        Ok(Self::with_store(store))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get_notifications", get(http::get_notifications))
        .route("/get_users", get(http::get_users))
        .route("/activity", post(http::record_activity))
        // Middleware
        .layer(middleware::from_fn(session::no_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server on `addr`
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state).await
}

/// Serve on an already bound listener
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    let app = create_router(state);
    tracing::info!("Taskboard server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
