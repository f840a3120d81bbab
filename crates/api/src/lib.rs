//! # recurslot API
//!
//! HTTP surface of the recurring availability scheduler: an on-demand
//! trigger for the window maintainer, its statistics, and materialization of
//! newly created or edited recurrence templates.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into [`WindowMaintainer`] calls
//! - **Middleware**: Error mapping for domain and middleware failures
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework; storage is reached only through
//! the slot store held by the maintainer.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use recurslot_scheduler::WindowMaintainer;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub maintainer: WindowMaintainer,
}

impl ApiState {
    pub fn new(maintainer: WindowMaintainer) -> Self {
        Self { maintainer }
    }
}

/// Builds the application router.
///
/// `request_timeout` bounds every route except the maintenance trigger,
/// which carries the scheduler's own run timeout.
pub fn app(state: Arc<ApiState>, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::templates::routes())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(
                    middleware::error_handling::handle_middleware_error,
                ))
                .timeout(request_timeout),
        )
        .merge(routes::maintenance::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server with the provided configuration and state
///
/// # Example
///
/// ```no_run
/// # async fn example(maintainer: recurslot_scheduler::WindowMaintainer) -> eyre::Result<()> {
/// let config = recurslot_api::config::ApiConfig::from_env()?;
/// recurslot_api::start_server(config, recurslot_api::ApiState::new(maintainer)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: ApiState) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(Arc::new(state), config.request_timeout());

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
