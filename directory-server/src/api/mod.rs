//! API routes
//!
//! - [`health`] - liveness check
//! - [`employees`] - employee management and authentication

pub mod employees;
pub mod extract;
pub mod health;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use http::{HeaderValue, Method, header};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Face samples travel as serialized images.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// All routes, no middleware
pub fn routes() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
}

/// Fully configured application, used by the HTTP server and by tests
pub fn build_router(state: ServerState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
