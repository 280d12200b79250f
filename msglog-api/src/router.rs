//! Router assembly: message routes, the secret key gate and request tracing.

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use middleware::{request_logging, require_secret_key, SecretKeyConfig};
use storage::MessageStore;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Limits applied to simulation requests.
#[derive(Debug, Clone, Copy)]
pub struct SimulationLimits {
    pub max_count: u32,
    pub window: chrono::Duration,
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub simulation: SimulationLimits,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>, simulation: SimulationLimits) -> Self {
        Self { store, simulation }
    }
}

/// Builds the application router. Every `/messages` route, `simulate` included, sits behind
/// the secret key gate; unmatched paths fall through to a plain 404.
pub fn create_router(state: AppState, auth: Arc<SecretKeyConfig>) -> Router {
    Router::new()
        .route("/messages", get(handlers::list_messages))
        .route("/messages/", get(handlers::list_messages))
        .route("/messages/count", get(handlers::count_messages))
        .route("/messages/sorted/size", get(handlers::sorted_by_size))
        .route("/messages/sorted/count", get(handlers::sorted_by_count))
        .route("/messages/simulate", get(handlers::simulate_messages))
        .route_layer(from_fn_with_state(auth, require_secret_key))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(request_logging)),
        )
        .with_state(state)
}
