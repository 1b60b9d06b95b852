//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `services.rs`: product store selection and construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and query-string parsing
//! - `errors.rs`: consistent `{"error": ...}` responses

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::SharedStore;

/// Build the full HTTP router around an already constructed store.
pub fn build_app(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(store)),
        )
}
