use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::Collection;

/// Build the axum router serving `collection` under `/{name}`.
pub fn build_router(name: &str, collection: Collection) -> Router {
    let name = name.trim_matches('/');
    Router::new()
        .route("/health", get(handler::health_handler))
        .route(&format!("/{name}"), post(handler::create_handler))
        .route(
            &format!("/{name}/:id"),
            get(handler::read_handler)
                .put(handler::update_handler)
                .delete(handler::delete_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(collection)
}
