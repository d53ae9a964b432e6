//! In-memory json-server for the demo provider.
//!
//! Serves one collection of JSON objects over REST, assigning sequential
//! numeric ids on create the way [json-server] does. It backs the
//! `JsonServerClient` integration tests and `demo serve`.
//!
//! [json-server]: https://github.com/typicode/json-server

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use server::{BackgroundServer, JsonServer};
pub use state::Collection;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn health_endpoint() {
        let app = router::build_router("posts", Collection::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
