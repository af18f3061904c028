// src/routes/health.rs
//! API health check endpoint.
//!
//! Mounts the `/health` route used by container orchestrators (e.g., Docker,
//! Kubernetes) and CI pipelines to verify that the service is running and
//! able to respond to HTTP requests. It follows the Explicit Module Boundary
//! Pattern (EMBP):
//! - Internal to this file: wiring of the health use case through `httpx`
//! - Exports to the gateway (`mod.rs`): a subrouter containing `/health`
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::httpx::{self, Context, DefaultRequest, Options};
use crate::logger::Logger;
use crate::use_case::health::{Health, UseCase};

/// Create a subrouter containing the `/health` route.
///
/// The use case answers `{"message":"OK"}` with `200 OK`. The router is
/// generic over the application state so it merges cleanly with the gateway.
///
/// # Type Parameters
/// - `S`: Application state type shared by all routes in the gateway.
pub fn router<S>(logger: Logger) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // ---
    let use_case = Arc::new(Health::new(logger.clone()));
    let handler = httpx::handle(
        move |ctx: Context, request: DefaultRequest| {
            let use_case = Arc::clone(&use_case);
            async move { use_case.health(ctx, request).await }
        },
        Options::default().with_logger(logger),
    );

    Router::new().route("/health", get(handler))
}
