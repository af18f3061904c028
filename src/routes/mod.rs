use axum::Router;

use crate::logger::Logger;

mod health;

// ---

/// Build the top-level API router from all route modules.
pub fn router(logger: Logger) -> Router {
    // ---
    Router::new().merge(health::router(logger))
}
