//! Health check use case.
//!
//! Used by container orchestrators and CI pipelines to verify that the
//! service is up and answering. It deliberately touches no external service.
use std::future::Future;

use crate::httpx::{Context, DefaultRequest, DefaultResponse};
use crate::logger::Logger;

// ---

/// Liveness check.
pub trait UseCase: Send + Sync + 'static {
    fn health(
        &self,
        ctx: Context,
        request: DefaultRequest,
    ) -> impl Future<Output = anyhow::Result<DefaultResponse>> + Send;
}

/// Default [`UseCase`]: always answers `OK`.
#[derive(Debug, Clone, Default)]
pub struct Health {
    logger: Logger,
}

impl Health {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl UseCase for Health {
    async fn health(&self, ctx: Context, _request: DefaultRequest) -> anyhow::Result<DefaultResponse> {
        // ---
        self.logger
            .in_scope(|| tracing::info!(request_id = %ctx.id(), "health check"));

        Ok(DefaultResponse {
            message: "OK".to_string(),
        })
    }
}
