// Destination for domain errors raised while executing commands.
//
// Purpose
// - Give rejected commands a side channel besides the caller: logs in production, a list in
//   tests.

use crate::shared::core::domain_error::DomainError;
use async_trait::async_trait;
use tokio::sync::Mutex;

#[async_trait]
pub trait DomainErrorRouter: Send + Sync {
    async fn route(&self, error: &DomainError);
}

#[derive(Debug, Default)]
pub struct TracingDomainErrorRouter;

#[async_trait]
impl DomainErrorRouter for TracingDomainErrorRouter {
    async fn route(&self, error: &DomainError) {
        tracing::info!(name = %error.name, message = %error.message, "command rejected");
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDomainErrorRouter {
    routed: Mutex<Vec<DomainError>>,
}

impl InMemoryDomainErrorRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn routed(&self) -> Vec<DomainError> {
        self.routed.lock().await.clone()
    }
}

#[async_trait]
impl DomainErrorRouter for InMemoryDomainErrorRouter {
    async fn route(&self, error: &DomainError) {
        self.routed.lock().await.push(error.clone());
    }
}
