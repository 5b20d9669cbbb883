// Port for the best effort side channel notified after a successful append.
//
// Responsibilities
// - Receive the appended events, in append order, once they are durable.
//
// Boundaries
// - A failed publish never undoes or fails the append. The event store logs it and moves on.

use crate::shared::core::event::DomainEvent;
use async_trait::async_trait;

#[async_trait]
pub trait EventPublisher<Event: DomainEvent>: Send + Sync {
    async fn publish(&self, events: &[Event]) -> anyhow::Result<()>;
}

pub mod handler_registry;
pub mod in_memory;
