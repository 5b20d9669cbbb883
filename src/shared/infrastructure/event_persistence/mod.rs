// Port for durable, append only storage of events per aggregate.
//
// Responsibilities
// - append_events writes in call order and is atomic per aggregate id.
// - get_events_for returns the stream from the start, trimmed to max_version (None reads all).
//   An unknown aggregate yields an empty list, never an error.
// - get_version_for returns the committed event count, 0 for an unknown aggregate.
//
// Boundaries
// - No retries here. The event store owns the concurrency policy.

use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::AggregateId;
use crate::shared::infrastructure::event_serializer::SerializationError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("event store unreachable: {0}")]
    StoreUnreachable(String),

    #[error("aggregate {0} has been deleted")]
    AggregateDeleted(AggregateId),

    #[error("stream {stream} is corrupted: {reason}")]
    Corrupted { stream: String, reason: String },

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait EventPersistence<Event: DomainEvent>: Send + Sync {
    async fn append_events(
        &self,
        aggregate_id: &AggregateId,
        events: &[Event],
    ) -> Result<(), PersistenceError>;

    async fn get_events_for(
        &self,
        aggregate_id: &AggregateId,
        max_version: Option<u64>,
    ) -> Result<Vec<Event>, PersistenceError>;

    async fn get_version_for(&self, aggregate_id: &AggregateId) -> Result<u64, PersistenceError>;
}

/// Number of events to take for a read bounded by `max_version`.
pub(crate) fn read_limit(max_version: Option<u64>) -> usize {
    max_version
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(usize::MAX)
}

pub mod file;
pub mod in_memory;
