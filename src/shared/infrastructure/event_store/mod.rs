// Event store port: versioned reads and optimistic appends per aggregate stream.
//
// Purpose
// - Give repositories one entry point for loading history and appending new events.
//
// Versioning
// - Versions are zero based counts. A stream with N events has version N, and an append
//   expecting version N is accepted when nobody appended since.

use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::AggregateId;
use crate::shared::infrastructure::event_persistence::PersistenceError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error(
        "concurrency conflict on {aggregate_id}: expected version {expected}, actual version {actual}"
    )]
    ConcurrencyConflict {
        aggregate_id: AggregateId,
        expected: u64,
        actual: u64,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Events of one stream as loaded. stream_version is the number of events returned, which is
/// lower than the latest version when the read was trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStream<Event> {
    pub stream_version: u64,
    pub events: Vec<Event>,
}

/// append_events_to_stream returns the stream version after the append. An empty append
/// touches nothing and returns expected_version.
#[async_trait]
pub trait EventStore<Event: DomainEvent>: Send + Sync {
    async fn get_event_stream_for(
        &self,
        aggregate_id: &AggregateId,
        version: Option<u64>,
    ) -> Result<EventStream<Event>, EventStoreError>;

    async fn append_events_to_stream(
        &self,
        aggregate_id: &AggregateId,
        expected_version: u64,
        events: &[Event],
    ) -> Result<u64, EventStoreError>;
}

pub mod optimistic;
