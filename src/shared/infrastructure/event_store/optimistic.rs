// Event store with optimistic concurrency and conflict resolving appends.
//
// Responsibilities
// - Append when the stream is still at the expected version, then publish.
// - When another writer got there first, ask the conflict detector whether the events it
//   committed are compatible with ours. Compatible events are folded in by moving the
//   expected version forward and checking again; anything else is a ConcurrencyConflict.
//
// Invariants
// - All appends to one stream through this store run under that stream's lock, from the
//   version check through publish.
// - The expected version only moves forward, by the number of events committed since it.
// - On a mismatch the actual version is taken from the length of the re-read stream, so the
//   version and the committed events come from the same snapshot.

use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::AggregateId;
use crate::shared::infrastructure::conflict_detector::ConflictDetector;
use crate::shared::infrastructure::event_persistence::EventPersistence;
use crate::shared::infrastructure::event_publisher::EventPublisher;
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError, EventStream};
use crate::shared::infrastructure::stream_locks::StreamLocks;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct OptimisticEventStore<Event: DomainEvent> {
    persistence: Arc<dyn EventPersistence<Event>>,
    publisher: Arc<dyn EventPublisher<Event>>,
    conflict_detector: Arc<dyn ConflictDetector<Event>>,
    stream_locks: StreamLocks,
}

impl<Event: DomainEvent> OptimisticEventStore<Event> {
    pub fn new(
        persistence: Arc<dyn EventPersistence<Event>>,
        publisher: Arc<dyn EventPublisher<Event>>,
        conflict_detector: Arc<dyn ConflictDetector<Event>>,
    ) -> Self {
        Self {
            persistence,
            publisher,
            conflict_detector,
            stream_locks: StreamLocks::new(),
        }
    }

    fn conflict(aggregate_id: &AggregateId, expected: u64, actual: u64) -> EventStoreError {
        EventStoreError::ConcurrencyConflict {
            aggregate_id: aggregate_id.clone(),
            expected,
            actual,
        }
    }
}

#[async_trait::async_trait]
impl<Event: DomainEvent> EventStore<Event> for OptimisticEventStore<Event> {
    #[tracing::instrument(skip(self), fields(aggregate_id = %aggregate_id))]
    async fn get_event_stream_for(
        &self,
        aggregate_id: &AggregateId,
        version: Option<u64>,
    ) -> Result<EventStream<Event>, EventStoreError> {
        let events = self.persistence.get_events_for(aggregate_id, version).await?;
        Ok(EventStream {
            stream_version: events.len() as u64,
            events,
        })
    }

    #[tracing::instrument(
        skip(self, events),
        fields(aggregate_id = %aggregate_id, count = events.len())
    )]
    async fn append_events_to_stream(
        &self,
        aggregate_id: &AggregateId,
        expected_version: u64,
        events: &[Event],
    ) -> Result<u64, EventStoreError> {
        if events.is_empty() {
            return Ok(expected_version);
        }

        let _guard = self.stream_locks.acquire(aggregate_id).await;
        let mut expected = expected_version;
        loop {
            let actual = self.persistence.get_version_for(aggregate_id).await?;
            if actual != expected {
                let history = self.persistence.get_events_for(aggregate_id, None).await?;
                let actual = history.len() as u64;
                if actual < expected {
                    debug!(expected, actual, "expected version is ahead of the stream");
                    return Err(Self::conflict(aggregate_id, expected, actual));
                }
                if actual > expected {
                    let committed = &history[expected as usize..];
                    if self.conflict_detector.has_conflict(committed, events) {
                        debug!(expected, actual, "committed events conflict");
                        return Err(Self::conflict(aggregate_id, expected, actual));
                    }
                    debug!(
                        expected,
                        actual,
                        merged = committed.len(),
                        "merging non conflicting committed events"
                    );
                    expected = actual;
                    continue;
                }
            }

            self.persistence.append_events(aggregate_id, events).await?;
            let version = expected + events.len() as u64;
            debug!(version, "events appended");
            if let Err(error) = self.publisher.publish(events).await {
                warn!(error = %format!("{error:#}"), "publishing appended events failed");
            }
            return Ok(version);
        }
    }
}
