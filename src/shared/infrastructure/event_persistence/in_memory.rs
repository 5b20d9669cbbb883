// In memory implementation of the EventPersistence port.
//
// Purpose
// - Support tests and local development without a database.
//
// Responsibilities
// - Store serialized payloads per stream, so every read goes through the serializer like a
//   durable adapter would.
// - Simulate an unreachable store (toggle_offline) and a deleted stream (tombstone).

use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::AggregateId;
use crate::shared::infrastructure::event_persistence::{
    EventPersistence, PersistenceError, read_limit,
};
use crate::shared::infrastructure::event_serializer::EventSerializer;
use crate::shared::infrastructure::event_serializer::json::JsonEventSerializer;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct InMemoryEventPersistence<Event: DomainEvent> {
    inner: RwLock<HashMap<AggregateId, Vec<Vec<u8>>>>,
    tombstones: RwLock<HashSet<AggregateId>>,
    serializer: Arc<dyn EventSerializer<Event>>,
    is_offline: bool,
}

impl<Event: DomainEvent> InMemoryEventPersistence<Event> {
    pub fn new() -> Self {
        Self::with_serializer(Arc::new(JsonEventSerializer::new()))
    }

    pub fn with_serializer(serializer: Arc<dyn EventSerializer<Event>>) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            tombstones: RwLock::new(HashSet::new()),
            serializer,
            is_offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Marks the stream as deleted by the backing store. Later access fails with AggregateDeleted.
    pub async fn tombstone(&self, aggregate_id: &AggregateId) {
        self.tombstones.write().await.insert(aggregate_id.clone());
    }

    async fn ensure_accessible(&self, aggregate_id: &AggregateId) -> Result<(), PersistenceError> {
        if self.is_offline {
            return Err(PersistenceError::StoreUnreachable(
                "Event persistence offline".into(),
            ));
        }
        if self.tombstones.read().await.contains(aggregate_id) {
            return Err(PersistenceError::AggregateDeleted(aggregate_id.clone()));
        }
        Ok(())
    }
}

impl<Event: DomainEvent> Default for InMemoryEventPersistence<Event> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<Event: DomainEvent> EventPersistence<Event> for InMemoryEventPersistence<Event> {
    async fn append_events(
        &self,
        aggregate_id: &AggregateId,
        events: &[Event],
    ) -> Result<(), PersistenceError> {
        self.ensure_accessible(aggregate_id).await?;
        let payloads = events
            .iter()
            .map(|e| self.serializer.serialize(e))
            .collect::<Result<Vec<_>, _>>()?;
        let mut guard = self.inner.write().await;
        guard
            .entry(aggregate_id.clone())
            .or_default()
            .extend(payloads);
        Ok(())
    }

    async fn get_events_for(
        &self,
        aggregate_id: &AggregateId,
        max_version: Option<u64>,
    ) -> Result<Vec<Event>, PersistenceError> {
        self.ensure_accessible(aggregate_id).await?;
        let guard = self.inner.read().await;
        let Some(payloads) = guard.get(aggregate_id) else {
            return Ok(Vec::new());
        };
        payloads
            .iter()
            .take(read_limit(max_version))
            .map(|p| self.serializer.deserialize(p).map_err(PersistenceError::from))
            .collect()
    }

    async fn get_version_for(&self, aggregate_id: &AggregateId) -> Result<u64, PersistenceError> {
        self.ensure_accessible(aggregate_id).await?;
        let guard = self.inner.read().await;
        Ok(guard.get(aggregate_id).map(|p| p.len()).unwrap_or(0) as u64)
    }
}
