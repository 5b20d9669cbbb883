// Repository: loads aggregates by replaying their stream and saves their pending events.
//
// Responsibilities
// - Build a blank state through the AggregateFactory, then replay history into it.
// - Derive the expected version from the aggregate's bookkeeping and append its
//   uncommitted events through the event store.
// - Clear the uncommitted events only after the store confirmed the append.

use crate::shared::core::aggregate::{AggregateRoot, AggregateState};
use crate::shared::core::aggregate_factory::{AggregateConstructionError, AggregateFactory};
use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::{AggregateIdentity, InvalidIdentity};
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Construction(#[from] AggregateConstructionError),

    #[error(transparent)]
    InvalidIdentity(#[from] InvalidIdentity),

    #[error(transparent)]
    Store(#[from] EventStoreError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub struct Repository<Event: DomainEvent, F> {
    event_store: Arc<dyn EventStore<Event>>,
    factory: Arc<F>,
}

impl<Event: DomainEvent, F> Clone for Repository<Event, F> {
    fn clone(&self) -> Self {
        Self {
            event_store: self.event_store.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<Event, F> Repository<Event, F>
where
    Event: DomainEvent,
    F: AggregateFactory,
{
    pub fn new(event_store: Arc<dyn EventStore<Event>>, factory: Arc<F>) -> Self {
        Self {
            event_store,
            factory,
        }
    }

    pub async fn get_by_id<S>(&self, id: &S::Id) -> Result<AggregateRoot<S>, RepositoryError>
    where
        S: AggregateState<Event = Event>,
    {
        self.get_by_id_at(id, None).await
    }

    /// Loads the aggregate as it was at `version`. Saving it afterwards appends against that
    /// version, so anything committed since is run through conflict detection.
    #[tracing::instrument(skip(self), fields(aggregate = <S::Id as AggregateIdentity>::TAG))]
    pub async fn get_by_id_at<S>(
        &self,
        id: &S::Id,
        version: Option<u64>,
    ) -> Result<AggregateRoot<S>, RepositoryError>
    where
        S: AggregateState<Event = Event>,
    {
        let aggregate_id = id.aggregate_id()?;
        let state = self.factory.create::<S>()?;
        let stream = self
            .event_store
            .get_event_stream_for(&aggregate_id, version)
            .await?;

        let mut aggregate = AggregateRoot::new(id.clone(), state);
        aggregate.load_from(stream.events);
        Ok(aggregate)
    }

    /// Returns the stream version after the save, which is ahead of the aggregate's own
    /// version when events committed by others were merged in.
    #[tracing::instrument(skip(self, aggregate), fields(aggregate = <S::Id as AggregateIdentity>::TAG))]
    pub async fn save<S>(&self, aggregate: &mut AggregateRoot<S>) -> Result<u64, RepositoryError>
    where
        S: AggregateState<Event = Event>,
    {
        let aggregate_id = aggregate.id().aggregate_id()?;
        let expected_version = aggregate.committed_version().ok_or_else(|| {
            RepositoryError::InvalidArgument(format!(
                "{aggregate_id} has more uncommitted events than its version"
            ))
        })?;

        let version = self
            .event_store
            .append_events_to_stream(
                &aggregate_id,
                expected_version,
                aggregate.uncommitted_events(),
            )
            .await?;
        aggregate.mark_as_committed();
        Ok(version)
    }
}
