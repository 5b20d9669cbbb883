// Application services: execute commands against aggregates.
//
// Responsibilities
// - Load the aggregate, at the command's expected version when it names one. A stream that
//   never reached that version is a ConcurrencyConflict.
// - Run the pure decider on its state. Rejections go to the DomainErrorRouter and back to the
//   caller as ApplicationError::Domain.
// - Apply the decided events and save. Concurrency conflicts come back unchanged inside
//   ApplicationError::Repository.

use crate::shared::application::command::Command;
use crate::shared::application::domain_error_router::DomainErrorRouter;
use crate::shared::core::aggregate::AggregateState;
use crate::shared::core::aggregate_factory::AggregateFactory;
use crate::shared::core::domain_error::DomainError;
use crate::shared::core::identity::AggregateIdentity;
use crate::shared::infrastructure::event_store::EventStoreError;
use crate::shared::infrastructure::repository::{Repository, RepositoryError};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("domain rejected: {0}")]
    Domain(DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApplicationError {
    /// (expected, actual) when the command lost an optimistic concurrency race.
    pub fn as_concurrency_conflict(&self) -> Option<(u64, u64)> {
        match self {
            ApplicationError::Repository(RepositoryError::Store(
                EventStoreError::ConcurrencyConflict {
                    expected, actual, ..
                },
            )) => Some((*expected, *actual)),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ApplicationService<C: Command>: Send + Sync {
    /// Tag of the aggregate kind whose commands this service executes.
    fn aggregate_tag(&self) -> &'static str;

    /// Executes `command` and returns the stream version after it was saved.
    async fn execute(&self, command: C) -> Result<u64, ApplicationError>;
}

/// Load, decide, apply, save. Returns the stream version after the save.
pub async fn update_aggregate<S, F, D>(
    repository: &Repository<S::Event, F>,
    router: &dyn DomainErrorRouter,
    id: &S::Id,
    expected_version: Option<u64>,
    decide: D,
) -> Result<u64, ApplicationError>
where
    S: AggregateState,
    F: AggregateFactory,
    D: FnOnce(&S) -> Result<Vec<S::Event>, DomainError> + Send,
{
    let mut aggregate = repository.get_by_id_at::<S>(id, expected_version).await?;
    if let Some(expected) = expected_version {
        if aggregate.version() != expected {
            return Err(RepositoryError::Store(EventStoreError::ConcurrencyConflict {
                aggregate_id: id.aggregate_id().map_err(RepositoryError::from)?,
                expected,
                actual: aggregate.version(),
            })
            .into());
        }
    }
    let events = match decide(aggregate.state()) {
        Ok(events) => events,
        Err(error) => {
            router.route(&error).await;
            return Err(ApplicationError::Domain(error));
        }
    };
    aggregate.apply_changes(events);
    Ok(repository.save(&mut aggregate).await?)
}
