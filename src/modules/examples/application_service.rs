// Application service of the example aggregate.
//
// Responsibilities
// - Route each ExampleCommand to its decider and save the outcome through the repository.

use crate::modules::examples::commands::ExampleCommand;
use crate::modules::examples::core::events::ExampleEvent;
use crate::modules::examples::core::identity::ExampleId;
use crate::modules::examples::core::state::ExampleState;
use crate::modules::examples::use_cases::increment_counter::decide::decide_increment;
use crate::modules::examples::use_cases::open_example::decide::decide_open;
use crate::shared::application::application_service::{
    ApplicationError, ApplicationService, update_aggregate,
};
use crate::shared::application::command::Command;
use crate::shared::application::domain_error_router::DomainErrorRouter;
use crate::shared::core::aggregate::AggregateRoot;
use crate::shared::core::aggregate_factory::AggregateFactory;
use crate::shared::core::identity::AggregateIdentity;
use crate::shared::infrastructure::repository::Repository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ExampleApplicationService<F: AggregateFactory> {
    repository: Repository<ExampleEvent, F>,
    domain_errors: Arc<dyn DomainErrorRouter>,
}

impl<F: AggregateFactory> ExampleApplicationService<F> {
    pub fn new(
        repository: Repository<ExampleEvent, F>,
        domain_errors: Arc<dyn DomainErrorRouter>,
    ) -> Self {
        Self {
            repository,
            domain_errors,
        }
    }

    /// Latest state of the example, blank if it was never written.
    pub async fn load(&self, id: ExampleId) -> Result<AggregateRoot<ExampleState>, ApplicationError> {
        Ok(self.repository.get_by_id::<ExampleState>(&id).await?)
    }
}

#[async_trait]
impl<F: AggregateFactory> ApplicationService<ExampleCommand> for ExampleApplicationService<F> {
    fn aggregate_tag(&self) -> &'static str {
        ExampleId::TAG
    }

    #[tracing::instrument(skip(self), fields(example = %command.example_id()))]
    async fn execute(&self, command: ExampleCommand) -> Result<u64, ApplicationError> {
        let id = command.example_id();
        let expected_version = command.expected_version();
        match command {
            ExampleCommand::OpenExample(open) => {
                update_aggregate::<ExampleState, _, _>(
                    &self.repository,
                    self.domain_errors.as_ref(),
                    &id,
                    expected_version,
                    move |state| decide_open(state, open),
                )
                .await
            }
            ExampleCommand::IncrementCounter(increment) => {
                update_aggregate::<ExampleState, _, _>(
                    &self.repository,
                    self.domain_errors.as_ref(),
                    &id,
                    expected_version,
                    move |state| decide_increment(state, increment),
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod example_application_service_tests {
    use super::*;
    use crate::modules::examples::core::conflict_rules::example_conflict_detector;
    use crate::modules::examples::use_cases::increment_counter::decide::EXAMPLE_NOT_OPENED;
    use crate::modules::examples::use_cases::open_example::decide::EXAMPLE_ALREADY_OPENED;
    use crate::shared::application::domain_error_router::InMemoryDomainErrorRouter;
    use crate::shared::core::aggregate_factory::RegistryAggregateFactory;
    use crate::shared::infrastructure::conflict_detector::ConflictPolicy;
    use crate::shared::infrastructure::event_persistence::PersistenceError;
    use crate::shared::infrastructure::event_persistence::in_memory::InMemoryEventPersistence;
    use crate::shared::infrastructure::event_publisher::in_memory::InMemoryEventPublisher;
    use crate::shared::infrastructure::event_store::EventStoreError;
    use crate::shared::infrastructure::event_store::optimistic::OptimisticEventStore;
    use crate::shared::infrastructure::repository::RepositoryError;
    use crate::tests::fixtures::commands::increment_counter::IncrementCounterBuilder;
    use crate::tests::fixtures::commands::open_example::OpenExampleBuilder;
    use rstest::{fixture, rstest};
    use tokio::join;

    type BeforeEachReturn = (
        ExampleApplicationService<RegistryAggregateFactory>,
        Arc<InMemoryDomainErrorRouter>,
    );

    fn make_service(persistence: InMemoryEventPersistence<ExampleEvent>) -> BeforeEachReturn {
        let store = Arc::new(OptimisticEventStore::new(
            Arc::new(persistence),
            Arc::new(InMemoryEventPublisher::new()),
            Arc::new(example_conflict_detector(ConflictPolicy::AssumeConflict)),
        ));
        let mut factory = RegistryAggregateFactory::new();
        factory.register_default::<ExampleState>();
        let router = Arc::new(InMemoryDomainErrorRouter::new());
        let service = ExampleApplicationService::new(
            Repository::new(store, Arc::new(factory)),
            router.clone(),
        );
        (service, router)
    }

    #[fixture]
    fn before_each() -> BeforeEachReturn {
        make_service(InMemoryEventPersistence::new())
    }

    fn open() -> ExampleCommand {
        ExampleCommand::OpenExample(OpenExampleBuilder::new().build())
    }

    fn increment(counter: &str, expected_version: Option<u64>) -> ExampleCommand {
        ExampleCommand::IncrementCounter(
            IncrementCounterBuilder::new()
                .counter(counter)
                .expected_version(expected_version)
                .build(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_open_and_count(before_each: BeforeEachReturn) {
        let (service, router) = before_each;
        assert_eq!(service.execute(open()).await.unwrap(), 1);
        assert_eq!(service.execute(increment("visits", None)).await.unwrap(), 2);

        let example = service.load(ExampleId(1)).await.unwrap();
        assert!(example.state().is_opened());
        assert_eq!(example.state().counter("visits"), 1);
        assert!(router.routed().await.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_route_and_return_domain_errors(before_each: BeforeEachReturn) {
        let (service, router) = before_each;
        let result = service.execute(increment("visits", None)).await;
        match result {
            Err(ApplicationError::Domain(error)) => assert_eq!(error.name, EXAMPLE_NOT_OPENED),
            other => panic!("expected a domain error, got {other:?}"),
        }
        service.execute(open()).await.unwrap();
        assert!(service.execute(open()).await.is_err());

        let names: Vec<String> = router.routed().await.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec![EXAMPLE_NOT_OPENED, EXAMPLE_ALREADY_OPENED]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_merge_increments_decided_against_the_same_version(
        before_each: BeforeEachReturn,
    ) {
        let (service, _) = before_each;
        service.execute(open()).await.unwrap();
        service.execute(increment("b", Some(1))).await.unwrap();
        let version = service.execute(increment("a", Some(1))).await.unwrap();

        assert_eq!(version, 3);
        let example = service.load(ExampleId(1)).await.unwrap();
        assert_eq!(example.state().counter("a"), 1);
        assert_eq!(example.state().counter("b"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_conflict_for_a_stale_open(before_each: BeforeEachReturn) {
        let (service, _) = before_each;
        let stale_open = ExampleCommand::OpenExample(
            OpenExampleBuilder::new().expected_version(Some(0)).build(),
        );
        let (first, second) = join!(service.execute(stale_open.clone()), service.execute(stale_open));

        assert!(first.is_ok() ^ second.is_ok());
        let error = first.err().or(second.err()).unwrap();
        assert_eq!(error.as_concurrency_conflict(), Some((0, 1)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_expected_version_ahead_of_the_stream(
        before_each: BeforeEachReturn,
    ) {
        let (service, _) = before_each;
        service.execute(open()).await.unwrap();

        let result = service.execute(increment("visits", Some(5))).await;

        let error = result.expect_err("a version the stream never reached must conflict");
        assert_eq!(error.as_concurrency_conflict(), Some((5, 1)));
        let example = service.load(ExampleId(1)).await.unwrap();
        assert_eq!(example.version(), 1);
        assert_eq!(example.state().counter("visits"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_persistence_is_offline() {
        let mut persistence = InMemoryEventPersistence::new();
        persistence.toggle_offline();
        let (service, _) = make_service(persistence);
        let result = service.execute(open()).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Repository(RepositoryError::Store(
                EventStoreError::Persistence(PersistenceError::StoreUnreachable(_))
            )))
        ));
    }
}
