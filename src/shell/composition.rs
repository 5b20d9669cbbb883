// Wiring of the example bounded context.

use crate::modules::examples::application_service::ExampleApplicationService;
use crate::modules::examples::commands::ExampleCommand;
use crate::modules::examples::core::conflict_rules::example_conflict_detector;
use crate::modules::examples::core::events::ExampleEvent;
use crate::modules::examples::core::state::ExampleState;
use crate::shared::application::domain_error_router::TracingDomainErrorRouter;
use crate::shared::application::service_host::{ApplicationServiceHost, HostError};
use crate::shared::core::aggregate_factory::RegistryAggregateFactory;
use crate::shared::infrastructure::conflict_detector::ConflictPolicy;
use crate::shared::infrastructure::event_persistence::EventPersistence;
use crate::shared::infrastructure::event_persistence::file::FileEventPersistence;
use crate::shared::infrastructure::event_persistence::in_memory::InMemoryEventPersistence;
use crate::shared::infrastructure::event_publisher::handler_registry::EventHandlerRegistry;
use crate::shared::infrastructure::event_store::optimistic::OptimisticEventStore;
use crate::shared::infrastructure::repository::Repository;
use crate::shell::config::{Config, Storage};
use crate::shell::state::AppState;
use std::sync::Arc;

pub struct Composition {
    pub state: AppState,
    pub host: ApplicationServiceHost<ExampleCommand>,
}

pub async fn compose_from_config(config: &Config) -> anyhow::Result<Composition> {
    let persistence: Arc<dyn EventPersistence<ExampleEvent>> = match &config.storage {
        Storage::Memory => Arc::new(InMemoryEventPersistence::new()),
        Storage::File(dir) => Arc::new(FileEventPersistence::open(dir.clone()).await?),
    };
    tracing::info!(storage = ?config.storage, policy = ?config.conflict_policy, "event store configured");
    Ok(compose(persistence, config.conflict_policy)?)
}

pub fn compose(
    persistence: Arc<dyn EventPersistence<ExampleEvent>>,
    conflict_policy: ConflictPolicy,
) -> Result<Composition, HostError> {
    let examples = example_service(persistence, conflict_policy);
    let mut host = ApplicationServiceHost::new();
    host.load_service(examples.clone())?;

    Ok(Composition {
        state: AppState {
            examples,
            commands: host.queue(),
        },
        host,
    })
}

/// Memory backed state with the default conflict policy. Nothing drains its command queue.
#[cfg(test)]
pub fn in_memory_state() -> AppState {
    let (commands, _reader) = crate::shared::application::command_queue::CommandQueue::new();
    AppState {
        examples: example_service(
            Arc::new(InMemoryEventPersistence::new()),
            ConflictPolicy::default(),
        ),
        commands,
    }
}

fn example_service(
    persistence: Arc<dyn EventPersistence<ExampleEvent>>,
    conflict_policy: ConflictPolicy,
) -> Arc<ExampleApplicationService<RegistryAggregateFactory>> {
    let event_store = Arc::new(OptimisticEventStore::new(
        persistence,
        Arc::new(logging_publisher()),
        Arc::new(example_conflict_detector(conflict_policy)),
    ));

    let mut factory = RegistryAggregateFactory::new();
    factory.register_default::<ExampleState>();

    Arc::new(ExampleApplicationService::new(
        Repository::new(event_store, Arc::new(factory)),
        Arc::new(TracingDomainErrorRouter),
    ))
}

fn logging_publisher() -> EventHandlerRegistry<ExampleEvent> {
    let mut registry = EventHandlerRegistry::<ExampleEvent>::new();
    registry
        .register(ExampleEvent::OPENED, |event| {
            tracing::info!(example = %event.example_id(), "example opened");
            Ok(())
        })
        .register(ExampleEvent::COUNTER_INCREMENTED, |event| {
            tracing::debug!(example = %event.example_id(), ?event, "counter incremented");
            Ok(())
        });
    registry
}
