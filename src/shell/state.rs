use crate::modules::examples::application_service::ExampleApplicationService;
use crate::modules::examples::commands::ExampleCommand;
use crate::shared::application::command_queue::CommandQueue;
use crate::shared::core::aggregate_factory::RegistryAggregateFactory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub examples: Arc<ExampleApplicationService<RegistryAggregateFactory>>,
    pub commands: CommandQueue<ExampleCommand>,
}
