// Commands accepted by the example application service, as they travel through the queue
// and the POST /commands endpoint.

use crate::modules::examples::core::identity::ExampleId;
use crate::modules::examples::use_cases::increment_counter::command::IncrementCounter;
use crate::modules::examples::use_cases::open_example::command::OpenExample;
use crate::shared::application::command::Command;
use crate::shared::core::identity::AggregateIdentity;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ExampleCommand {
    OpenExample(OpenExample),
    IncrementCounter(IncrementCounter),
}

impl ExampleCommand {
    pub fn example_id(&self) -> ExampleId {
        match self {
            ExampleCommand::OpenExample(c) => c.id,
            ExampleCommand::IncrementCounter(c) => c.id,
        }
    }
}

impl Command for ExampleCommand {
    fn aggregate_tag(&self) -> &'static str {
        ExampleId::TAG
    }

    fn expected_version(&self) -> Option<u64> {
        match self {
            ExampleCommand::OpenExample(c) => c.expected_version,
            ExampleCommand::IncrementCounter(c) => c.expected_version,
        }
    }
}
