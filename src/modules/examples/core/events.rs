use crate::modules::examples::core::identity::ExampleId;
use crate::shared::core::event::DomainEvent;

pub mod v1 {
    pub mod counter_incremented;
    pub mod example_opened;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ExampleEvent {
    ExampleOpenedV1(v1::example_opened::ExampleOpenedV1),
    CounterIncrementedV1(v1::counter_incremented::CounterIncrementedV1),
}

impl ExampleEvent {
    pub const OPENED: &'static str = "ExampleOpenedV1";
    pub const COUNTER_INCREMENTED: &'static str = "CounterIncrementedV1";

    pub fn example_id(&self) -> ExampleId {
        match self {
            ExampleEvent::ExampleOpenedV1(e) => e.id,
            ExampleEvent::CounterIncrementedV1(e) => e.id,
        }
    }
}

impl DomainEvent for ExampleEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ExampleEvent::ExampleOpenedV1(_) => Self::OPENED,
            ExampleEvent::CounterIncrementedV1(_) => Self::COUNTER_INCREMENTED,
        }
    }
}
