// Shared test fixtures for example events.

use crate::modules::examples::core::events::ExampleEvent;
use crate::modules::examples::core::events::v1::counter_incremented::CounterIncrementedV1;
use crate::modules::examples::core::events::v1::example_opened::ExampleOpenedV1;
use crate::modules::examples::core::identity::ExampleId;
use crate::tests::fixtures::commands::open_example::OpenExampleBuilder;

pub fn make_example_opened_v1(id: u64) -> ExampleOpenedV1 {
    let command = OpenExampleBuilder::new().id(id).build();
    ExampleOpenedV1 {
        id: command.id,
        opened_at: command.opened_at,
    }
}

pub fn make_counter_incremented_v1(id: u64, counter: &str, by: i64) -> CounterIncrementedV1 {
    CounterIncrementedV1 {
        id: ExampleId(id),
        counter: counter.to_string(),
        by,
    }
}

pub fn make_example_opened_event(id: u64) -> ExampleEvent {
    ExampleEvent::ExampleOpenedV1(make_example_opened_v1(id))
}

pub fn make_counter_incremented_event(id: u64, counter: &str, by: i64) -> ExampleEvent {
    ExampleEvent::CounterIncrementedV1(make_counter_incremented_v1(id, counter, by))
}
