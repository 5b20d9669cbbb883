// Pure decision function for opening an example.
//
// - A blank example emits ExampleOpenedV1.
// - An example that is already open is rejected with example-already-opened.
// - Never performs input or output.

use crate::modules::examples::core::events::ExampleEvent;
use crate::modules::examples::core::events::v1::example_opened::ExampleOpenedV1;
use crate::modules::examples::core::state::ExampleState;
use crate::modules::examples::use_cases::open_example::command::OpenExample;
use crate::shared::core::domain_error::DomainError;

pub const EXAMPLE_ALREADY_OPENED: &str = "example-already-opened";

pub fn decide_open(
    state: &ExampleState,
    command: OpenExample,
) -> Result<Vec<ExampleEvent>, DomainError> {
    if state.is_opened() {
        return Err(DomainError::named(
            EXAMPLE_ALREADY_OPENED,
            format!("{} is already open", command.id),
        ));
    }
    Ok(vec![ExampleEvent::ExampleOpenedV1(ExampleOpenedV1 {
        id: command.id,
        opened_at: command.opened_at,
    })])
}
