// Pure decision function for incrementing a counter.
//
// - Counting requires an open example (example-not-opened).
// - Only positive increments are accepted (invalid-increment).

use crate::modules::examples::core::events::ExampleEvent;
use crate::modules::examples::core::events::v1::counter_incremented::CounterIncrementedV1;
use crate::modules::examples::core::state::ExampleState;
use crate::modules::examples::use_cases::increment_counter::command::IncrementCounter;
use crate::shared::core::domain_error::DomainError;

pub const EXAMPLE_NOT_OPENED: &str = "example-not-opened";
pub const INVALID_INCREMENT: &str = "invalid-increment";

pub fn decide_increment(
    state: &ExampleState,
    command: IncrementCounter,
) -> Result<Vec<ExampleEvent>, DomainError> {
    if !state.is_opened() {
        return Err(DomainError::named(
            EXAMPLE_NOT_OPENED,
            format!("{} has not been opened", command.id),
        ));
    }
    if command.by <= 0 {
        return Err(DomainError::named(
            INVALID_INCREMENT,
            format!("increment must be positive, got {}", command.by),
        ));
    }
    Ok(vec![ExampleEvent::CounterIncrementedV1(
        CounterIncrementedV1 {
            id: command.id,
            counter: command.counter,
            by: command.by,
        },
    )])
}
