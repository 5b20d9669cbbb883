// Conflict rules of the example aggregate.
//
// - Two openings conflict: only one writer may open an example.
// - Increments commute, so concurrent increments never conflict, on the same counter or not.
// - An increment decided before a concurrent opening was committed is still valid.
// - Every other pair falls back to the given policy.

use crate::modules::examples::core::events::ExampleEvent;
use crate::shared::infrastructure::conflict_detector::{ConflictPolicy, DelegateConflictDetector};

pub fn example_conflict_detector(policy: ConflictPolicy) -> DelegateConflictDetector<ExampleEvent> {
    let mut detector = DelegateConflictDetector::new(policy);
    detector
        .always_conflicts(ExampleEvent::OPENED, ExampleEvent::OPENED)
        .never_conflicts(
            ExampleEvent::COUNTER_INCREMENTED,
            ExampleEvent::COUNTER_INCREMENTED,
        )
        .never_conflicts(ExampleEvent::OPENED, ExampleEvent::COUNTER_INCREMENTED);
    detector
}
