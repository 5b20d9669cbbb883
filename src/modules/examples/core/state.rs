// Example aggregate state.
//
// Responsibilities
// - Fold ExampleEvent history into whether the example is open and the value of each counter.
// - Never validate. Events are facts; the deciders reject commands before events exist.

use crate::modules::examples::core::events::ExampleEvent;
use crate::modules::examples::core::identity::ExampleId;
use crate::shared::core::aggregate::AggregateState;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleState {
    pub opened_at: Option<i64>,
    pub counters: BTreeMap<String, i64>,
}

impl ExampleState {
    pub fn is_opened(&self) -> bool {
        self.opened_at.is_some()
    }

    /// Current value of `name`, 0 for a counter never incremented.
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }
}

impl AggregateState for ExampleState {
    type Id = ExampleId;
    type Event = ExampleEvent;

    fn when(&mut self, event: &ExampleEvent) {
        match event {
            ExampleEvent::ExampleOpenedV1(e) => {
                self.opened_at.get_or_insert(e.opened_at);
            }
            ExampleEvent::CounterIncrementedV1(e) => {
                *self.counters.entry(e.counter.clone()).or_insert(0) += e.by;
            }
        }
    }
}
