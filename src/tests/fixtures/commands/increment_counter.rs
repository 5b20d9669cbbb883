// Shared test fixture for the IncrementCounter command.

use crate::modules::examples::core::identity::ExampleId;
use crate::modules::examples::use_cases::increment_counter::command::IncrementCounter;

pub struct IncrementCounterBuilder {
    inner: IncrementCounter,
}

impl Default for IncrementCounterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl IncrementCounterBuilder {
    pub fn new() -> Self {
        let inner: IncrementCounter =
            serde_json::from_str(include_str!("json/increment_counter.json"))
                .expect("increment_counter.json fixture is valid");
        Self { inner }
    }

    pub fn id(mut self, v: u64) -> Self {
        self.inner.id = ExampleId(v);
        self
    }

    pub fn counter(mut self, v: impl Into<String>) -> Self {
        self.inner.counter = v.into();
        self
    }

    pub fn by(mut self, v: i64) -> Self {
        self.inner.by = v;
        self
    }

    pub fn expected_version(mut self, v: Option<u64>) -> Self {
        self.inner.expected_version = v;
        self
    }

    pub fn build(self) -> IncrementCounter {
        self.inner
    }
}

#[cfg(test)]
mod increment_counter_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = IncrementCounterBuilder::default().build();
        assert_eq!(built.id, ExampleId(1));
        assert_eq!(built.counter, "visits");
        assert_eq!(built.by, 1);
        assert_eq!(built.expected_version, None);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = IncrementCounterBuilder::new()
            .id(2)
            .counter("likes")
            .by(7)
            .expected_version(Some(1))
            .build();
        assert_eq!(custom.id, ExampleId(2));
        assert_eq!(custom.counter, "likes");
        assert_eq!(custom.by, 7);
        assert_eq!(custom.expected_version, Some(1));
    }
}
