// Shared test fixture for the OpenExample command.

use crate::modules::examples::core::identity::ExampleId;
use crate::modules::examples::use_cases::open_example::command::OpenExample;

pub struct OpenExampleBuilder {
    inner: OpenExample,
}

impl Default for OpenExampleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl OpenExampleBuilder {
    pub fn new() -> Self {
        let inner: OpenExample = serde_json::from_str(include_str!("json/open_example.json"))
            .expect("open_example.json fixture is valid");
        Self { inner }
    }

    pub fn id(mut self, v: u64) -> Self {
        self.inner.id = ExampleId(v);
        self
    }

    pub fn opened_at(mut self, v: i64) -> Self {
        self.inner.opened_at = v;
        self
    }

    pub fn expected_version(mut self, v: Option<u64>) -> Self {
        self.inner.expected_version = v;
        self
    }

    pub fn build(self) -> OpenExample {
        self.inner
    }
}

#[cfg(test)]
mod open_example_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = OpenExampleBuilder::default().build();
        assert_eq!(built.id, ExampleId(1));
        assert_eq!(built.opened_at, 1_700_000_000_000);
        assert_eq!(built.expected_version, None);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = OpenExampleBuilder::new()
            .id(9)
            .opened_at(42)
            .expected_version(Some(3))
            .build();
        assert_eq!(custom.id, ExampleId(9));
        assert_eq!(custom.opened_at, 42);
        assert_eq!(custom.expected_version, Some(3));
    }
}
