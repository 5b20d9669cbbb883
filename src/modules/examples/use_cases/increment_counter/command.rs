// Command data type for incrementing a named counter of an example.

use crate::modules::examples::core::identity::ExampleId;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IncrementCounter {
    pub id: ExampleId,
    pub counter: String,
    pub by: i64,
    #[serde(default)]
    pub expected_version: Option<u64>,
}
