// Command data type for opening an example.
//
// Responsibilities
// - Carry the input the decider needs to emit ExampleOpenedV1.
// - Stay independent of transport details; HTTP and the command queue both build it.

use crate::modules::examples::core::identity::ExampleId;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenExample {
    pub id: ExampleId,
    pub opened_at: i64,
    #[serde(default)]
    pub expected_version: Option<u64>,
}
