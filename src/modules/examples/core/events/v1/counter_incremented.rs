// Event payload: CounterIncrementedV1.
//
// Purpose
// - Record that the named counter of an opened example grew by `by`.
//
// Versioning and evolution
// - Increments commute, which is what lets concurrent increments merge. A change that breaks
//   that property needs a new version and a new conflict rule.

use crate::modules::examples::core::identity::ExampleId;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CounterIncrementedV1 {
    pub id: ExampleId,
    pub counter: String,
    pub by: i64,
}
