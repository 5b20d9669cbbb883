// Event payload: ExampleOpenedV1.
//
// Purpose
// - Record that an example aggregate was opened and may now count things.
//
// Versioning and evolution
// - Prefer adding fields. For breaking changes, create ExampleOpenedV2 in a new file and add a new variant.
//
// Timestamps
// - opened_at is epoch milliseconds.

use crate::modules::examples::core::identity::ExampleId;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ExampleOpenedV1 {
    pub id: ExampleId,
    pub opened_at: i64,
}
