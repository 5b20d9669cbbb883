use crate::shared::core::identity::AggregateIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleId(pub u64);

impl AggregateIdentity for ExampleId {
    const TAG: &'static str = "Example";

    fn key(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ExampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::TAG, self.0)
    }
}
