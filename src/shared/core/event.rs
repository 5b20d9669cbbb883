// Capability shared by every event that flows through the store.
//
// Purpose
// - Let the store, conflict detector and publishers work with one event type per aggregate
//   family without knowing its variants.
//
// Versioning and evolution
// - event_type names the concrete variant. It keys conflict rules and publisher handlers,
//   so it must stay stable once events are stored.

use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

pub trait DomainEvent:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn event_type(&self) -> &'static str;
}
