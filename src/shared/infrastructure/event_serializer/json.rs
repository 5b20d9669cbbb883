// JSON implementation of the EventSerializer port.
//
// Responsibilities
// - Encode events with serde_json. Event enums carry their variant in the internal `type` tag,
//   so the payload is self describing.

use crate::shared::core::event::DomainEvent;
use crate::shared::infrastructure::event_serializer::{EventSerializer, SerializationError};
use std::marker::PhantomData;

pub struct JsonEventSerializer<Event> {
    _event: PhantomData<fn() -> Event>,
}

impl<Event> JsonEventSerializer<Event> {
    pub fn new() -> Self {
        Self {
            _event: PhantomData,
        }
    }
}

impl<Event> Default for JsonEventSerializer<Event> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Event: DomainEvent> EventSerializer<Event> for JsonEventSerializer<Event> {
    fn serialize(&self, event: &Event) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(event).map_err(|e| SerializationError::Serialize {
            event_type: event.event_type(),
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, payload: &[u8]) -> Result<Event, SerializationError> {
        serde_json::from_slice(payload).map_err(|e| SerializationError::Deserialize(e.to_string()))
    }
}
