use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("unable to serialize event of type [{event_type}]: {reason}")]
    Serialize {
        event_type: &'static str,
        reason: String,
    },

    #[error("unable to deserialize event: {0}")]
    Deserialize(String),
}

/// Codec between events and the opaque payload persistence adapters store.
/// `deserialize(serialize(e))` must equal `e`.
pub trait EventSerializer<Event>: Send + Sync {
    fn serialize(&self, event: &Event) -> Result<Vec<u8>, SerializationError>;
    fn deserialize(&self, payload: &[u8]) -> Result<Event, SerializationError>;
}

pub mod json;
