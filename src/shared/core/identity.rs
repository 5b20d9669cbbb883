// Aggregate identities.
//
// Purpose
// - Name the stream an aggregate lives in.
//
// Responsibilities
// - AggregateId is the erased (tag, key) pair the store and persistence layers work with.
// - AggregateIdentity is implemented by typed ids in the domain modules.
//
// Wire format
// - The stream name is `tag + key`, case sensitive. Adapters use it as file name or row key.
// - Only ASCII alphanumerics and '-' are allowed in tags and keys, so the rendering stays
//   safe for every adapter.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid aggregate identity: {0}")]
pub struct InvalidIdentity(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AggregateId {
    tag: String,
    key: String,
}

impl AggregateId {
    pub fn new(tag: impl Into<String>, key: impl ToString) -> Result<Self, InvalidIdentity> {
        let tag = tag.into();
        let key = key.to_string();
        validate_part("tag", &tag)?;
        validate_part("key", &key)?;
        Ok(Self { tag, key })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn stream_name(&self) -> String {
        format!("{}{}", self.tag, self.key)
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tag, self.key)
    }
}

fn validate_part(part: &str, value: &str) -> Result<(), InvalidIdentity> {
    if value.trim().is_empty() {
        return Err(InvalidIdentity(format!(
            "{part} cannot be empty or whitespace"
        )));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(InvalidIdentity(format!(
            "{part} '{value}' contains '{c}', only alphanumerics and '-' are allowed"
        )));
    }
    Ok(())
}

/// Typed identity of one aggregate kind.
///
/// `TAG` distinguishes aggregate kinds that share the same key space.
pub trait AggregateIdentity: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const TAG: &'static str;

    fn key(&self) -> String;

    fn aggregate_id(&self) -> Result<AggregateId, InvalidIdentity> {
        AggregateId::new(Self::TAG, self.key())
    }
}
