// Conflict detection between committed and pending events.
//
// Purpose
// - Decide whether events another writer committed since our expected version can be folded
//   in, or whether our pending events must be rejected.
//
// Responsibilities
// - Rules are registered per ordered (committed type, uncommitted type) pair. A rule for
//   (A, B) says nothing about (B, A).
// - Pairs without a rule fall back to the configured ConflictPolicy.
//
// Boundaries
// - The registry is built with &mut self before the detector is shared. It is read only
//   afterwards.

use crate::shared::core::event::DomainEvent;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Unknown pairs conflict. Fails rather than merging changes nobody declared compatible.
    #[default]
    AssumeConflict,
    AssumeNoConflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown conflict policy '{0}', expected 'assume-conflict' or 'assume-no-conflict'")]
pub struct UnknownConflictPolicy(pub String);

impl FromStr for ConflictPolicy {
    type Err = UnknownConflictPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assume-conflict" => Ok(Self::AssumeConflict),
            "assume-no-conflict" => Ok(Self::AssumeNoConflict),
            other => Err(UnknownConflictPolicy(other.to_string())),
        }
    }
}

pub trait ConflictDetector<Event>: Send + Sync {
    /// True on the first conflicting pair, committed events outer, uncommitted inner.
    fn has_conflict(&self, committed: &[Event], uncommitted: &[Event]) -> bool;
}

type ConflictRule<Event> = Box<dyn Fn(&Event, &Event) -> bool + Send + Sync>;

pub struct DelegateConflictDetector<Event> {
    rules: HashMap<(&'static str, &'static str), ConflictRule<Event>>,
    default_policy: ConflictPolicy,
}

impl<Event: DomainEvent> DelegateConflictDetector<Event> {
    pub fn new(default_policy: ConflictPolicy) -> Self {
        Self {
            rules: HashMap::new(),
            default_policy,
        }
    }

    pub fn default_policy(&self) -> ConflictPolicy {
        self.default_policy
    }

    /// Registers `rule` for the pair, replacing any earlier rule for the same pair.
    pub fn add_rule<F>(
        &mut self,
        committed_type: &'static str,
        uncommitted_type: &'static str,
        rule: F,
    ) -> &mut Self
    where
        F: Fn(&Event, &Event) -> bool + Send + Sync + 'static,
    {
        self.rules
            .insert((committed_type, uncommitted_type), Box::new(rule));
        self
    }

    pub fn never_conflicts(
        &mut self,
        committed_type: &'static str,
        uncommitted_type: &'static str,
    ) -> &mut Self {
        self.add_rule(committed_type, uncommitted_type, |_, _| false)
    }

    pub fn always_conflicts(
        &mut self,
        committed_type: &'static str,
        uncommitted_type: &'static str,
    ) -> &mut Self {
        self.add_rule(committed_type, uncommitted_type, |_, _| true)
    }

    fn conflicts(&self, committed: &Event, uncommitted: &Event) -> bool {
        match self
            .rules
            .get(&(committed.event_type(), uncommitted.event_type()))
        {
            Some(rule) => rule(committed, uncommitted),
            None => self.default_policy == ConflictPolicy::AssumeConflict,
        }
    }
}

impl<Event: DomainEvent> Default for DelegateConflictDetector<Event> {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}

impl<Event: DomainEvent> ConflictDetector<Event> for DelegateConflictDetector<Event> {
    fn has_conflict(&self, committed: &[Event], uncommitted: &[Event]) -> bool {
        committed
            .iter()
            .any(|c| uncommitted.iter().any(|u| self.conflicts(c, u)))
    }
}

impl<Event> fmt::Debug for DelegateConflictDetector<Event> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<_> = self.rules.keys().collect();
        pairs.sort();
        f.debug_struct("DelegateConflictDetector")
            .field("rules", &pairs)
            .field("default_policy", &self.default_policy)
            .finish()
    }
}
