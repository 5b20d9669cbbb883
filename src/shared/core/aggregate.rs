// Aggregate root: state plus the bookkeeping the repository relies on.
//
// Purpose
// - Apply events to an aggregate state through an explicit match (AggregateState::when).
// - Track the version and the events applied since the last save.
//
// Invariants
// - version grows by exactly 1 per applied event, historical or new.
// - uncommitted holds exactly the events applied since the last mark_as_committed.
//   The repository derives the expected version from these two numbers.

use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::AggregateIdentity;

/// State of one aggregate kind. `when` is the only way state changes.
pub trait AggregateState: Send + Sync + 'static {
    type Id: AggregateIdentity;
    type Event: DomainEvent;

    fn when(&mut self, event: &Self::Event);
}

#[derive(Debug, Clone)]
pub struct UncommittedEvents<Event> {
    events: Vec<Event>,
}

impl<Event> Default for UncommittedEvents<Event> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<Event> UncommittedEvents<Event> {
    fn append(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn mark_as_committed(&mut self) {
        self.events.clear();
    }
}

#[derive(Debug, Clone)]
pub struct AggregateRoot<S: AggregateState> {
    id: S::Id,
    version: u64,
    state: S,
    uncommitted: UncommittedEvents<S::Event>,
}

impl<S: AggregateState> AggregateRoot<S> {
    pub fn new(id: S::Id, state: S) -> Self {
        Self {
            id,
            version: 0,
            state,
            uncommitted: UncommittedEvents::default(),
        }
    }

    pub fn id(&self) -> &S::Id {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn uncommitted_events(&self) -> &[S::Event] {
        self.uncommitted.as_slice()
    }

    /// Version the aggregate had before its uncommitted events were applied.
    /// None only if the bookkeeping invariant was broken.
    pub fn committed_version(&self) -> Option<u64> {
        self.version.checked_sub(self.uncommitted.len() as u64)
    }

    /// Replays history. Replayed events are not recorded as uncommitted.
    pub fn load_from(&mut self, history: impl IntoIterator<Item = S::Event>) {
        for event in history {
            self.state.when(&event);
            self.version += 1;
        }
    }

    pub fn apply_change(&mut self, event: S::Event) {
        self.state.when(&event);
        self.version += 1;
        self.uncommitted.append(event);
    }

    pub fn apply_changes(&mut self, events: impl IntoIterator<Item = S::Event>) {
        for event in events {
            self.apply_change(event);
        }
    }

    pub fn mark_as_committed(&mut self) {
        self.uncommitted.mark_as_committed();
    }
}
