// In memory implementation of the EventPublisher port.
//
// Purpose
// - Let tests assert what the event store published, and how often it was asked to.

use crate::shared::core::event::DomainEvent;
use crate::shared::infrastructure::event_publisher::EventPublisher;
use tokio::sync::Mutex;

pub struct InMemoryEventPublisher<Event: DomainEvent> {
    pub published: Mutex<Vec<Event>>,
    publish_calls: Mutex<usize>,
    is_offline: bool,
}

impl<Event: DomainEvent> InMemoryEventPublisher<Event> {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            publish_calls: Mutex::new(0),
            is_offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn published_events(&self) -> Vec<Event> {
        self.published.lock().await.clone()
    }

    pub async fn publish_calls(&self) -> usize {
        *self.publish_calls.lock().await
    }
}

impl<Event: DomainEvent> Default for InMemoryEventPublisher<Event> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<Event: DomainEvent> EventPublisher<Event> for InMemoryEventPublisher<Event> {
    async fn publish(&self, events: &[Event]) -> anyhow::Result<()> {
        *self.publish_calls.lock().await += 1;
        if self.is_offline {
            return Err(anyhow::anyhow!("Event publisher offline"));
        }
        self.published.lock().await.extend_from_slice(events);
        Ok(())
    }
}
