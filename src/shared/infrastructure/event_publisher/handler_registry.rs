// Publisher that routes each event to the handlers registered for its event type.
//
// Purpose
// - Typed fan out of published events without inspecting their runtime type.
//
// Responsibilities
// - Handlers are registered per event type name while the registry is being built.
// - Events without handlers are skipped.
// - The first failing handler stops publication and its error is returned with context.

use crate::shared::core::event::DomainEvent;
use crate::shared::infrastructure::event_publisher::EventPublisher;
use anyhow::Context;
use std::collections::HashMap;
use std::sync::Arc;

type EventHandler<Event> = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

pub struct EventHandlerRegistry<Event> {
    handlers: HashMap<&'static str, Vec<EventHandler<Event>>>,
}

impl<Event: DomainEvent> EventHandlerRegistry<Event> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, event_type: &'static str, handler: F) -> &mut Self
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Arc::new(handler));
        self
    }

    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.get(event_type).map(Vec::len).unwrap_or(0)
    }
}

impl<Event: DomainEvent> Default for EventHandlerRegistry<Event> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<Event: DomainEvent> EventPublisher<Event> for EventHandlerRegistry<Event> {
    async fn publish(&self, events: &[Event]) -> anyhow::Result<()> {
        for event in events {
            let Some(handlers) = self.handlers.get(event.event_type()) else {
                tracing::trace!(event_type = event.event_type(), "no handlers registered");
                continue;
            };
            for handler in handlers {
                handler(event)
                    .with_context(|| format!("handler for {} failed", event.event_type()))?;
            }
        }
        Ok(())
    }
}
