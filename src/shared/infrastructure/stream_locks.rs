// One async mutex per aggregate stream.
//
// Writers to the same stream are serialized, writers to different streams never wait on
// each other. Entries nobody holds or waits for are dropped on the next acquire, so the map
// only tracks streams in use.

use crate::shared::core::identity::AggregateId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct StreamLocks {
    locks: Mutex<HashMap<AggregateId, Arc<Mutex<()>>>>,
}

impl StreamLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, aggregate_id: &AggregateId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(aggregate_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
