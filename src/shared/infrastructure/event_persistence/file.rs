// File based implementation of the EventPersistence port.
//
// Layout
// - One file per stream, named after the stream name (`tag + key`), inside storage_path.
// - Each record is a little endian u32 payload length followed by the serialized event.
//
// Responsibilities
// - Append a whole batch with a single write so a batch is never interleaved with another.
// - A failed write is rolled back by truncating the file to its length before the write.
// - Never append behind a truncated trailing record; such a stream is reported Corrupted.
// - Cache stream versions; the cache is refreshed whenever a stream is read in full. It holds
//   one u64 per stream this instance has touched.
//
// Boundaries
// - Serialization of appends is per process. Several processes sharing a directory are not
//   coordinated.

use crate::shared::core::event::DomainEvent;
use crate::shared::core::identity::AggregateId;
use crate::shared::infrastructure::event_persistence::{
    EventPersistence, PersistenceError, read_limit,
};
use crate::shared::infrastructure::event_serializer::EventSerializer;
use crate::shared::infrastructure::event_serializer::json::JsonEventSerializer;
use crate::shared::infrastructure::stream_locks::StreamLocks;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

const LENGTH_PREFIX: usize = 4;

pub struct FileEventPersistence<Event: DomainEvent> {
    storage_path: PathBuf,
    serializer: Arc<dyn EventSerializer<Event>>,
    version_cache: Mutex<HashMap<AggregateId, u64>>,
    stream_locks: StreamLocks,
}

impl<Event: DomainEvent> FileEventPersistence<Event> {
    pub async fn open(storage_path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        Self::open_with_serializer(storage_path, Arc::new(JsonEventSerializer::new())).await
    }

    pub async fn open_with_serializer(
        storage_path: impl Into<PathBuf>,
        serializer: Arc<dyn EventSerializer<Event>>,
    ) -> Result<Self, PersistenceError> {
        let storage_path = storage_path.into();
        fs::create_dir_all(&storage_path)
            .await
            .map_err(|e| unreachable_store(&storage_path, e))?;
        Ok(Self {
            storage_path,
            serializer,
            version_cache: Mutex::new(HashMap::new()),
            stream_locks: StreamLocks::new(),
        })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn file_path(&self, aggregate_id: &AggregateId) -> PathBuf {
        self.storage_path.join(aggregate_id.stream_name())
    }

    async fn read_stream(&self, aggregate_id: &AggregateId) -> Result<Vec<u8>, PersistenceError> {
        match fs::read(self.file_path(aggregate_id)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Counts the records of a stream and caches the count. Callers hold the stream lock.
    async fn load_version(&self, aggregate_id: &AggregateId) -> Result<u64, PersistenceError> {
        let bytes = self.read_stream(aggregate_id).await?;
        let version = decode_records(&aggregate_id.stream_name(), &bytes, usize::MAX)?.len() as u64;
        self.version_cache
            .lock()
            .await
            .insert(aggregate_id.clone(), version);
        Ok(version)
    }
}

fn unreachable_store(path: &Path, error: std::io::Error) -> PersistenceError {
    PersistenceError::StoreUnreachable(format!("{}: {error}", path.display()))
}

/// Splits a stream file into record payloads, stopping after `limit` records.
fn decode_records<'a>(
    stream: &str,
    bytes: &'a [u8],
    limit: usize,
) -> Result<Vec<&'a [u8]>, PersistenceError> {
    let mut records = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() && records.len() < limit {
        let corrupted = |reason: String| PersistenceError::Corrupted {
            stream: stream.to_string(),
            reason,
        };
        let header = bytes
            .get(offset..offset + LENGTH_PREFIX)
            .ok_or_else(|| corrupted(format!("truncated length prefix at byte {offset}")))?;
        let mut length = [0u8; LENGTH_PREFIX];
        length.copy_from_slice(header);
        let length = u32::from_le_bytes(length) as usize;
        let start = offset + LENGTH_PREFIX;
        let payload = bytes
            .get(start..start + length)
            .ok_or_else(|| corrupted(format!("truncated record at byte {offset}")))?;
        records.push(payload);
        offset = start + length;
    }
    Ok(records)
}

async fn write_synced(file: &mut File, buffer: &[u8]) -> std::io::Result<()> {
    file.write_all(buffer).await?;
    file.sync_data().await
}

fn encode_record(buffer: &mut Vec<u8>, payload: &[u8]) -> Result<(), PersistenceError> {
    let length = u32::try_from(payload.len()).map_err(|_| {
        PersistenceError::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            "event payload exceeds u32::MAX bytes",
        ))
    })?;
    buffer.extend_from_slice(&length.to_le_bytes());
    buffer.extend_from_slice(payload);
    Ok(())
}

#[async_trait::async_trait]
impl<Event: DomainEvent> EventPersistence<Event> for FileEventPersistence<Event> {
    async fn append_events(
        &self,
        aggregate_id: &AggregateId,
        events: &[Event],
    ) -> Result<(), PersistenceError> {
        if events.is_empty() {
            return Ok(());
        }
        let mut buffer = Vec::new();
        for event in events {
            encode_record(&mut buffer, &self.serializer.serialize(event)?)?;
        }

        let _guard = self.stream_locks.acquire(aggregate_id).await;
        // An uncached stream has not been checked for a torn tail by this instance yet.
        let cached = self.version_cache.lock().await.contains_key(aggregate_id);
        if !cached {
            self.load_version(aggregate_id).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_path(aggregate_id))
            .await?;
        let committed_len = file.metadata().await?.len();
        if let Err(error) = write_synced(&mut file, &buffer).await {
            if let Err(rollback) = file.set_len(committed_len).await {
                warn!(stream = %aggregate_id, %rollback, "failed append could not be rolled back");
                self.version_cache.lock().await.remove(aggregate_id);
            }
            return Err(error.into());
        }

        if let Some(version) = self.version_cache.lock().await.get_mut(aggregate_id) {
            *version += events.len() as u64;
        }
        Ok(())
    }

    async fn get_events_for(
        &self,
        aggregate_id: &AggregateId,
        max_version: Option<u64>,
    ) -> Result<Vec<Event>, PersistenceError> {
        let _guard = self.stream_locks.acquire(aggregate_id).await;
        let bytes = self.read_stream(aggregate_id).await?;
        let limit = read_limit(max_version);
        let records = decode_records(&aggregate_id.stream_name(), &bytes, limit)?;
        if records.len() < limit {
            self.version_cache
                .lock()
                .await
                .insert(aggregate_id.clone(), records.len() as u64);
        }
        records
            .into_iter()
            .map(|r| self.serializer.deserialize(r).map_err(PersistenceError::from))
            .collect()
    }

    async fn get_version_for(&self, aggregate_id: &AggregateId) -> Result<u64, PersistenceError> {
        if let Some(version) = self.version_cache.lock().await.get(aggregate_id) {
            return Ok(*version);
        }
        let _guard = self.stream_locks.acquire(aggregate_id).await;
        self.load_version(aggregate_id).await
    }
}
