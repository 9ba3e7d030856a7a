use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use common::types::Record;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Durable read/replace of the full record set.
///
/// Implementations know nothing about name uniqueness.
#[async_trait]
pub trait RecordFile: Send + Sync {
    /// Read every record. An empty file is zero records.
    async fn read(&self) -> Result<Vec<Record>, ServiceError>;
    /// Replace the persisted set with `records`.
    async fn write(&self, records: &[Record]) -> Result<(), ServiceError>;
}

#[async_trait]
impl<T: RecordFile + ?Sized> RecordFile for Arc<T> {
    async fn read(&self) -> Result<Vec<Record>, ServiceError> {
        (**self).read().await
    }

    async fn write(&self, records: &[Record]) -> Result<(), ServiceError> {
        (**self).write(records).await
    }
}

/// JSON-array file backing the record store.
///
/// Reads share the lock; a write holds it exclusively so no read observes a
/// half-written file from this instance.
pub struct JsonRecordFile {
    file_path: PathBuf,
    lock: RwLock<()>,
}

impl JsonRecordFile {
    /// The file is not created here; see `runtime::ensure_record_file`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), lock: RwLock::new(()) }
    }
}

#[async_trait]
impl RecordFile for JsonRecordFile {
    async fn read(&self) -> Result<Vec<Record>, ServiceError> {
        let _guard = self.lock.read().await;
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Read(format!("read {}: {e}", self.file_path.display())))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let records: Vec<Record> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Read(format!("decode {}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), count = records.len(), "record file read");
        Ok(records)
    }

    async fn write(&self, records: &[Record]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(records).map_err(|e| ServiceError::Write(format!("encode: {e}")))?;
        let _guard = self.lock.write().await;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Write(format!("write {}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), count = records.len(), "record file written");
        Ok(())
    }
}
