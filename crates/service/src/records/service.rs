use std::sync::Arc;

use async_trait::async_trait;
use common::types::Record;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::RecordStore;
use crate::{context::CallContext, errors::ServiceError, storage::record_file::RecordFile};

/// CRUD over a record file.
///
/// Holds a lock around each read-modify-write on top of the file's own lock.
/// Services sharing one `RecordFile` through an `Arc` must also share this
/// lock (`with_shared_lock` / `write_lock`); the file lock alone only covers a
/// single read or a single write, not the whole unit.
pub struct RecordService<F> {
    inner: Arc<Inner<F>>,
}

struct Inner<F> {
    file: F,
    lock: Arc<RwLock<()>>,
}

impl<F> Clone for RecordService<F> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<F: RecordFile + 'static> RecordService<F> {
    pub fn new(file: F) -> Self {
        Self::with_shared_lock(file, Arc::new(RwLock::new(())))
    }

    /// Build a service whose read-modify-write lock is shared with other
    /// services over the same record file.
    pub fn with_shared_lock(file: F, lock: Arc<RwLock<()>>) -> Self {
        Self { inner: Arc::new(Inner { file, lock }) }
    }

    /// Handle to this service's read-modify-write lock.
    pub fn write_lock(&self) -> Arc<RwLock<()>> {
        Arc::clone(&self.inner.lock)
    }

    /// Run a mutation on its own task so dropping the caller's future does not
    /// abandon a read-modify-write halfway.
    async fn run_to_completion<T, Fut>(&self, op: impl FnOnce(Arc<Inner<F>>) -> Fut) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        Fut: std::future::Future<Output = Result<T, ServiceError>> + Send + 'static,
    {
        let fut = op(Arc::clone(&self.inner));
        tokio::spawn(fut)
            .await
            .map_err(|e| ServiceError::Internal(format!("store task failed: {e}")))?
    }
}

impl<F: RecordFile> Inner<F> {
    async fn put(&self, record: Record) -> Result<Record, ServiceError> {
        let _guard = self.lock.write().await;
        let mut records = self.file.read().await?;
        match records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => existing.to = record.to.clone(),
            None => records.push(record.clone()),
        }
        self.file.write(&records).await?;
        Ok(record)
    }

    async fn delete(&self, name: &str) -> Result<(), ServiceError> {
        let _guard = self.lock.write().await;
        let records = self.file.read().await?;
        let before = records.len();
        let kept: Vec<Record> = records.into_iter().filter(|r| r.name != name).collect();
        if kept.len() == before {
            return Err(ServiceError::not_found(&format!("record {name}")));
        }
        self.file.write(&kept).await
    }
}

#[async_trait]
impl<F: RecordFile + 'static> RecordStore for RecordService<F> {
    async fn scan(&self, ctx: &CallContext) -> Result<Vec<Record>, ServiceError> {
        let _guard = self.inner.lock.read().await;
        let records = self.inner.file.read().await?;
        debug!(request_id = %ctx.request_id(), count = records.len(), "scan");
        if records.is_empty() {
            return Err(ServiceError::not_found("records"));
        }
        Ok(records)
    }

    async fn get(&self, ctx: &CallContext, name: &str) -> Result<Record, ServiceError> {
        let _guard = self.inner.lock.read().await;
        let records = self.inner.file.read().await?;
        debug!(request_id = %ctx.request_id(), %name, "get");
        records
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ServiceError::not_found(&format!("record {name}")))
    }

    async fn put(&self, ctx: &CallContext, record: Record) -> Result<Record, ServiceError> {
        let request_id = ctx.request_id();
        let stored = self
            .run_to_completion(move |inner| async move { inner.put(record).await })
            .await?;
        info!(%request_id, name = %stored.name, to = %stored.to, "record stored");
        Ok(stored)
    }

    async fn delete(&self, ctx: &CallContext, name: &str) -> Result<(), ServiceError> {
        let request_id = ctx.request_id();
        let owned = name.to_string();
        self.run_to_completion(move |inner| async move { inner.delete(&owned).await })
            .await?;
        info!(%request_id, %name, "record deleted");
        Ok(())
    }
}
