use async_trait::async_trait;
use common::types::Record;

use crate::{context::CallContext, errors::ServiceError};

pub mod service;

pub use service::RecordService;

/// Trait abstraction for the record store consumed by the HTTP layer.
///
/// Every operation reads the full record set, so each is O(n) in the number
/// of stored records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records; `NotFound` when the store is empty.
    async fn scan(&self, ctx: &CallContext) -> Result<Vec<Record>, ServiceError>;
    async fn get(&self, ctx: &CallContext, name: &str) -> Result<Record, ServiceError>;
    /// Create or update by name; returns the stored record.
    async fn put(&self, ctx: &CallContext, record: Record) -> Result<Record, ServiceError>;
    async fn delete(&self, ctx: &CallContext, name: &str) -> Result<(), ServiceError>;
}
