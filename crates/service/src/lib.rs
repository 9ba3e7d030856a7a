//! Record store service layer.
//! - `storage`: durable read/replace of the full record set.
//! - `records`: CRUD and not-found policy on top of a record file.
//! - Errors are a closed set (`errors::ServiceError`) mapped to wire codes.

pub mod errors;
pub mod context;
pub mod runtime;
pub mod storage;
pub mod records;

pub use context::CallContext;
pub use errors::ServiceError;
pub use records::{RecordService, RecordStore};
pub use storage::record_file::{JsonRecordFile, RecordFile};
