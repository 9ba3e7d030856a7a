//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so startup code can prepare the record
//! file and open the store in one call.

use std::{path::PathBuf, sync::Arc};

use crate::{JsonRecordFile, RecordService};

/// Ensure the record file exists (created empty if missing).
pub async fn ensure_record_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<()> {
    common::env::touch_file(path).await
}

/// Touch the record file and build the store service over it.
pub async fn open_store<P: Into<PathBuf>>(path: P) -> anyhow::Result<Arc<RecordService<JsonRecordFile>>> {
    let path = path.into();
    ensure_record_file(&path).await?;
    Ok(Arc::new(RecordService::new(JsonRecordFile::new(path))))
}
