use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use uuid::Uuid;

/// Per-call context threaded through every store operation.
///
/// Carries a request id for log correlation and a cancellation flag. Store
/// operations currently ignore the flag: once a call reaches the record file
/// it runs to completion.
#[derive(Debug, Clone)]
pub struct CallContext {
    request_id: Uuid,
    cancelled: Arc<AtomicBool>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::with_request_id(Uuid::new_v4())
    }

    pub fn with_request_id(request_id: Uuid) -> Self {
        Self { request_id, cancelled: Arc::new(AtomicBool::new(false)) }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Mark the call as cancelled. Clones share the flag.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Reserved for callers; no store operation consults it yet.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
