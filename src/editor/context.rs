//! Editor session context.
//!
//! Provides session identity for logging.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Identity of one editing session.
#[derive(Debug, Clone)]
pub struct EditorContext {
    pub session_id: String,
    pub opened_at: DateTime<Utc>,
}

impl EditorContext {
    pub fn new() -> Self {
        Self {
            session_id: format!("sess-{}", &Uuid::new_v4().to_string()[..8]),
            opened_at: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.session_id)
    }

    /// Log context tagged with the operation being performed.
    pub fn op(&self, op: &str) -> LogContext {
        self.log_context().with_op(op)
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}
