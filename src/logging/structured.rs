//! Structured logging utilities.
//!
//! Provides context-aware logging with session_id and the operation name
//! included in every log message.

use std::fmt;

/// Logging context for an editor session.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub session_id: String,
    pub op: Option<String>,
}

impl LogContext {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            op: None,
        }
    }

    pub fn with_op(&self, op: &str) -> Self {
        Self {
            session_id: self.session_id.clone(),
            op: Some(op.to_string()),
        }
    }

    /// Context for code running outside any editor session (tests, benches).
    pub fn detached() -> Self {
        Self::new("detached")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            Some(op) => write!(f, "[session={}] [op={}]", self.session_id, op),
            None => write!(f, "[session={}]", self.session_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_replaces_previous_op() {
        let import = LogContext::new("sess-0f3a9c21")
            .with_op("drop")
            .with_op("import");
        assert_eq!(import.to_string(), "[session=sess-0f3a9c21] [op=import]");
        assert_eq!(LogContext::detached().to_string(), "[session=detached]");
    }

    #[test]
    fn test_macros_expand() {
        let ctx = LogContext::detached().with_op("test");
        crate::log_info!(ctx, "MACRO_INFO", unit = 4u32, id = "eq-1");
        crate::log_warn!(ctx, "MACRO_WARN", reason = "none");
        crate::log_debug!(ctx, "MACRO_DEBUG", count = 0usize);
    }
}
