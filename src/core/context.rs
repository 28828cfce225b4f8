//! Call-depth and trace carrier
//!
//! A [`Context`] threads three values through nested logging wrappers: the
//! active logger, a "frames to skip" counter used for caller attribution,
//! and the current trace identifier. Carriers are never mutated in place;
//! each wrapper layer derives a new value. A missing carrier
//! (`Option::None`) means depth zero, the process-wide default logger, and
//! the sentinel trace id.

use crate::core::default_logger::default_logger;
use crate::core::logger::Logger;
use std::fmt;
use std::sync::Arc;

/// Trace identifier substituted when no carrier (or no id) is present, and
/// when the random source fails.
pub const DEFAULT_TRACE_ID: &str = "xxxxxxxxxxxxx";

#[derive(Clone, Default)]
pub struct Context {
    logger: Option<Arc<Logger>>,
    depth: usize,
    trace_id: Option<String>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// A fresh carrier bound to `logger`.
    pub fn with_logger(logger: Arc<Logger>) -> Context {
        Context {
            logger: Some(logger),
            depth: 0,
            trace_id: None,
        }
    }

    /// The carried logger, falling back to the process-wide default.
    pub fn logger(&self) -> Arc<Logger> {
        match &self.logger {
            Some(logger) => Arc::clone(logger),
            None => default_logger(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Derive a carrier with the depth incremented by one. Every wrapper
    /// layer between the application call site and the stack walk calls
    /// this exactly once.
    pub fn deepen(&self) -> Context {
        let mut next = self.clone();
        next.depth += 1;
        next
    }

    pub(crate) fn with_depth(&self, depth: usize) -> Context {
        let mut next = self.clone();
        next.depth = depth;
        next
    }

    /// The carried trace identifier, or the sentinel when absent.
    pub fn trace_id(&self) -> &str {
        self.trace_id.as_deref().unwrap_or(DEFAULT_TRACE_ID)
    }

    pub(crate) fn with_trace_id(&self, id: String) -> Context {
        let mut next = self.clone();
        next.trace_id = Some(id);
        next
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("logger", &self.logger.is_some())
            .field("depth", &self.depth)
            .field("trace_id", &self.trace_id)
            .finish()
    }
}

/// Depth of an optional carrier; a missing carrier is depth zero.
pub(crate) fn depth_of(ctx: Option<&Context>) -> usize {
    ctx.map_or(0, Context::depth)
}

/// Derive a one-deeper carrier from an optional one.
pub fn deepen(ctx: Option<&Context>) -> Context {
    match ctx {
        Some(ctx) => ctx.deepen(),
        None => Context::new().deepen(),
    }
}

/// Resolve the logger of an optional carrier, falling back to the
/// process-wide default.
pub fn logger_from(ctx: Option<&Context>) -> Arc<Logger> {
    match ctx {
        Some(ctx) => ctx.logger(),
        None => default_logger(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;
    use crate::sinks::MemorySink;

    #[test]
    fn test_deepen_derives() {
        let ctx = Context::new();
        let deeper = ctx.deepen();
        assert_eq!(ctx.depth(), 0);
        assert_eq!(deeper.depth(), 1);
        assert_eq!(deeper.deepen().depth(), 2);
    }

    #[test]
    fn test_missing_carrier_defaults() {
        assert_eq!(depth_of(None), 0);
        assert_eq!(deepen(None).depth(), 1);
        assert_eq!(Context::new().trace_id(), DEFAULT_TRACE_ID);
    }

    #[test]
    fn test_carried_logger_resolves() {
        let logger = Arc::new(Logger::new(Arc::new(MemorySink::new()), Level::Info));
        let ctx = Context::with_logger(Arc::clone(&logger));
        assert!(Arc::ptr_eq(&ctx.logger(), &logger));
        // derived carriers keep the binding
        assert!(Arc::ptr_eq(&ctx.deepen().logger(), &logger));
    }

    #[test]
    fn test_missing_carrier_falls_back_to_default() {
        let fallback = logger_from(None);
        assert!(Arc::ptr_eq(&fallback, &default_logger()));
    }

    #[test]
    fn test_trace_id_derivation() {
        let ctx = Context::new().with_trace_id("ABCDEFGHIJKLM".to_string());
        assert_eq!(ctx.trace_id(), "ABCDEFGHIJKLM");
        assert_eq!(ctx.deepen().trace_id(), "ABCDEFGHIJKLM");
        assert_eq!(Context::new().trace_id(), DEFAULT_TRACE_ID);
    }
}
