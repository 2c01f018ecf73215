//! Logging facilities for gridbind.
//!
//! gridbind uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```
//!
//! Mutations of a data source log at `debug`, signal emission at `trace`,
//! and rejected out-of-bounds inserts at `warn`.

/// Span names used throughout gridbind for tracing.
pub mod span_names {
    /// Validation pass span.
    pub const VALIDATION: &str = "gridbind::validation";
    /// Re-indexing span.
    pub const REINDEX: &str = "gridbind::reindex";
    /// Deferred dispatch span.
    pub const DISPATCH: &str = "gridbind::dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "gridbind_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gridbind_core::signal";
    /// Deferred event queue target.
    pub const QUEUE: &str = "gridbind_core::queue";
    /// Table section target.
    pub const SECTION: &str = "gridbind::section";
    /// Table data source target.
    pub const DATA_SOURCE: &str = "gridbind::data_source";
    /// Validation target.
    pub const VALIDATION: &str = "gridbind::validation";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "gridbind::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with the core target.
#[macro_export]
macro_rules! gridbind_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "gridbind_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! gridbind_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "gridbind_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
        gridbind_debug!(value = 1, "inside perf span");
    }

    #[test]
    fn test_targets_are_namespaced() {
        assert!(targets::SIGNAL.starts_with(targets::CORE));
        assert!(targets::QUEUE.starts_with(targets::CORE));
        assert!(targets::SECTION.starts_with("gridbind::"));
    }
}
