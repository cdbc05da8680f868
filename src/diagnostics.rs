//! User-facing diagnostics for skipped or malformed configuration.

use std::sync::Arc;

/// Injected sink for the plugin's diagnostic messages.
///
/// The host framework owns the presentation channel; the plugin only hands
/// it plain single-line messages.
pub trait DiagnosticSink {
    fn emit(&self, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, message: &str) {
        (**self).emit(message);
    }
}

/// Sink that forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, message: &str) {
        log::warn!("{message}");
    }
}
