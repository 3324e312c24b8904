//! Logging destination for relayed MkDocs output.

use super::classify::{ClassifiedMessage, LogLevel};

/// Destination for classified MkDocs output lines.
///
/// The production sink forwards to `tracing`; tests substitute a capturing
/// implementation.
pub trait LogSink: Send + Sync {
    /// Emit one classified line.
    fn emit(&self, message: &ClassifiedMessage);

    /// Whether debug-level output should be requested from mkdocs itself
    /// (drives the `--verbose` flag).
    fn debug_enabled(&self) -> bool;
}

/// Sink that relays lines through the `tracing` macros.
///
/// Lines are emitted under the `mkdocs` target so they can be filtered
/// separately from the runner's own logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, message: &ClassifiedMessage) {
        match message.level {
            LogLevel::Debug => tracing::debug!(target: "mkdocs", "{}", message.message),
            LogLevel::Info => tracing::info!(target: "mkdocs", "{}", message.message),
            LogLevel::Warn => tracing::warn!(target: "mkdocs", "{}", message.message),
            LogLevel::Error => tracing::error!(target: "mkdocs", "{}", message.message),
        }
    }

    fn debug_enabled(&self) -> bool {
        tracing::enabled!(target: "mkdocs", tracing::Level::DEBUG)
    }
}
