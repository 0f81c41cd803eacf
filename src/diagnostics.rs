//! Diagnostics reporting for conditions the client tolerates rather than
//! fails on: unexpected media types, oddly shaped base URLs, multi-station
//! responses. The sink is owned by the client and passed to its components
//! explicitly instead of a process-wide logger.

/// Receives diagnostic messages from the client and its transport.
///
/// Implementations must be safe to share across threads, since the client
/// itself is. The two levels mirror how the messages are meant to be read:
/// `warn` for configurations that probably will not work against the real
/// service, `debug` for observations about tolerated responses.
pub trait DiagnosticSink: Send + Sync {
    /// Reports an observation about a tolerated condition.
    fn debug(&self, message: &str);

    /// Reports a configuration that is accepted but suspicious.
    fn warn(&self, message: &str);
}

/// The default sink: forwards to the [`log`] facade, so a `log`-compatible
/// logger like `env_logger` sees the client's diagnostics without further
/// wiring.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn debug(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}
