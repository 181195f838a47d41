//! Completion-logging capability for probe runs.

/// Fire-and-forget logging sink injected into the probe.
///
/// The probe reports one informational line on completion, or a warning when
/// a run downloaded nothing. Passing the sink in keeps the core free of
/// process-wide logger state; library users can capture or silence it.
pub trait ProbeLog: Send + Sync {
    /// Reports an informational message.
    fn info(&self, message: &str);
    /// Reports a warning.
    fn warn(&self, message: &str);
}

/// Default [`ProbeLog`] forwarding to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl ProbeLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
