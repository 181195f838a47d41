//! Probe run result.

use serde::{Deserialize, Serialize};

/// Number of bytes per megabyte as reported by the probe (mebibyte).
pub(crate) const BYTES_PER_MB: f64 = 1_048_576.0;

/// The aggregate outcome of a single probe run.
///
/// Immutable once produced; this is the sole externally visible output of a
/// run. A run that received no data reports zeros rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedtestResult {
    /// Total bytes downloaded over the life of the probe.
    pub downloaded_bytes: u64,
    /// Wall-clock duration of the streaming phase in milliseconds.
    pub elapsed_millis: u64,
    /// Peak one-second throughput observed, in MB/s.
    pub max_rate_mbps: f64,
}

impl SpeedtestResult {
    /// Creates a new result.
    #[must_use]
    pub const fn new(downloaded_bytes: u64, elapsed_millis: u64, max_rate_mbps: f64) -> Self {
        Self {
            downloaded_bytes,
            elapsed_millis,
            max_rate_mbps,
        }
    }

    /// A zero-throughput result for runs that received no data.
    #[must_use]
    pub const fn empty(elapsed_millis: u64) -> Self {
        Self {
            downloaded_bytes: 0,
            elapsed_millis,
            max_rate_mbps: 0.0,
        }
    }

    /// Returns the downloaded volume in megabytes.
    #[must_use]
    pub fn downloaded_mb(&self) -> f64 {
        self.downloaded_bytes as f64 / BYTES_PER_MB
    }

    /// Returns true if the run received no data at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.downloaded_bytes == 0
    }
}

impl std::fmt::Display for SpeedtestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} MB in {} ms, peak {:.2} MB/s",
            self.downloaded_mb(),
            self.elapsed_millis,
            self.max_rate_mbps
        )
    }
}
