//! Per-chunk measurement bookkeeping.

use netsonde_types::Measurement;

/// Initial capacity of the measurement log.
///
/// High-throughput links produce thousands of chunk reads over a 25-second
/// probe; pre-sizing avoids reallocation churn in the hot read loop.
pub const SAMPLE_CAPACITY: usize = 10_000;

/// Append-only log of throughput measurements for a single probe run.
///
/// The sampler owns its measurement sequence exclusively; it is discarded
/// with the run once the aggregate result has been derived.
#[derive(Debug)]
pub struct Sampler {
    measurements: Vec<Measurement>,
}

impl Sampler {
    /// Creates a sampler pre-sized to [`SAMPLE_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(SAMPLE_CAPACITY)
    }

    /// Creates a sampler with an explicit initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            measurements: Vec::with_capacity(capacity),
        }
    }

    /// Records one chunk read at the given elapsed time on the run clock.
    ///
    /// Appends a measurement whose cumulative byte count is the previous
    /// total plus `bytes_read`. Pure bookkeeping; no error conditions.
    pub fn record(&mut self, elapsed_millis: u64, bytes_read: usize) {
        let cumulative = self.downloaded_bytes() + bytes_read as u64;
        self.measurements
            .push(Measurement::new(elapsed_millis, cumulative));
    }

    /// Returns the recorded measurement sequence.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Returns the cumulative byte count of the last measurement, or 0.
    #[must_use]
    pub fn downloaded_bytes(&self) -> u64 {
        self.measurements
            .last()
            .map_or(0, |m| m.cumulative_bytes)
    }

    /// Returns the number of measurements recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Returns true if no measurements have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
