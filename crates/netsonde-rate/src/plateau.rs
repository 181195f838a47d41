//! Plateau detection: the probe's early-stopping rule.

use netsonde_types::Measurement;

use crate::window::{BUCKET_MILLIS, MIN_BUCKET_SAMPLES, SpanMode, bucket_rates};

/// Elapsed time before the first plateau evaluation, in milliseconds.
///
/// TCP slow-start and early variance make the first seconds unreliable; the
/// probe always measures through this warm-up before considering a stop.
pub const WARMUP_MILLIS: u64 = 10_000;

/// Number of trailing completed buckets forming the "recent" window.
pub const RECENT_WINDOW_BUCKETS: usize = 3;

/// Decides when additional measurement time has stopped paying off.
///
/// Once per newly crossed second boundary (after the warm-up), the detector
/// compares the peak rate of the last [`RECENT_WINDOW_BUCKETS`] completed
/// buckets against the peak of everything before them. If an earlier bucket
/// strictly beats the entire recent window, throughput has stopped improving
/// and the probe can stop. Equal peaks do not stop the probe.
#[derive(Debug, Default)]
pub struct PlateauDetector {
    last_evaluated_second: Option<u64>,
}

impl PlateauDetector {
    /// Creates a detector with no evaluations performed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the stopping rule, edge-triggered on the second counter.
    ///
    /// Returns true if the probe should stop. The comparison runs only the
    /// first time `elapsed_millis` crosses into a new second; repeated calls
    /// within the same second return false without recomputing, so the hot
    /// read loop can call this per chunk.
    pub fn should_stop(&mut self, measurements: &[Measurement], elapsed_millis: u64) -> bool {
        if elapsed_millis < WARMUP_MILLIS {
            return false;
        }

        let second = elapsed_millis / BUCKET_MILLIS;
        if self.last_evaluated_second.is_some_and(|s| s >= second) {
            return false;
        }
        self.last_evaluated_second = Some(second);

        plateau_reached(measurements, second)
    }
}

/// Compares the recent completed buckets against all earlier ones.
fn plateau_reached(measurements: &[Measurement], current_second: u64) -> bool {
    let completed: Vec<f64> = bucket_rates(measurements, SpanMode::Fixed(BUCKET_MILLIS))
        .into_iter()
        .filter(|b| b.index < current_second && b.sample_count >= MIN_BUCKET_SAMPLES)
        .map(|b| b.rate_mbps)
        .collect();

    // Without at least one bucket older than the recent window there is no
    // prior peak to compare against.
    if completed.len() <= RECENT_WINDOW_BUCKETS {
        return false;
    }

    let (prior, recent) = completed.split_at(completed.len() - RECENT_WINDOW_BUCKETS);
    let prior_peak = prior.iter().copied().fold(0.0, f64::max);
    let recent_peak = recent.iter().copied().fold(0.0, f64::max);

    prior_peak > recent_peak
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1_048_576;

    /// Builds a measurement sequence from per-second rates (MB/s), ten
    /// samples per second.
    fn measurements_from_rates(rates_mbps: &[f64]) -> Vec<Measurement> {
        let mut measurements = Vec::new();
        let mut cumulative = 0.0;
        for (second, rate) in rates_mbps.iter().enumerate() {
            let chunk = rate * MB as f64 / 10.0;
            for i in 0..10 {
                cumulative += chunk;
                let elapsed = second as u64 * 1000 + i * 100;
                measurements.push(Measurement::new(elapsed, cumulative as u64));
            }
        }
        measurements
    }

    #[test]
    fn test_no_evaluation_before_warmup() {
        // Sharply regressing rates would trigger a stop if evaluated.
        let measurements = measurements_from_rates(&[9.0, 8.0, 7.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let mut detector = PlateauDetector::new();
        assert!(!detector.should_stop(&measurements, 9_999));
    }

    #[test]
    fn test_stops_on_regression_after_warmup() {
        let rates = [9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 2.0, 2.0, 2.0];
        let measurements = measurements_from_rates(&rates);
        let mut detector = PlateauDetector::new();
        // Recent window is buckets 7..9 at 2 MB/s; prior peak is 9 MB/s.
        assert!(detector.should_stop(&measurements, 10_000));
    }

    #[test]
    fn test_equal_rates_do_not_stop() {
        let rates = [5.0; 12];
        let measurements = measurements_from_rates(&rates);
        let mut detector = PlateauDetector::new();
        assert!(!detector.should_stop(&measurements, 12_000));
    }

    #[test]
    fn test_improving_rates_do_not_stop() {
        let rates = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let measurements = measurements_from_rates(&rates);
        let mut detector = PlateauDetector::new();
        assert!(!detector.should_stop(&measurements, 10_000));
    }

    #[test]
    fn test_edge_triggered_once_per_second() {
        let rates = [9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 2.0];
        let measurements = measurements_from_rates(&rates);
        let mut detector = PlateauDetector::new();

        assert!(!detector.should_stop(&measurements, 10_050));
        // Same second again: suppressed regardless of data.
        assert!(!detector.should_stop(&measurements, 10_900));
        // New second: evaluated again. Recent window 9..11 still contains
        // 9 MB/s buckets, so no stop yet.
        assert!(!detector.should_stop(&measurements, 11_020));
    }

    #[test]
    fn test_degenerate_buckets_excluded_from_comparison() {
        // Bucket 10 has a single sample. If it counted as a recent bucket,
        // the 6 MB/s spike in bucket 7 would slide out of the recent window
        // and trigger a premature stop.
        let rates = [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 6.0, 5.0, 5.0];
        let mut measurements = measurements_from_rates(&rates);
        let last = measurements.last().unwrap().cumulative_bytes;
        measurements.push(Measurement::new(10_500, last + MB));

        let mut detector = PlateauDetector::new();
        assert!(!detector.should_stop(&measurements, 11_000));
    }

    #[test]
    fn test_no_stop_without_prior_buckets() {
        // Exactly three completed buckets: the whole history is the recent
        // window, so there is nothing to compare against.
        let measurements = measurements_from_rates(&[4.0, 4.0, 4.0]);
        let mut detector = PlateauDetector::new();
        assert!(!detector.should_stop(&measurements, 10_000));
    }
}
