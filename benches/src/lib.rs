//! Benchmark utilities for netsonde.

use netsonde_types::Measurement;

/// Builds a measurement sequence at a constant rate.
///
/// Produces `samples_per_second` evenly spaced measurements per second for
/// `seconds` seconds, accumulating bytes at `rate_mbps` megabytes per second.
pub fn constant_rate_measurements(
    seconds: u64,
    rate_mbps: f64,
    samples_per_second: u64,
) -> Vec<Measurement> {
    ramp_measurements(seconds, rate_mbps, rate_mbps, samples_per_second)
}

/// Builds a measurement sequence whose rate ramps linearly.
///
/// The per-second rate moves from `start_mbps` to `end_mbps` across the run;
/// useful for exercising the plateau comparison on non-flat profiles.
pub fn ramp_measurements(
    seconds: u64,
    start_mbps: f64,
    end_mbps: f64,
    samples_per_second: u64,
) -> Vec<Measurement> {
    let interval_millis = 1000 / samples_per_second.max(1);
    let mut measurements = Vec::with_capacity((seconds * samples_per_second) as usize);
    let mut cumulative = 0.0_f64;

    for second in 0..seconds {
        let progress = if seconds > 1 {
            second as f64 / (seconds - 1) as f64
        } else {
            0.0
        };
        let rate_mbps = start_mbps + (end_mbps - start_mbps) * progress;
        let chunk_bytes = rate_mbps * 1_048_576.0 / samples_per_second as f64;

        for sample in 0..samples_per_second {
            cumulative += chunk_bytes;
            let elapsed = second * 1000 + sample * interval_millis;
            measurements.push(Measurement::new(elapsed, cumulative as u64));
        }
    }

    measurements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_rate_shape() {
        let measurements = constant_rate_measurements(5, 8.0, 10);
        assert_eq!(measurements.len(), 50);
        assert!(measurements.windows(2).all(|w| {
            w[0].elapsed_millis < w[1].elapsed_millis
                && w[0].cumulative_bytes <= w[1].cumulative_bytes
        }));
    }

    #[test]
    fn test_ramp_ends_higher() {
        let measurements = ramp_measurements(10, 1.0, 10.0, 10);
        let first_second = measurements[9].cumulative_bytes;
        let last_second =
            measurements[99].cumulative_bytes - measurements[90].cumulative_bytes;
        assert!(last_second > first_second);
    }
}
