//! One-second bucket rate estimation.

use netsonde_types::Measurement;

/// Width of a rate bucket in milliseconds.
pub const BUCKET_MILLIS: u64 = 1_000;

/// Number of bytes per megabyte as reported by the probe (mebibyte).
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Minimum samples a bucket needs before its rate is meaningful.
///
/// A single-sample bucket spans no time and always yields a degenerate zero
/// rate; comparisons and peak aggregation skip such buckets.
pub const MIN_BUCKET_SAMPLES: usize = 2;

/// How the time span of a bucket is determined when computing its rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanMode {
    /// The actual elapsed span between the bucket's first and last sample.
    ///
    /// Accurate for post-hoc inspection, but noisy during the run: a bucket
    /// with few samples near a boundary covers a tiny span and produces an
    /// inflated instantaneous rate.
    Actual,
    /// A fixed span in milliseconds, regardless of where the bucket's
    /// samples actually fall. Probe-time evaluation uses
    /// `Fixed(BUCKET_MILLIS)`.
    Fixed(u64),
}

/// The instantaneous rate of one one-second bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketRate {
    /// Bucket index (`elapsed_millis / 1000` of its samples).
    pub index: u64,
    /// Number of measurements that fell into this bucket.
    pub sample_count: usize,
    /// Rate over the bucket in MB/s; 0 for degenerate buckets.
    pub rate_mbps: f64,
}

/// Groups measurements into one-second buckets and computes a rate per bucket.
///
/// The measurement sequence is append-only and ordered by elapsed time, so
/// buckets come out ordered by index. Buckets for seconds with no samples are
/// simply absent. Every bucket is returned, including degenerate
/// single-sample ones; callers that compare rates filter on
/// [`MIN_BUCKET_SAMPLES`].
#[must_use]
pub fn bucket_rates(measurements: &[Measurement], span: SpanMode) -> Vec<BucketRate> {
    let mut rates = Vec::new();
    let mut remaining = measurements;

    while let Some(first) = remaining.first() {
        let index = first.bucket_index();
        let len = remaining
            .iter()
            .position(|m| m.bucket_index() != index)
            .unwrap_or(remaining.len());
        let (bucket, rest) = remaining.split_at(len);
        rates.push(bucket_rate(index, bucket, span));
        remaining = rest;
    }

    rates
}

/// Returns the peak fixed-span bucket rate of a run, in MB/s.
///
/// Buckets with fewer than [`MIN_BUCKET_SAMPLES`] measurements are excluded.
/// An empty (or all-degenerate) sequence yields 0.
#[must_use]
pub fn peak_rate(measurements: &[Measurement]) -> f64 {
    bucket_rates(measurements, SpanMode::Fixed(BUCKET_MILLIS))
        .into_iter()
        .filter(|b| b.sample_count >= MIN_BUCKET_SAMPLES)
        .map(|b| b.rate_mbps)
        .fold(0.0, f64::max)
}

/// Computes the rate of one bucket's samples.
fn bucket_rate(index: u64, bucket: &[Measurement], span: SpanMode) -> BucketRate {
    let (first, last) = (bucket[0], bucket[bucket.len() - 1]);
    let span_millis = match span {
        SpanMode::Actual => last.elapsed_millis - first.elapsed_millis,
        SpanMode::Fixed(millis) => millis,
    };

    let rate_mbps = if span_millis == 0 {
        0.0
    } else {
        let delta_bytes = (last.cumulative_bytes - first.cumulative_bytes) as f64;
        (delta_bytes / BYTES_PER_MB) / (span_millis as f64 / 1000.0)
    };

    BucketRate {
        index,
        sample_count: bucket.len(),
        rate_mbps,
    }
}
