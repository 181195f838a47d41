//! Windowed rate estimation and plateau detection for the netsonde probe.
//!
//! This crate holds the measurement math of a probe run:
//!
//! - [`Sampler`] - Append-only log of per-chunk measurements
//! - [`bucket_rates`] - Per-second instantaneous rates from the measurement log
//! - [`peak_rate`] - The peak one-second rate of a run
//! - [`PlateauDetector`] - The stopping rule that ends a probe once the
//!   measured rate stops improving
//!
//! Everything here is pure bookkeeping over in-memory measurement sequences;
//! no I/O, no clocks.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/netsonde/netsonde/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod plateau;
mod sampler;
mod window;

pub use plateau::{PlateauDetector, RECENT_WINDOW_BUCKETS, WARMUP_MILLIS};
pub use sampler::{SAMPLE_CAPACITY, Sampler};
pub use window::{
    BUCKET_MILLIS, BYTES_PER_MB, BucketRate, MIN_BUCKET_SAMPLES, SpanMode, bucket_rates, peak_rate,
};
