//! Adaptive single-stream throughput probe.
//!
//! This crate drives a probe run end to end:
//!
//! - [`ProbeClient`] - HTTP client with connection reuse and a single
//!   referer fallback for origins that reject direct fetches
//! - [`SpeedProbe`] - Opens the stream, samples every chunk, stops on the
//!   hard duration cap or once throughput plateaus, and aggregates the
//!   final [`SpeedtestResult`](netsonde_types::SpeedtestResult)
//! - [`CancelFlag`] - Cooperative cancellation checked at chunk boundaries
//! - [`ProbeLog`] - Injected completion-logging capability with a
//!   `tracing`-backed default

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/netsonde/netsonde/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cancel;
mod client;
mod log;
mod probe;

pub use cancel::CancelFlag;
pub use client::{ClientConfig, ProbeClient};
pub use log::{ProbeLog, TracingLog};
pub use probe::{DEFAULT_MAX_DURATION, ProbeConfig, SpeedProbe};
