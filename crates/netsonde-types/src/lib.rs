//! Core types for the netsonde throughput probe.
//!
//! This crate provides the fundamental data structures used throughout
//! netsonde:
//!
//! - [`Measurement`] - A time-stamped cumulative-bytes sample taken per chunk
//! - [`SpeedtestResult`] - The aggregate output of a single probe run
//! - [`ProbeError`] - Errors a probe run can fail with

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/netsonde/netsonde/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod measurement;
mod result;

pub use error::{ProbeError, Result};
pub use measurement::Measurement;
pub use result::SpeedtestResult;
