//! Persisted probe sessions for netsonde.
//!
//! This crate provides the session layer around the probe:
//!
//! - [`ProbeRecord`] - One probe run: target, timestamps, status, result
//! - [`SessionStore`] - JSON-file persistence under the platform data dir
//! - [`file_slug`] - Filesystem-safe names derived from probe targets

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/netsonde/netsonde/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod path;
mod record;
mod store;

pub use path::file_slug;
pub use record::{ProbeRecord, RecordId, RecordStatus};
pub use store::{Result, SessionStore, StoreError};
