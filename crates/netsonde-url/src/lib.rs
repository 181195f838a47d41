//! Probe URL normalization for netsonde.
//!
//! Probe targets arrive in several shapes: base64-encoded payloads from
//! configuration files, bare hostnames without a scheme, and directory paths
//! missing their trailing slash. [`normalize`] canonicalizes all of them into
//! a fetchable URL string before the probe sees them.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/netsonde/netsonde/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod normalize;

pub use normalize::{NormalizeError, normalize};
