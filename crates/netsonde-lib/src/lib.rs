//! Adaptive network throughput probe library.
//!
//! This is a facade crate that re-exports functionality from the netsonde
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use netsonde_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = normalize("speed.example.com/100MB")?;
//!     let client = ProbeClient::with_defaults()?;
//!     let probe = SpeedProbe::new(client, ProbeConfig::default());
//!
//!     let result = probe.run(&url).await?;
//!     println!("{result}");
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/netsonde/netsonde/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use netsonde_types::*;

// Re-export rate estimation and the probe
#[cfg(feature = "probe")]
pub use netsonde_rate::{
    BucketRate, PlateauDetector, Sampler, SpanMode, bucket_rates, peak_rate,
};

#[cfg(feature = "probe")]
pub use netsonde_probe::{
    CancelFlag, ClientConfig, ProbeClient, ProbeConfig, ProbeLog, SpeedProbe, TracingLog,
};

// Re-export URL normalization
#[cfg(feature = "url")]
pub use netsonde_url::{NormalizeError, normalize};

// Re-export session persistence
#[cfg(feature = "session")]
pub use netsonde_session::{ProbeRecord, RecordStatus, SessionStore, StoreError, file_slug};

/// Prelude module for convenient imports.
///
/// ```
/// use netsonde_lib::prelude::*;
/// ```
pub mod prelude {
    pub use netsonde_types::{Measurement, ProbeError, Result, SpeedtestResult};

    #[cfg(feature = "probe")]
    pub use netsonde_probe::{CancelFlag, ClientConfig, ProbeClient, ProbeConfig, SpeedProbe};

    #[cfg(feature = "url")]
    pub use netsonde_url::normalize;

    #[cfg(feature = "session")]
    pub use netsonde_session::{ProbeRecord, SessionStore};
}
