//! The probe orchestrator: streaming measurement loop and aggregation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use netsonde_rate::{PlateauDetector, Sampler, peak_rate};
use netsonde_types::{ProbeError, Result, SpeedtestResult};
use tokio::time::Instant;
use tracing::debug;

use crate::cancel::CancelFlag;
use crate::client::ProbeClient;
use crate::log::{ProbeLog, TracingLog};

/// Default hard cap on probe duration.
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(25);

/// Configuration for a probe run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Hard cap on the streaming phase. Always enforced, plateau or not.
    pub max_duration: Duration,
    /// Optional stall guard: the longest the probe waits for a single chunk
    /// before giving up on the connection. Each wait is additionally bounded
    /// by the time remaining to the hard cap, so `None` still cannot block
    /// past the cap.
    pub read_timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_duration: DEFAULT_MAX_DURATION,
            read_timeout: None,
        }
    }
}

impl ProbeConfig {
    /// Creates a config with the given hard cap in whole seconds.
    #[must_use]
    pub const fn with_max_seconds(seconds: u64) -> Self {
        Self {
            max_duration: Duration::from_secs(seconds),
            read_timeout: None,
        }
    }
}

/// Why the measurement loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopReason {
    /// The hard duration cap was reached.
    DurationCap,
    /// Throughput plateaued; continuing would not raise the peak.
    Plateau,
    /// The stream was exhausted before any cap was hit.
    StreamEnd,
    /// No chunk arrived within the stall guard.
    Stalled,
    /// The caller cancelled the run.
    Cancelled,
}

impl StopReason {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::DurationCap => "duration cap",
            Self::Plateau => "plateau",
            Self::StreamEnd => "stream end",
            Self::Stalled => "stalled",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Adaptive single-stream throughput probe.
///
/// One `run` measures one URL: open the stream (with the client's referer
/// fallback), read it chunk by chunk while sampling cumulative bytes, stop on
/// the hard cap, a throughput plateau, stream end, stall, or cancellation,
/// and aggregate the peak one-second rate. Each run owns its measurement
/// sequence, stopwatch, and response stream; a probe holds no shared mutable
/// state, so independent runs may proceed concurrently over one client.
pub struct SpeedProbe {
    client: ProbeClient,
    config: ProbeConfig,
    log: Arc<dyn ProbeLog>,
}

impl fmt::Debug for SpeedProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeedProbe")
            .field("client", &self.client)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SpeedProbe {
    /// Creates a probe logging through `tracing`.
    #[must_use]
    pub fn new(client: ProbeClient, config: ProbeConfig) -> Self {
        Self::with_log(client, config, Arc::new(TracingLog))
    }

    /// Creates a probe with an injected logging sink.
    #[must_use]
    pub fn with_log(client: ProbeClient, config: ProbeConfig, log: Arc<dyn ProbeLog>) -> Self {
        Self {
            client,
            config,
            log,
        }
    }

    /// Probes the given URL.
    ///
    /// # Errors
    ///
    /// Propagates connection, rejection, and mid-stream read errors. An
    /// empty body is not an error; it yields a zero-throughput result.
    pub async fn run(&self, url: &str) -> Result<SpeedtestResult> {
        self.run_cancellable(url, &CancelFlag::new()).await
    }

    /// Probes the given URL with a cooperative cancellation flag.
    ///
    /// Cancellation takes effect at the next chunk boundary and aggregates
    /// whatever was measured up to that point.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_cancellable(&self, url: &str, cancel: &CancelFlag) -> Result<SpeedtestResult> {
        let response = self.client.open(url).await?;
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ProbeError::Stream(e.to_string())));

        // The stream (and with it the response and its connection) is
        // dropped on every exit path out of `measure`, error or not.
        let (result, stop) = measure(&self.config, stream, cancel).await?;
        debug!(url, stop = stop.as_str(), "probe stream finished");

        if result.is_empty() {
            self.log
                .warn(&format!("nothing downloaded from {url}; reporting zero throughput"));
        } else {
            self.log.info(&format!("speedtest complete: {result}"));
        }

        Ok(result)
    }
}

/// Drives the measurement loop over an open chunk stream.
///
/// One outstanding read at a time; every wait is bounded by the time
/// remaining to the hard cap (and the stall guard, when configured), so a
/// silent connection cannot hold the probe past the cap.
pub(crate) async fn measure<S>(
    config: &ProbeConfig,
    stream: S,
    cancel: &CancelFlag,
) -> Result<(SpeedtestResult, StopReason)>
where
    S: Stream<Item = std::result::Result<Bytes, ProbeError>>,
{
    futures::pin_mut!(stream);

    let stopwatch = Instant::now();
    let mut sampler = Sampler::new();
    let mut plateau = PlateauDetector::new();
    let cap_millis = config.max_duration.as_millis() as u64;

    let stop = loop {
        if cancel.is_cancelled() {
            break StopReason::Cancelled;
        }

        let elapsed = stopwatch.elapsed();
        if elapsed >= config.max_duration {
            break StopReason::DurationCap;
        }
        let remaining = config.max_duration - elapsed;
        let wait = config.read_timeout.map_or(remaining, |t| t.min(remaining));

        match tokio::time::timeout(wait, stream.next()).await {
            Err(_) => {
                break if stopwatch.elapsed() >= config.max_duration {
                    StopReason::DurationCap
                } else {
                    StopReason::Stalled
                };
            }
            Ok(None) => break StopReason::StreamEnd,
            Ok(Some(Err(e))) => return Err(e),
            Ok(Some(Ok(chunk))) => {
                let elapsed_millis = stopwatch.elapsed().as_millis() as u64;
                sampler.record(elapsed_millis, chunk.len());

                if elapsed_millis >= cap_millis {
                    break StopReason::DurationCap;
                }
                if plateau.should_stop(sampler.measurements(), elapsed_millis) {
                    break StopReason::Plateau;
                }
            }
        }
    };

    let elapsed_millis = stopwatch.elapsed().as_millis() as u64;
    let result = if sampler.is_empty() {
        SpeedtestResult::empty(elapsed_millis)
    } else {
        SpeedtestResult::new(
            sampler.downloaded_bytes(),
            elapsed_millis,
            peak_rate(sampler.measurements()),
        )
    };

    Ok((result, stop))
}
