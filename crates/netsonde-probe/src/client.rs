//! HTTP client for probe downloads.

use std::time::Duration;

use netsonde_types::ProbeError;
use reqwest::header::REFERER;
use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

/// Configuration for the probe HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connection timeout (separate from streaming, which the probe bounds
    /// itself).
    pub connect_timeout: Duration,
    /// How long idle pooled connections are kept alive for reuse.
    pub pool_idle_timeout: Duration,
    /// TCP keepalive interval.
    pub tcp_keepalive: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: format!("netsonde/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client with connection reuse and a single referer fallback.
///
/// Built once and shared across probe runs to benefit from keep-alive
/// pooling. The fallback never mutates the client's default headers, so one
/// client is safe for concurrent independent probes.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Creates a new probe client with the given configuration.
    ///
    /// Transparent content decompression is deliberately left off: the probe
    /// measures wire throughput, and decoded byte counts would inflate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(config.pool_idle_timeout)
            // Disable Nagle's algorithm for lower latency
            .tcp_nodelay(true)
            .tcp_keepalive(config.tcp_keepalive)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(&ClientConfig::default())
    }

    /// Opens the probe stream: a GET whose body has not been consumed yet.
    ///
    /// If the direct request is not usable - a non-success status, or a
    /// redirect moved us off the requested URL - the GET is re-issued once
    /// with a `Referer` header naming the URL's directory one level up.
    /// Origin servers that reject hotlinked fetches commonly accept
    /// same-site-referred ones. The header is a per-request override; no
    /// client state is touched.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidUrl`] for unparseable input,
    /// [`ProbeError::Connection`] when a request cannot be sent, and
    /// [`ProbeError::Rejected`] when the fallback response is still not a
    /// success. There is no further retry.
    pub async fn open(&self, url: &str) -> Result<Response, ProbeError> {
        let requested =
            Url::parse(url).map_err(|e| ProbeError::InvalidUrl(format!("{url}: {e}")))?;

        let direct = self
            .client
            .get(requested.clone())
            .send()
            .await
            .map_err(|e| ProbeError::Connection(e.to_string()))?;

        if direct.status().is_success() && *direct.url() == requested {
            return Ok(direct);
        }

        let referer = parent_directory(&requested);
        debug!(
            status = direct.status().as_u16(),
            referer = %referer,
            "direct request not usable, retrying with referer"
        );

        let fallback = self
            .client
            .get(requested)
            .header(REFERER, referer.as_str())
            .send()
            .await
            .map_err(|e| ProbeError::Connection(e.to_string()))?;

        if !fallback.status().is_success() {
            return Err(ProbeError::Rejected {
                status: fallback.status().as_u16(),
            });
        }

        Ok(fallback)
    }
}

/// Returns the URL's directory one level up, query and fragment dropped.
///
/// `/a/b/file` becomes `/a/b/`, `/a/b/` becomes `/a/`, and the root stays
/// the root.
fn parent_directory(url: &Url) -> Url {
    let mut parent = url.clone();
    if let Ok(mut segments) = parent.path_segments_mut() {
        segments.pop_if_empty().pop().push("");
    }
    parent.set_query(None);
    parent.set_fragment(None);
    parent
}
