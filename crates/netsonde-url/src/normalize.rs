//! Canonicalization of raw probe target input.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use url::Url;

/// Scheme assumed when the input carries none.
const DEFAULT_SCHEME: &str = "https";

/// Error for input that cannot be turned into a fetchable URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The input does not parse as a URL even after normalization.
    #[error("'{input}' is not a valid URL: {source}")]
    Invalid {
        /// The normalized candidate that failed to parse.
        input: String,
        /// The underlying parse error.
        source: url::ParseError,
    },
}

/// Normalizes raw probe target input into a fetchable URL string.
///
/// Three transforms, applied in order:
///
/// 1. Strict base64 input (standard alphabet, padded) decoding to UTF-8 is
///    decoded; anything else is taken literally. Real URLs contain `.` or
///    `:`, which are outside the base64 alphabet, so plain URLs pass through.
/// 2. Input without a scheme gets `https://` prepended.
/// 3. An extensionless, query-less final path segment gets a directory-style
///    trailing slash.
///
/// # Example
///
/// ```
/// use netsonde_url::normalize;
///
/// assert_eq!(normalize("example.com/files").unwrap(), "https://example.com/files/");
/// assert_eq!(
///     normalize("aHR0cHM6Ly9leGFtcGxlLmNvbS9kYXRh").unwrap(),
///     "https://example.com/data/"
/// );
/// ```
///
/// # Errors
///
/// Returns [`NormalizeError::Invalid`] if the input still does not parse as
/// a URL after the transforms above.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    let trimmed = raw.trim();
    let input = decode_base64(trimmed).unwrap_or_else(|| trimmed.to_string());

    let candidate = if input.contains("://") {
        input
    } else {
        format!("{DEFAULT_SCHEME}://{input}")
    };

    let mut url = Url::parse(&candidate).map_err(|source| NormalizeError::Invalid {
        input: candidate.clone(),
        source,
    })?;

    if needs_trailing_slash(&url) {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url.to_string())
}

/// Attempts a strict base64 decode of the whole input.
///
/// Returns the decoded text only when the input is valid padded standard
/// base64 AND the payload is non-empty UTF-8.
fn decode_base64(raw: &str) -> Option<String> {
    let bytes = STANDARD.decode(raw).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let decoded = decoded.trim();
    (!decoded.is_empty()).then(|| decoded.to_string())
}

/// True when the final path segment is extensionless and there is no query.
fn needs_trailing_slash(url: &Url) -> bool {
    if url.query().is_some() {
        return false;
    }
    let path = url.path();
    if path.ends_with('/') {
        return false;
    }
    let last_segment = path.rsplit('/').next().unwrap_or("");
    !last_segment.contains('.')
}
