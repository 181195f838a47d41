//! Filesystem-safe names derived from probe targets.

/// Longest slug produced, keeping derived filenames comfortably portable.
const MAX_SLUG_LEN: usize = 64;

/// Reduces arbitrary input (typically a probe URL) to a filesystem-safe slug.
///
/// Alphanumerics are kept (lowercased); every other run of characters
/// collapses to a single `-`. The scheme separator is dropped entirely so
/// `https://` does not leave a leading dash. Empty input yields `"probe"`.
///
/// # Example
///
/// ```
/// use netsonde_session::file_slug;
///
/// assert_eq!(file_slug("https://cdn.example.com/files/"), "cdn-example-com-files");
/// ```
#[must_use]
pub fn file_slug(input: &str) -> String {
    let stripped = input.split_once("://").map_or(input, |(_, rest)| rest);

    let mut slug = String::with_capacity(stripped.len());
    let mut last_was_dash = false;

    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && !slug.is_empty() {
            slug.push('-');
            last_was_dash = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "probe".to_string()
    } else {
        slug
    }
}
