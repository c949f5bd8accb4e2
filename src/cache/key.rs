//! Cache key encoding
//!
//! Cache keys are opaque strings chosen by fetchers (commit SHAs, image
//! digests like `sha256:...`, chart versions). They are stored on disk as
//! base64 so any key becomes a single safe path segment.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

/// Encode a cache key into a directory name.
///
/// Uses the URL-safe alphabet with padding, so the result never contains
/// `/` or `:`.
pub fn encode_key(id: &str) -> String {
    URL_SAFE.encode(id.as_bytes())
}
