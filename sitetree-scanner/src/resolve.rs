//! Reference resolution and domain scoping.
//!
//! A canonical URL is an absolute [`Url`] with its fragment cleared. Identity
//! for deduplication is the canonical string form.

use crate::error::{Result, ScanError};
use url::Url;

/// Parse the seed URL of a crawl into its canonical form.
///
/// The seed must be absolute and carry a host, since the host is what scopes
/// the crawl.
pub fn parse_seed(seed: &str) -> Result<Url> {
    let mut url = Url::parse(seed).map_err(|source| ScanError::InvalidUrl {
        url: seed.to_string(),
        source,
    })?;

    if url.host_str().is_none() {
        return Err(ScanError::MissingHost(seed.to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolve `reference` (relative or absolute) against `base` and clear the
/// fragment.
pub fn resolve(reference: &str, base: &Url) -> Result<Url> {
    let mut url = base.join(reference).map_err(|source| ScanError::InvalidUrl {
        url: reference.to_string(),
        source,
    })?;
    url.set_fragment(None);
    Ok(url)
}

/// Host-only comparison. Scheme and port are ignored.
pub fn same_domain(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str()
}
