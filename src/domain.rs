/// Domain validation for Preview Launcher
use url::Url;

use crate::config::ALLOWED_DOMAINS;
use crate::error::{PopupError, PopupResult};

/// Parse a URL and check its host against the allowed domains
///
/// Rules:
/// 1. The input must parse as an absolute URL
/// 2. It must have a hostname (so `mailto:` and `data:` URLs are rejected)
/// 3. The hostname must end with one of `ALLOWED_DOMAINS`
///
/// The check is a plain suffix match, so any subdomain passes:
/// - https://www.cardcritics.com/path → ok
/// - https://l-www.gobankingrates.com → ok
/// - https://example.com → DisallowedDomain
/// - not a url → InvalidUrl
pub fn validate_url(input: &str) -> PopupResult<Url> {
    let url = Url::parse(input).map_err(|e| PopupError::InvalidUrl(format!("{}: {}", input, e)))?;

    let hostname = extract_hostname(&url).ok_or_else(|| PopupError::DisallowedDomain(input.to_string()))?;

    if is_allowed_host(hostname) {
        Ok(url)
    } else {
        Err(PopupError::DisallowedDomain(hostname.to_string()))
    }
}

/// Boolean form of `validate_url`; never fails
pub fn is_valid_domain(input: &str) -> bool {
    validate_url(input).is_ok()
}

/// Check a bare hostname against the allow-list
pub fn is_allowed_host(hostname: &str) -> bool {
    ALLOWED_DOMAINS
        .iter()
        .any(|allowed| hostname.ends_with(allowed))
}

fn extract_hostname(url: &Url) -> Option<&str> {
    url.host_str().filter(|host| !host.is_empty())
}
