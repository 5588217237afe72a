//! Site identity resolution.
//!
//! Reactions are addressed by whatever the embedding page sends: a full page
//! URL, a bare host, or a percent-encoded copy of either. All of these are
//! reduced to one lowercase hostname so that every page of a site shares the
//! same counters.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::{Host, Url};

/// DNS labels separated by dots, ending in a punycode or alphabetic TLD.
///
/// The punycode branch comes first so `xn--p1ai` is not cut down to `xn`.
const HOSTNAME_PATTERN: &str =
    r"(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+(?:xn--[a-z0-9-]{1,59}|[a-z]{2,63})";

/// Finds a hostname anywhere in free text.
static HOSTNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){HOSTNAME_PATTERN}")).unwrap());

/// Accepts a host only if it is a hostname from end to end.
static EXACT_HOSTNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i)^(?:{HOSTNAME_PATTERN})$")).unwrap());

/// Errors that can occur during hostname resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostnameError {
    #[error("no hostname found")]
    NoHostnameFound,
}

/// Canonical, lowercase hostname identifying a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hostname(String);

impl Hostname {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolves an arbitrary caller-supplied string to a site hostname.
///
/// # Resolution Rules
///
/// 1. **Decoding**: the input is percent-decoded once
/// 2. **URLs**: `http`/`https` URLs, and inputs that parse as one once the
///    scheme is added, use the parsed host, so ports, credentials and
///    internationalized names are handled by the URL parser. That host must
///    be a hostname as a whole; it is never cut down to a parent domain
/// 3. **Anything else**: the first hostname-shaped substring is taken
/// 4. **Case**: the result is lowercased
///
/// # Errors
///
/// Returns [`HostnameError::NoHostnameFound`] when no hostname can be found.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(resolve_hostname("https://example.com/page?x=1")?.as_str(), "example.com");
/// assert_eq!(resolve_hostname("https%3A%2F%2Fexample.com%2F")?.as_str(), "example.com");
/// assert!(resolve_hostname("not a url").is_err());
/// ```
pub fn resolve_hostname(raw: &str) -> Result<Hostname, HostnameError> {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let decoded = decoded.trim();

    let parsed = match parse_url(decoded) {
        Some(url) => Some(url),
        None if !decoded.contains("://") => parse_url(&format!("http://{decoded}")),
        None => None,
    };

    let hostname = match parsed {
        Some(url) => match url.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.trim_end_matches('.');
                EXACT_HOSTNAME_REGEX
                    .is_match(domain)
                    .then(|| domain.to_ascii_lowercase())
            }
            Some(Host::Ipv4(_) | Host::Ipv6(_)) | None => None,
        },
        None => HOSTNAME_REGEX
            .find(decoded)
            .map(|m| m.as_str().to_ascii_lowercase()),
    };

    hostname.map(Hostname).ok_or(HostnameError::NoHostnameFound)
}

fn parse_url(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
