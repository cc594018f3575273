//! URL handling for kumoweb
//!
//! Domains here are network authorities (host, plus port when explicit):
//! the sharding key for rate-limit buckets and robots records.

use url::Url;

/// Extracts the authority (host[:port]) from a URL
///
/// The host is lowercased. The port is included only when it is explicit
/// and non-default for the scheme, matching how the rest of the crate
/// shards per-domain state.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use kumoweb::url::authority;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Builds the robots.txt URL for the authority of the given URL
///
/// Keeps the scheme and authority, replaces path/query/fragment with
/// `/robots.txt`.
pub fn robots_url(url: &Url) -> Url {
    let mut robots = url.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    robots
}

/// Resolves a possibly-relative link against the page it was found on
///
/// Returns None for hrefs that do not form a valid URL (javascript:,
/// malformed fragments and the like are simply dropped).
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}
