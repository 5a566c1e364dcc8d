use url::Url;

/// Extracts the host of a URL exactly as it is written
///
/// The URL must parse and must have a host. The host is then sliced out of
/// the input text itself, so its letter case is kept even though the URL
/// parser lowercases hosts of `http` and `https` URLs. Credentials and the
/// port are not part of the host.
///
/// # Returns
///
/// * `Some(&str)` - The host as written
/// * `None` - If the URL does not parse or has no host (e.g. `mailto:` or
///   `data:` URLs)
///
/// # Examples
///
/// ```
/// use page_harvest::url::extract_domain;
///
/// assert_eq!(extract_domain("https://example.com:8443/path"), Some("example.com"));
/// assert_eq!(extract_domain("http://Example.COM/"), Some("Example.COM"));
/// assert_eq!(extract_domain("mailto:someone@example.com"), None);
/// ```
pub fn extract_domain(url: &str) -> Option<&str> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str()?;

    let written = url.trim();
    let after_scheme = &written[written.find(':')? + 1..];
    let authority = after_scheme.trim_start_matches(['/', '\\']);
    let authority = match authority.find(['/', '\\', '?', '#']) {
        Some(end) => &authority[..end],
        None => authority,
    };

    let host_and_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    let host = if host_and_port.starts_with('[') {
        // IPv6 literal, keep the brackets
        let end = host_and_port.find(']')?;
        &host_and_port[..=end]
    } else {
        match host_and_port.rfind(':') {
            Some(colon) => &host_and_port[..colon],
            None => host_and_port,
        }
    };

    if host.is_empty() {
        return None;
    }
    Some(host)
}
