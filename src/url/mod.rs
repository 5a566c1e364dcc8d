//! URL handling module for Page-Harvest
//!
//! Provides host extraction and the same-domain test that bounds a crawl.

mod domain;

pub use domain::extract_domain;

/// Decides whether two URLs belong to the same domain
///
/// Two URLs are on the same domain when both parse and their hosts, as
/// written, are equal as case-sensitive strings. Ports are not compared, and
/// no subdomain or path policy is applied. The relation is symmetric.
///
/// # Examples
///
/// ```
/// use page_harvest::url::same_domain;
///
/// assert!(same_domain("http://example.com/a", "http://example.com:8080/b"));
/// assert!(!same_domain("http://example.com/", "http://blog.example.com/"));
/// assert!(!same_domain("http://example.com/", "mailto:a@example.com"));
/// assert!(!same_domain("http://Example.com/", "http://example.com/"));
/// ```
pub fn same_domain(a: &str, b: &str) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(host_a), Some(host_b)) => host_a == host_b,
        _ => false,
    }
}
