//! HTML extraction of text, images and links
//!
//! Parsing is best effort: malformed markup never fails, and elements
//! without the relevant attribute are skipped.

use scraper::{Html, Node, Selector};
use url::Url;

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Everything the crawler needs from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Visible text in document order
    pub text: String,

    /// Absolute URLs of `<img src>` references
    pub images: Vec<String>,

    /// Absolute HTTP(S) URLs of `<a href>` references
    pub links: Vec<String>,
}

/// Extracts text, image references and links from a page body
///
/// Invalid UTF-8 is replaced rather than rejected. Relative references are
/// resolved against `base_url`; absolute ones pass through.
///
/// # Example
///
/// ```
/// use page_harvest::crawler::extract_page;
/// use url::Url;
///
/// let html = br#"<html><body><p>Hi</p><img src="/a.png"><a href="b">B</a></body></html>"#;
/// let base = Url::parse("https://example.com/dir/").unwrap();
/// let page = extract_page(html, &base);
/// assert_eq!(page.images, vec!["https://example.com/a.png"]);
/// assert_eq!(page.links, vec!["https://example.com/dir/b"]);
/// ```
pub fn extract_page(body: &[u8], base_url: &Url) -> ExtractedPage {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    ExtractedPage {
        text: extract_text(&document),
        images: extract_images(&document, base_url),
        links: extract_links(&document, base_url),
    }
}

/// Concatenates every rendered text node in document order
fn extract_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });

        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

fn extract_images(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| resolve_reference(src, base_url))
        .map(|url| url.to_string())
        .collect()
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves an attribute value against the base URL
fn resolve_reference(value: &str, base_url: &Url) -> Option<Url> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    base_url.join(value).ok()
}

/// Resolves a link href to an absolute URL worth following
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links to the same page
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
        || href.starts_with('#')
    {
        return None;
    }

    let absolute_url = resolve_reference(href, base_url)?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
