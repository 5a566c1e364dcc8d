//! Content-addressed artifact storage
//!
//! Every artifact is named after a hash of the URL it came from, so storing
//! the same URL twice overwrites one file instead of creating a second.

mod store;

pub use store::{ArtifactError, ArtifactResult, ContentStore};

use sha2::{Digest, Sha256};

/// Extension given to extracted page text
pub const TEXT_EXTENSION: &str = "txt";

/// Builds the artifact name for a source URL
///
/// The name is the lowercase hex SHA-256 of the URL followed by `.` and the
/// extension.
///
/// # Examples
///
/// ```
/// use page_harvest::content::artifact_name;
///
/// let a = artifact_name("http://example.com/", "txt");
/// let b = artifact_name("http://example.com/", "txt");
/// assert_eq!(a, b);
/// assert!(a.ends_with(".txt"));
/// ```
pub fn artifact_name(source_url: &str, extension: &str) -> String {
    let digest = Sha256::digest(source_url.as_bytes());
    format!("{}.{}", hex::encode(digest), extension)
}

/// Returns the extension used for an image artifact
///
/// This is everything after the last `.` in the image URL, taken verbatim.
/// A URL without any dot yields the whole URL.
pub fn image_extension(image_url: &str) -> &str {
    match image_url.rfind('.') {
        Some(idx) => &image_url[idx + 1..],
        None => image_url,
    }
}
