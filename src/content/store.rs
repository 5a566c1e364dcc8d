//! Filesystem-backed artifact store

use crate::content::{artifact_name, image_extension, TEXT_EXTENSION};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Invalid artifact name: {0:?}")]
    InvalidName(String),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("IO error on artifact {name}: {source}")]
    Io {
        name: String,
        source: std::io::Error,
    },
}

/// Result type for artifact operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Stores artifacts as flat files under a single directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Opens a store rooted at `root`, creating the directory if absent
    pub fn open(root: impl Into<PathBuf>) -> ArtifactResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| ArtifactError::Io {
            name: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The directory artifacts are written to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes extracted page text and returns its artifact name
    pub async fn store_text(&self, page_url: &str, text: &str) -> ArtifactResult<String> {
        let name = artifact_name(page_url, TEXT_EXTENSION);
        self.write_artifact(&name, text.as_bytes()).await?;
        Ok(name)
    }

    /// Writes downloaded image bytes and returns their artifact name
    pub async fn store_image(&self, image_url: &str, bytes: &[u8]) -> ArtifactResult<String> {
        let name = artifact_name(image_url, image_extension(image_url));
        self.write_artifact(&name, bytes).await?;
        Ok(name)
    }

    /// Writes `bytes` under `name`, replacing any existing artifact
    pub async fn write_artifact(&self, name: &str, bytes: &[u8]) -> ArtifactResult<()> {
        let path = self.path_for(name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| ArtifactError::Io {
                name: name.to_string(),
                source,
            })?;
        tracing::debug!("Wrote artifact {} ({} bytes)", name, bytes.len());
        Ok(())
    }

    /// Reads the artifact stored under `name`
    ///
    /// Names that could not have been produced by this store are reported as
    /// `InvalidName`; callers serving files treat that the same as `NotFound`.
    pub async fn read_artifact(&self, name: &str) -> ArtifactResult<Vec<u8>> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ArtifactError::NotFound(name.to_string()))
            }
            Err(source) => Err(ArtifactError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn path_for(&self, name: &str) -> ArtifactResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Artifact names are single path components
fn validate_name(name: &str) -> ArtifactResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(ArtifactError::InvalidName(name.to_string()));
    }
    Ok(())
}
