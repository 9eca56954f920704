//! Images read from the local file system

use super::{ImageSource, SourceError, SourceImage, decode_blocking};
use crate::constants::SUPPORTED_EXTENSIONS;
use std::path::{Path, PathBuf};

/// An image file on disk
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for LocalFileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<SourceImage, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        log::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        decode_blocking(bytes, self.label()).await
    }
}

/// Whether the path has one of the commonly supported image extensions.
///
/// Decoding sniffs the actual format, so this is only a hint for callers
/// that want to warn about unexpected files.
pub fn has_supported_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
