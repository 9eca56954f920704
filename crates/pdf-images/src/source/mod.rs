//! Image acquisition
//!
//! Every input kind implements [`ImageSource`]: produce a decoded
//! [`SourceImage`] or fail. The conversion pipeline only sees the trait.

mod http;
mod local;

pub use http::{HttpSource, http_client, parse_url_list};
pub use local::{LocalFileSource, has_supported_extension};

use crate::types::ImageToPdfError;
use image::DynamicImage;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Decode(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl SourceError {
    /// Attach the input position and label, turning this into a per-image error.
    pub fn at(self, index: usize, label: impl Into<String>) -> ImageToPdfError {
        let label = label.into();
        match self {
            SourceError::Decode(reason) => ImageToPdfError::ImageDecode {
                index,
                label,
                reason,
            },
            other => ImageToPdfError::ImageFetch {
                index,
                label,
                reason: other.to_string(),
            },
        }
    }
}

/// A decoded raster image
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    label: Option<String>,
}

impl SourceImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Decode an encoded image (PNG, JPEG, GIF, BMP, TIFF, WebP, ...).
    ///
    /// Animated formats contribute their first frame.
    pub fn decode(bytes: &[u8]) -> Result<Self, SourceError> {
        if bytes.is_empty() {
            return Err(SourceError::Decode("image data is empty".to_string()));
        }
        let image =
            image::load_from_memory(bytes).map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(Self::new(image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// Decoding is CPU-bound, so it runs on the blocking pool.
pub(crate) async fn decode_blocking(bytes: Vec<u8>, label: String) -> Result<SourceImage, SourceError> {
    let image = tokio::task::spawn_blocking(move || SourceImage::decode(&bytes)).await??;
    Ok(image.with_label(label))
}

/// Something that can produce a decoded image.
pub trait ImageSource {
    /// Human-readable description used in messages (path or URL)
    fn label(&self) -> String;

    /// Acquire and decode the image
    fn load(&self) -> impl Future<Output = Result<SourceImage, SourceError>> + Send;
}

/// An input given as a string: a URL if it has an http(s) scheme, a local path otherwise.
#[derive(Debug, Clone)]
pub enum ImageInput {
    Local(LocalFileSource),
    Remote(HttpSource),
}

impl ImageInput {
    pub fn parse(input: &str, client: &reqwest::Client) -> Self {
        let trimmed = input.trim();
        if is_url(trimmed) {
            ImageInput::Remote(HttpSource::new(trimmed, client.clone()))
        } else {
            ImageInput::Local(LocalFileSource::new(trimmed))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageInput::Remote(_))
    }
}

impl ImageSource for ImageInput {
    fn label(&self) -> String {
        match self {
            ImageInput::Local(source) => source.label(),
            ImageInput::Remote(source) => source.label(),
        }
    }

    async fn load(&self) -> Result<SourceImage, SourceError> {
        match self {
            ImageInput::Local(source) => source.load().await,
            ImageInput::Remote(source) => source.load().await,
        }
    }
}

fn is_url(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
