use thiserror::Error;

use crate::constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT, PAGE_SIZE_TOLERANCE_PT};

#[derive(Error, Debug)]
pub enum ImageToPdfError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Unsupported page size: {width_pt} x {height_pt} pt (expected A4 or Letter)")]
    UnsupportedPageSize { width_pt: f32, height_pt: f32 },
    #[error("Image {index} ({label}) could not be decoded: {reason}")]
    ImageDecode {
        index: usize,
        label: String,
        reason: String,
    },
    #[error("Image {index} ({label}) could not be read: {reason}")]
    ImageFetch {
        index: usize,
        label: String,
        reason: String,
    },
    #[error("Document has already been finalized")]
    DocumentAlreadyFinalized,
    #[error("No images to convert")]
    NoImages,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ImageToPdfError {
    /// Position of the offending image in the input sequence, for per-image failures.
    pub fn image_index(&self) -> Option<usize> {
        match self {
            ImageToPdfError::ImageDecode { index, .. } | ImageToPdfError::ImageFetch { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageToPdfError>;

/// Supported output page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    pub const ALL: [PageSize; 2] = [PageSize::A4, PageSize::Letter];

    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PageSize::A4 => A4_DIMENSIONS_PT,
            PageSize::Letter => LETTER_DIMENSIONS_PT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
        }
    }

    /// Look up the preset matching the given dimensions in points.
    pub fn from_dimensions(width_pt: f32, height_pt: f32) -> Option<PageSize> {
        Self::ALL.into_iter().find(|size| {
            let (w, h) = size.dimensions_pt();
            (w - width_pt).abs() < PAGE_SIZE_TOLERANCE_PT
                && (h - height_pt).abs() < PAGE_SIZE_TOLERANCE_PT
        })
    }
}

impl std::str::FromStr for PageSize {
    type Err = ImageToPdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(ImageToPdfError::Config(format!(
                "Unknown page size '{}', expected A4 or Letter",
                other
            ))),
        }
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do when one image in a batch cannot be loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Stop at the first failing image; no document is produced
    #[default]
    Abort,
    /// Leave failing images out and build the document from the rest
    Skip,
}
