use crate::constants::{DEFAULT_DPI, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OUTPUT_NAME, MAX_DPI, MIN_DPI};
use crate::layout::PageGeometry;
use crate::types::*;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionOptions {
    // Page layout
    pub page_size: PageSize,
    pub dpi: u32,

    // Output
    pub output_name: String,

    // Batch behavior
    pub failure_policy: FailurePolicy,

    // Remote sources
    pub http_timeout_secs: u64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            dpi: DEFAULT_DPI,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            failure_policy: FailurePolicy::Abort,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ConversionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImageToPdfError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImageToPdfError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(ImageToPdfError::Config(format!(
                "DPI must be between {} and {}, got {}",
                MIN_DPI, MAX_DPI, self.dpi
            )));
        }

        if self.output_name.trim().is_empty() {
            return Err(ImageToPdfError::Config(
                "Output filename must not be empty".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(ImageToPdfError::Config(
                "HTTP timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Page geometry shared by every page of the document
    pub fn geometry(&self) -> Result<PageGeometry> {
        PageGeometry::from_page_size(self.page_size, self.dpi)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
