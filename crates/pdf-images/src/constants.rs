//! Shared constants for image-to-PDF conversion

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch (PDF user space unit is 1/72 inch)
pub const POINTS_PER_INCH: f64 = 72.0;

/// Slack absorbed when truncating scaled pixel sizes, so exact fits
/// are not lost to floating-point error.
pub(crate) const PIXEL_ROUNDING_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Page Sizes
// =============================================================================

/// A4 in points (210 × 297 mm)
pub const A4_DIMENSIONS_PT: (f32, f32) = (595.0, 842.0);

/// US Letter in points (8.5" × 11")
pub const LETTER_DIMENSIONS_PT: (f32, f32) = (612.0, 792.0);

/// Allowed difference when matching dimensions against a preset
pub(crate) const PAGE_SIZE_TOLERANCE_PT: f32 = 0.5;

// =============================================================================
// Density
// =============================================================================

pub const MIN_DPI: u32 = 72;
pub const MAX_DPI: u32 = 600;
pub const DEFAULT_DPI: u32 = 150;

// =============================================================================
// Output
// =============================================================================

pub const DEFAULT_OUTPUT_NAME: &str = "converted.pdf";

/// PDF version written by the assembler
pub(crate) const PDF_VERSION: &str = "1.5";

/// Color used when flattening transparent pixels
pub(crate) const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

// =============================================================================
// Sources
// =============================================================================

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// File extensions accepted for local image inputs
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];
