//! Image placement on a page
//!
//! Fits an image of arbitrary aspect ratio into the page's pixel bounds at
//! the target density with one uniform scale factor, then converts the
//! scaled size back to points and centers it. Images smaller than the page
//! are scaled up as well; there is no "never upscale" mode.

use crate::constants::{PIXEL_ROUNDING_TOLERANCE, POINTS_PER_INCH};
use crate::types::{ImageToPdfError, Result};

use super::geometry::check_positive;

/// Where and how large one image is drawn on its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Width of the resampled image in pixels
    pub new_width_px: u32,
    /// Height of the resampled image in pixels
    pub new_height_px: u32,
    /// Horizontal offset from the page origin (bottom-left) in points
    pub x: f32,
    /// Vertical offset from the page origin (bottom-left) in points
    pub y: f32,
    /// Physical width of the drawn image in points
    pub draw_width_pt: f32,
    /// Physical height of the drawn image in points
    pub draw_height_pt: f32,
}

impl Placement {
    /// Effective scale applied to the source image (pixels out / pixels in).
    pub fn scale(&self, image_width_px: u32) -> f64 {
        f64::from(self.new_width_px) / f64::from(image_width_px.max(1))
    }

    /// Right edge of the drawn image in points
    pub fn right(&self) -> f32 {
        self.x + self.draw_width_pt
    }

    /// Top edge of the drawn image in points
    pub fn top(&self) -> f32 {
        self.y + self.draw_height_pt
    }
}

/// Compute the centered, aspect-preserving placement of an image on a page.
///
/// # Arguments
/// * `image_width_px` - Source image width in pixels
/// * `image_height_px` - Source image height in pixels
/// * `page_width_pt` - Page width in points
/// * `page_height_pt` - Page height in points
/// * `dpi` - Sampling density in pixels per inch
///
/// Fails with `InvalidGeometry` if any input is zero, negative or not finite.
pub fn compute_placement(
    image_width_px: u32,
    image_height_px: u32,
    page_width_pt: f32,
    page_height_pt: f32,
    dpi: f32,
) -> Result<Placement> {
    if image_width_px == 0 || image_height_px == 0 {
        return Err(ImageToPdfError::InvalidGeometry(format!(
            "image must be at least 1x1 pixels, got {}x{}",
            image_width_px, image_height_px
        )));
    }
    check_positive("page width", page_width_pt)?;
    check_positive("page height", page_height_pt)?;
    check_positive("density", dpi)?;

    let dpi = f64::from(dpi);
    let page_width = f64::from(page_width_pt);
    let page_height = f64::from(page_height_pt);
    let image_width = f64::from(image_width_px);
    let image_height = f64::from(image_height_px);

    // Page bounds in pixels at the target density
    let target_width_px = page_width * dpi / POINTS_PER_INCH;
    let target_height_px = page_height * dpi / POINTS_PER_INCH;

    let scale = calculate_scale(image_width, image_height, target_width_px, target_height_px);

    let new_width_px = scaled_pixels(image_width, scale);
    let new_height_px = scaled_pixels(image_height, scale);

    // Back to points
    let draw_width = f64::from(new_width_px) * POINTS_PER_INCH / dpi;
    let draw_height = f64::from(new_height_px) * POINTS_PER_INCH / dpi;

    Ok(Placement {
        new_width_px,
        new_height_px,
        x: ((page_width - draw_width) / 2.0) as f32,
        y: ((page_height - draw_height) / 2.0) as f32,
        draw_width_pt: draw_width as f32,
        draw_height_pt: draw_height as f32,
    })
}

/// Uniform scale factor that fits the source inside the target bounds.
fn calculate_scale(src_width: f64, src_height: f64, target_width: f64, target_height: f64) -> f64 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}

/// Truncate a scaled dimension to whole pixels, never below one.
fn scaled_pixels(source: f64, scale: f64) -> u32 {
    let scaled = (source * scale + PIXEL_ROUNDING_TOLERANCE).floor();
    if scaled < 1.0 {
        1
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fit() {
        // Width-limited
        let scale = calculate_scale(800.0, 600.0, 400.0, 400.0);
        assert!((scale - 0.5).abs() < 0.001);

        // Height-limited
        let scale = calculate_scale(400.0, 800.0, 400.0, 400.0);
        assert!((scale - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_scaled_pixels_never_zero() {
        assert_eq!(scaled_pixels(1.0, 0.0001), 1);
        assert_eq!(scaled_pixels(3000.0, 0.55), 1650);
    }

    #[test]
    fn test_scaled_pixels_absorbs_float_error() {
        // (61 / 7) * 7 evaluates to 60.99999999999999
        assert_eq!(scaled_pixels(7.0, 61.0 / 7.0), 61);
        assert_eq!(scaled_pixels(11.0, 15.0 / 11.0), 15);
    }

    #[test]
    fn test_letter_150_landscape_photo() {
        let placement = compute_placement(4000, 3000, 612.0, 792.0, 150.0).unwrap();

        assert_eq!(placement.new_width_px, 1275);
        assert_eq!(placement.new_height_px, 956);
        assert!((placement.draw_width_pt - 612.0).abs() < 1e-3);
        assert!(placement.x.abs() < 1e-3, "x = {}", placement.x);
        assert!(placement.y > 100.0, "expected vertical margin, y = {}", placement.y);
        assert!((placement.y - 166.56).abs() < 1e-2);
    }

    #[test]
    fn test_zero_image_dimension_rejected() {
        assert!(matches!(
            compute_placement(0, 10, 595.0, 842.0, 150.0),
            Err(ImageToPdfError::InvalidGeometry(_))
        ));
        assert!(matches!(
            compute_placement(10, 0, 595.0, 842.0, 150.0),
            Err(ImageToPdfError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_non_positive_page_rejected() {
        assert!(compute_placement(10, 10, 0.0, 842.0, 150.0).is_err());
        assert!(compute_placement(10, 10, 595.0, -842.0, 150.0).is_err());
        assert!(compute_placement(10, 10, 595.0, 842.0, -1.0).is_err());
    }

    #[test]
    fn test_single_pixel_at_600_dpi() {
        let placement = compute_placement(1, 1, 595.0, 842.0, 600.0).unwrap();
        assert!(placement.new_width_px >= 1);
        assert_eq!(placement.new_width_px, placement.new_height_px);
        assert!(placement.draw_width_pt.is_finite());
        assert!(placement.x >= 0.0);
    }
}
