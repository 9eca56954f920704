use crate::types::{ImageToPdfError, PageSize, Result};

use super::{Placement, compute_placement};

/// Page size and sampling density shared by every page of one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    page_width_pt: f32,
    page_height_pt: f32,
    dpi: f32,
}

impl PageGeometry {
    /// Create a geometry from raw values.
    ///
    /// Fails with `InvalidGeometry` unless all three values are finite and
    /// strictly positive.
    pub fn new(page_width_pt: f32, page_height_pt: f32, dpi: f32) -> Result<Self> {
        check_positive("page width", page_width_pt)?;
        check_positive("page height", page_height_pt)?;
        check_positive("density", dpi)?;
        Ok(Self {
            page_width_pt,
            page_height_pt,
            dpi,
        })
    }

    /// Geometry for one of the page presets at the given DPI.
    pub fn from_page_size(page_size: PageSize, dpi: u32) -> Result<Self> {
        let (width, height) = page_size.dimensions_pt();
        Self::new(width, height, dpi as f32)
    }

    pub fn page_width_pt(&self) -> f32 {
        self.page_width_pt
    }

    pub fn page_height_pt(&self) -> f32 {
        self.page_height_pt
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// The preset these dimensions correspond to, if any.
    pub fn page_size(&self) -> Option<PageSize> {
        PageSize::from_dimensions(self.page_width_pt, self.page_height_pt)
    }

    /// Pixel bounds of the page at this geometry's density.
    pub fn target_pixels(&self) -> (f64, f64) {
        let factor = f64::from(self.dpi) / crate::constants::POINTS_PER_INCH;
        (
            f64::from(self.page_width_pt) * factor,
            f64::from(self.page_height_pt) * factor,
        )
    }

    /// Place an image of the given pixel size on a page of this geometry.
    pub fn place(&self, image_width_px: u32, image_height_px: u32) -> Result<Placement> {
        compute_placement(
            image_width_px,
            image_height_px,
            self.page_width_pt,
            self.page_height_pt,
            self.dpi,
        )
    }
}

pub(crate) fn check_positive(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ImageToPdfError::InvalidGeometry(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}
