//! Layout calculation for image pages
//!
//! This module handles the geometry of fitting a raster image onto a page:
//! - Page geometry (page size in points plus sampling density)
//! - Placement (scaled pixel size, centered offset, physical draw size)

mod geometry;
mod placement;

pub use geometry::*;
pub use placement::*;
