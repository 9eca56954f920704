//! PDF rendering for image pages
//!
//! This module handles the PDF-specific side of drawing one image per page:
//! - Converting and resampling pixels into an image XObject
//! - Building the page dictionary and its content stream

mod page;
mod xobject;

pub use page::*;
pub use xobject::*;
