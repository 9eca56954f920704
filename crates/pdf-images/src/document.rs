//! Incremental PDF assembly, one image per page
//!
//! A [`DocumentAssembler`] owns the in-progress document. Pages are appended
//! in call order and the page tree is written once, on [`finalize`].
//! After `finalize` or `abort` the assembler refuses further use.
//!
//! [`finalize`]: DocumentAssembler::finalize

use crate::constants::PDF_VERSION;
use crate::layout::{Placement, check_positive};
use crate::render::{create_image_xobject, prepare_pixels, render_image_page};
use crate::source::SourceImage;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Document under construction
struct OpenDocument {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

/// Builds a multi-page PDF from images, one page per image.
pub struct DocumentAssembler {
    page_size: PageSize,
    open: Option<OpenDocument>,
}

impl DocumentAssembler {
    /// Start an empty document with pages of the given size in points.
    ///
    /// Fails with `InvalidGeometry` for non-positive dimensions and with
    /// `UnsupportedPageSize` unless the size is one of the [`PageSize`] presets.
    pub fn begin(page_width_pt: f32, page_height_pt: f32) -> Result<Self> {
        check_positive("page width", page_width_pt)?;
        check_positive("page height", page_height_pt)?;

        let page_size = PageSize::from_dimensions(page_width_pt, page_height_pt).ok_or(
            ImageToPdfError::UnsupportedPageSize {
                width_pt: page_width_pt,
                height_pt: page_height_pt,
            },
        )?;

        Ok(Self::for_page_size(page_size))
    }

    /// Start an empty document with pages of a preset size.
    pub fn for_page_size(page_size: PageSize) -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        log::debug!("Started {} document", page_size.name());

        Self {
            page_size,
            open: Some(OpenDocument {
                doc,
                pages_id,
                page_ids: Vec::new(),
            }),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Pages appended so far
    pub fn page_count(&self) -> usize {
        self.open.as_ref().map_or(0, |open| open.page_ids.len())
    }

    pub fn is_finished(&self) -> bool {
        self.open.is_none()
    }

    /// Append a page showing `image` at `placement`.
    ///
    /// The image is flattened to RGB and resampled to the placement's pixel
    /// size before embedding. On failure nothing is appended; errors for the
    /// image itself carry the position the page would have had.
    pub fn draw_page(&mut self, image: &SourceImage, placement: &Placement) -> Result<()> {
        let (page_width_pt, page_height_pt) = self.page_size.dimensions_pt();
        let open = self
            .open
            .as_mut()
            .ok_or(ImageToPdfError::DocumentAlreadyFinalized)?;
        let index = open.page_ids.len();

        if image.width() == 0 || image.height() == 0 {
            return Err(ImageToPdfError::ImageDecode {
                index,
                label: image.label().unwrap_or("<memory>").to_string(),
                reason: "image has no pixels".to_string(),
            });
        }
        if placement.new_width_px == 0 || placement.new_height_px == 0 {
            return Err(ImageToPdfError::InvalidGeometry(format!(
                "placement must be at least 1x1 pixels, got {}x{}",
                placement.new_width_px, placement.new_height_px
            )));
        }

        let pixels = prepare_pixels(
            image.image(),
            placement.new_width_px,
            placement.new_height_px,
        );
        let image_id = create_image_xobject(&mut open.doc, &pixels)?;
        let page_id = render_image_page(
            &mut open.doc,
            open.pages_id,
            page_width_pt,
            page_height_pt,
            image_id,
            placement,
        );
        open.page_ids.push(page_id);

        log::debug!(
            "Page {}: {}x{} px -> {}x{} px at ({:.2}, {:.2}) pt",
            index + 1,
            image.width(),
            image.height(),
            placement.new_width_px,
            placement.new_height_px,
            placement.x,
            placement.y
        );

        Ok(())
    }

    /// Close the document and return its bytes.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let OpenDocument {
            mut doc,
            pages_id,
            page_ids,
        } = self
            .open
            .take()
            .ok_or(ImageToPdfError::DocumentAlreadyFinalized)?;

        let page_count = page_ids.len();
        let kids = page_ids.into_iter().map(Object::Reference).collect();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_count as i64));
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        log::info!(
            "Finalized {} document: {} pages, {} bytes",
            self.page_size.name(),
            page_count,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Discard the document without producing output.
    pub fn abort(&mut self) -> Result<()> {
        let open = self
            .open
            .take()
            .ok_or(ImageToPdfError::DocumentAlreadyFinalized)?;
        log::debug!("Aborted document after {} pages", open.page_ids.len());
        Ok(())
    }
}
