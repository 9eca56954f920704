//! Conversion pipeline
//!
//! 1. Load every input in order (I/O awaited, decoding on the blocking pool)
//! 2. Apply the failure policy to inputs that could not be loaded
//! 3. Lay out and assemble one page per image on a blocking thread

use crate::document::DocumentAssembler;
use crate::layout::PageGeometry;
use crate::options::ConversionOptions;
use crate::source::{ImageInput, ImageSource, SourceImage, http_client};
use crate::types::*;
use std::path::Path;

/// Images that loaded successfully, plus the failures that were skipped.
#[derive(Debug, Default)]
pub struct LoadedImages {
    pub images: Vec<SourceImage>,
    /// Input position of each entry in `images`
    pub positions: Vec<usize>,
    pub skipped: Vec<ImageToPdfError>,
}

/// Result of a successful conversion
#[derive(Debug)]
pub struct ConversionReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub page_size: PageSize,
    pub dpi: u32,
    /// Inputs left out under [`FailurePolicy::Skip`]
    pub skipped: Vec<ImageToPdfError>,
}

impl ConversionReport {
    /// Document size in whole KiB
    pub fn size_kb(&self) -> usize {
        self.bytes.len() / 1024
    }

    pub fn summary(&self, output_name: &str) -> String {
        format!(
            "Created {} ({} KB at {} DPI, {} page{})",
            output_name,
            self.size_kb(),
            self.dpi,
            self.page_count,
            if self.page_count == 1 { "" } else { "s" }
        )
    }
}

/// Turn command-line style inputs (paths or URLs) into sources.
pub fn parse_inputs(
    inputs: &[impl AsRef<str>],
    options: &ConversionOptions,
) -> Result<Vec<ImageInput>> {
    let client = http_client(options.http_timeout())
        .map_err(|e| ImageToPdfError::Config(format!("Failed to create HTTP client: {}", e)))?;
    Ok(inputs
        .iter()
        .map(|input| ImageInput::parse(input.as_ref(), &client))
        .collect())
}

/// Load all sources strictly in input order.
pub async fn load_images<S: ImageSource>(
    sources: &[S],
    policy: FailurePolicy,
) -> Result<LoadedImages> {
    let mut loaded = LoadedImages::default();

    for (index, source) in sources.iter().enumerate() {
        match source.load().await {
            Ok(image) => {
                loaded.images.push(image);
                loaded.positions.push(index);
            }
            Err(err) => {
                let err = err.at(index, source.label());
                match policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::Skip => {
                        log::warn!("Skipping input: {}", err);
                        loaded.skipped.push(err);
                    }
                }
            }
        }
    }

    if loaded.images.is_empty() {
        return Err(ImageToPdfError::NoImages);
    }

    Ok(loaded)
}

/// Build a complete document from decoded images, one page each.
///
/// This is a one-shot build: if any image fails, the partial document is
/// discarded and only the error is returned.
pub fn build_document(images: &[SourceImage], geometry: &PageGeometry) -> Result<Vec<u8>> {
    if images.is_empty() {
        return Err(ImageToPdfError::NoImages);
    }

    let mut assembler =
        DocumentAssembler::begin(geometry.page_width_pt(), geometry.page_height_pt())?;

    for (index, image) in images.iter().enumerate() {
        if let Err(err) = draw_image(&mut assembler, index, image, geometry) {
            assembler.abort()?;
            return Err(err);
        }
    }

    assembler.finalize()
}

fn draw_image(
    assembler: &mut DocumentAssembler,
    index: usize,
    image: &SourceImage,
    geometry: &PageGeometry,
) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageToPdfError::ImageDecode {
            index,
            label: image.label().unwrap_or("<memory>").to_string(),
            reason: format!("image has no pixels ({}x{})", width, height),
        });
    }

    let placement = geometry.place(width, height)?;
    assembler.draw_page(image, &placement)
}

/// Convert sources into a PDF held in memory.
pub async fn convert<S: ImageSource>(
    sources: &[S],
    options: &ConversionOptions,
) -> Result<ConversionReport> {
    options.validate()?;
    let geometry = options.geometry()?;

    let LoadedImages {
        images,
        positions,
        skipped,
    } = load_images(sources, options.failure_policy).await?;
    let page_count = images.len();

    log::info!(
        "Converting {} image{} to {} at {} DPI",
        page_count,
        if page_count == 1 { "" } else { "s" },
        options.page_size,
        options.dpi
    );

    // Layout, resampling and serialization are CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || build_document(&images, &geometry))
        .await?
        .map_err(|err| restore_input_position(err, &positions))?;

    Ok(ConversionReport {
        bytes,
        page_count,
        page_size: options.page_size,
        dpi: options.dpi,
        skipped,
    })
}

/// Convert sources and write the PDF to `output_path`.
pub async fn convert_to_file<S: ImageSource>(
    sources: &[S],
    options: &ConversionOptions,
    output_path: impl AsRef<Path>,
) -> Result<ConversionReport> {
    let report = convert(sources, options).await?;
    tokio::fs::write(output_path.as_ref(), &report.bytes).await?;
    Ok(report)
}

/// Map an index into the loaded images back to the position in the input list.
fn restore_input_position(err: ImageToPdfError, positions: &[usize]) -> ImageToPdfError {
    match err {
        ImageToPdfError::ImageDecode {
            index,
            label,
            reason,
        } => ImageToPdfError::ImageDecode {
            index: positions.get(index).copied().unwrap_or(index),
            label,
            reason,
        },
        other => other,
    }
}
