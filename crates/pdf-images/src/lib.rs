pub mod constants;
pub mod convert;
pub mod document;
pub mod layout;
mod options;
pub mod render;
pub mod source;
mod types;

pub use convert::{
    ConversionReport, LoadedImages, build_document, convert, convert_to_file, load_images,
    parse_inputs,
};
pub use document::DocumentAssembler;
pub use layout::{PageGeometry, Placement, compute_placement};
pub use options::*;
pub use source::{
    HttpSource, ImageInput, ImageSource, LocalFileSource, SourceError, SourceImage,
    parse_url_list,
};
pub use types::*;
