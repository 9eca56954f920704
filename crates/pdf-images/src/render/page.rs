//! Output page rendering

use crate::layout::Placement;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Resource name the page's single image is registered under
const IMAGE_RESOURCE_NAME: &str = "Im0";

/// Render one page drawing a single image XObject.
///
/// # Arguments
/// * `output` - The output document
/// * `parent_pages_id` - The parent Pages object ID
/// * `page_width_pt` - Page width in points
/// * `page_height_pt` - Page height in points
/// * `image_id` - Object ID of the image XObject
/// * `placement` - Where and how large the image is drawn
pub fn render_image_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    page_width_pt: f32,
    page_height_pt: f32,
    image_id: ObjectId,
    placement: &Placement,
) -> ObjectId {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt),
            Object::Real(page_height_pt),
        ]),
    );

    let mut xobjects = Dictionary::new();
    xobjects.set(IMAGE_RESOURCE_NAME, Object::Reference(image_id));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = generate_placement_command(IMAGE_RESOURCE_NAME, placement);
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Content stream command drawing an image XObject into the placement rectangle.
///
/// Image space is the unit square, so the matrix scales it to the draw size
/// and translates it to the offset.
fn generate_placement_command(xobject_name: &str, placement: &Placement) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        placement.draw_width_pt, placement.draw_height_pt, placement.x, placement.y, xobject_name
    )
}
