//! Image XObject creation
//!
//! Pixels are normalized to 8-bit RGB, resampled to the placement size with
//! a Lanczos filter, and stored losslessly as a FlateDecode stream.

use crate::constants::BACKGROUND_RGB;
use crate::types::Result;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

// =============================================================================
// Pixel Preparation
// =============================================================================

/// Convert an image to RGB, compositing any alpha channel over white.
pub fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);

    for (src, dst) in rgba.pixels().zip(rgb.pixels_mut()) {
        let alpha = u32::from(src.0[3]);
        for channel in 0..3 {
            let fg = u32::from(src.0[channel]);
            let bg = u32::from(BACKGROUND_RGB[channel]);
            dst.0[channel] = ((fg * alpha + bg * (255 - alpha) + 127) / 255) as u8;
        }
    }

    rgb
}

/// Flatten and resample an image to exactly `width` x `height` pixels.
pub fn prepare_pixels(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let rgb = flatten_to_rgb(image);
    if rgb.dimensions() == (width, height) {
        return rgb;
    }
    image::imageops::resize(&rgb, width, height, FilterType::Lanczos3)
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Add an RGB image XObject to the output document.
pub fn create_image_xobject(output: &mut Document, pixels: &RgbImage) -> Result<ObjectId> {
    let (width, height) = pixels.dimensions();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(pixels.as_raw())?;
    let compressed = encoder.finish()?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));

    Ok(output.add_object(Stream::new(dict, compressed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_transparent_pixels_become_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let rgb = flatten_to_rgb(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_half_alpha_blends_toward_white() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 128]));

        let rgb = flatten_to_rgb(&DynamicImage::ImageRgba8(rgba));
        let value = rgb.get_pixel(0, 0).0[0];
        assert!((126..=128).contains(&value), "got {}", value);
    }

    #[test]
    fn test_prepare_pixels_resizes() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(40, 30));
        let pixels = prepare_pixels(&image, 8, 6);
        assert_eq!(pixels.dimensions(), (8, 6));
    }

    #[test]
    fn test_xobject_dictionary() {
        let mut doc = Document::with_version("1.5");
        let pixels = RgbImage::new(3, 2);
        let id = create_image_xobject(&mut doc, &pixels).unwrap();

        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 2);
        let decoded = stream.decompressed_content().unwrap();
        assert_eq!(decoded.len(), 3 * 2 * 3);
    }
}
