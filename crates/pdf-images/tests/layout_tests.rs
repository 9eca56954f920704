use pdf_images::*;

const PAGES: [(f32, f32); 3] = [(595.0, 842.0), (612.0, 792.0), (300.0, 200.0)];
const DENSITIES: [f32; 5] = [72.0, 96.0, 150.0, 300.0, 600.0];
const IMAGE_SIZES: [(u32, u32); 10] = [
    (1, 1),
    (1, 1000),
    (1000, 1),
    (640, 480),
    (480, 640),
    (1920, 1080),
    (1080, 1920),
    (4000, 3000),
    (10000, 100),
    (123, 4567),
];

#[test]
fn test_placement_stays_on_page() {
    for &(page_w, page_h) in &PAGES {
        for &dpi in &DENSITIES {
            let epsilon = 72.0 / dpi;
            for &(image_w, image_h) in &IMAGE_SIZES {
                let p = compute_placement(image_w, image_h, page_w, page_h, dpi).unwrap();
                let context = format!(
                    "{}x{} px on {}x{} pt at {} dpi: {:?}",
                    image_w, image_h, page_w, page_h, dpi, p
                );

                assert!(p.x >= -1e-3, "{}", context);
                assert!(p.y >= -1e-3, "{}", context);
                assert!(p.right() <= page_w + epsilon, "{}", context);
                assert!(p.top() <= page_h + epsilon, "{}", context);
                assert!(p.new_width_px >= 1 && p.new_height_px >= 1, "{}", context);
            }
        }
    }
}

#[test]
fn test_placement_is_centered() {
    for &(image_w, image_h) in &IMAGE_SIZES {
        let p = compute_placement(image_w, image_h, 595.0, 842.0, 150.0).unwrap();
        let left = p.x;
        let right = 595.0 - p.right();
        let bottom = p.y;
        let top = 842.0 - p.top();
        assert!((left - right).abs() < 1e-2, "{:?}", p);
        assert!((bottom - top).abs() < 1e-2, "{:?}", p);
    }
}

#[test]
fn test_placement_is_deterministic() {
    for &(image_w, image_h) in &IMAGE_SIZES {
        let first = compute_placement(image_w, image_h, 612.0, 792.0, 300.0).unwrap();
        let second = compute_placement(image_w, image_h, 612.0, 792.0, 300.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.draw_height_pt.to_bits(), second.draw_height_pt.to_bits());
    }
}

#[test]
fn test_aspect_ratio_preserved() {
    // 1:1, 16:9, 9:16, 100:1
    let ratios = [(500, 500), (1600, 900), (900, 1600), (10000, 100)];

    for &(image_w, image_h) in &ratios {
        for &dpi in &DENSITIES {
            let p = compute_placement(image_w, image_h, 595.0, 842.0, dpi).unwrap();
            let (w, h) = (f64::from(p.new_width_px), f64::from(p.new_height_px));
            // Derive the shorter side from the longer one
            let deviation = if image_w >= image_h {
                (h - w * f64::from(image_h) / f64::from(image_w)).abs()
            } else {
                (w - h * f64::from(image_w) / f64::from(image_h)).abs()
            };
            assert!(
                deviation <= 1.0,
                "{}x{} at {} dpi gave {}x{}",
                image_w,
                image_h,
                dpi,
                p.new_width_px,
                p.new_height_px
            );
        }
    }
}

#[test]
fn test_letter_150_scenario() {
    let geometry = PageGeometry::from_page_size(PageSize::Letter, 150).unwrap();
    let p = geometry.place(4000, 3000).unwrap();

    assert_eq!(p.new_width_px, 1275);
    assert_eq!(p.new_height_px, 956);
    assert!(p.x.abs() < 1e-3, "no horizontal margin expected");
    assert!(p.y > 0.0, "vertical margin expected");
    assert!((p.scale(4000) - 0.31875).abs() < 1e-9);
}

#[test]
fn test_small_image_is_upscaled() {
    let p = compute_placement(10, 10, 595.0, 842.0, 150.0).unwrap();
    // 595pt at 150dpi is 1239.58px; the 10px image is scaled to fill the width
    assert_eq!(p.new_width_px, 1239);
    assert_eq!(p.new_height_px, 1239);
}

#[test]
fn test_page_proportioned_image_fits_exactly() {
    // 1275 x 1650 is Letter at 150 dpi
    let p = compute_placement(1275, 1650, 612.0, 792.0, 150.0).unwrap();
    assert_eq!((p.new_width_px, p.new_height_px), (1275, 1650));
    assert!(p.x.abs() < 1e-3);
    assert!(p.y.abs() < 1e-3);
}

#[test]
fn test_extreme_aspect_ratio_has_large_margin() {
    let p = compute_placement(10000, 100, 595.0, 842.0, 150.0).unwrap();
    assert!(p.x < 1.0);
    assert!(p.y > 400.0);
}

#[test]
fn test_single_pixel_at_max_density() {
    let p = compute_placement(1, 1, 612.0, 792.0, 600.0).unwrap();
    assert_eq!(p.new_width_px, p.new_height_px);
    assert!(p.new_width_px >= 1);
    assert!(p.draw_width_pt > 0.0 && p.draw_width_pt.is_finite());
}

#[test]
fn test_invalid_inputs() {
    assert!(matches!(
        compute_placement(0, 1, 612.0, 792.0, 150.0),
        Err(ImageToPdfError::InvalidGeometry(_))
    ));
    assert!(matches!(
        compute_placement(1, 1, 612.0, 792.0, 0.0),
        Err(ImageToPdfError::InvalidGeometry(_))
    ));
    assert!(matches!(
        PageGeometry::new(612.0, 0.0, 150.0),
        Err(ImageToPdfError::InvalidGeometry(_))
    ));
}
