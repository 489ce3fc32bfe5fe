// SPDX-License-Identifier: MIT
//
// End-to-end tests for the rectification pipeline: synthetic pages in,
// wire-contract outcomes out.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use pagewarp_scan::{encode, warp, FailureReason, PageScanner, QuadTier};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// 400x400 black canvas with a centered, rotated 300x200 white page.
fn rotated_page() -> (DynamicImage, [(f64, f64); 4]) {
    let mut img = RgbaImage::from_pixel(400, 400, Rgba([0, 0, 0, 255]));
    let angle = 15f64.to_radians();
    let (sin, cos) = angle.sin_cos();
    let local = [(-150.0, -100.0), (150.0, -100.0), (150.0, 100.0), (-150.0, 100.0)];
    let world = local.map(|(x, y): (f64, f64)| (200.0 + x * cos - y * sin, 200.0 + x * sin + y * cos));
    let poly: Vec<Point<i32>> = world
        .iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();
    draw_polygon_mut(&mut img, &poly, Rgba([255, 255, 255, 255]));
    (DynamicImage::ImageRgba8(img), world)
}

/// Axis-aligned white page on black, with a printed frame just inside its
/// border so the rectified output still contains detectable structure.
fn framed_page() -> DynamicImage {
    let mut img = RgbaImage::from_pixel(400, 400, Rgba([0, 0, 0, 255]));
    for y in 100..300 {
        for x in 50..350 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    let black = Rgba([0, 0, 0, 255]);
    draw_hollow_rect_mut(&mut img, Rect::at(54, 104).of_size(292, 192), black);
    draw_hollow_rect_mut(&mut img, Rect::at(55, 105).of_size(290, 190), black);
    DynamicImage::ImageRgba8(img)
}

#[test]
fn rotated_page_scan_matches_wire_contract() {
    init_tracing();
    let (img, truth) = rotated_page();
    let outcome = PageScanner::new()
        .scan_with_debug(&png_bytes(&img), false)
        .unwrap();

    assert!(outcome.success);
    assert!(outcome.debug_images.is_none());

    // Corners roughly match the page's true corners.
    let corners = outcome.corners.unwrap();
    for corner in corners {
        let dist = truth
            .iter()
            .map(|&(x, y)| (f64::from(corner.x) - x).hypot(f64::from(corner.y) - y))
            .fold(f64::INFINITY, f64::min);
        assert!(dist < 8.0, "corner {:?} off by {:.1}px", corner, dist);
    }

    // Ordered-corner role invariant.
    let [tl, tr, br, bl] = corners;
    assert!(tl.x <= tr.x && bl.x <= br.x && tl.y <= bl.y && tr.y <= br.y);

    // The encoded image's dimensions equal the computed destination size.
    let (out_w, out_h) = warp::output_size(&corners);
    let decoded = encode::decode_data_url(outcome.scanned_image.as_deref().unwrap()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (out_w, out_h));

    // And the destination is roughly page-sized (300x200 before rotation).
    assert!((out_w as i64 - 300).abs() <= 8, "out_w = {}", out_w);
    assert!((out_h as i64 - 200).abs() <= 8, "out_h = {}", out_h);
}

#[test]
fn wire_json_uses_camel_case_and_pair_corners() {
    init_tracing();
    let (img, _) = rotated_page();
    let outcome = PageScanner::new()
        .scan_with_debug(&png_bytes(&img), false)
        .unwrap();
    let value = serde_json::to_value(&outcome).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["corners"].as_array().unwrap().len(), 4);
    assert_eq!(value["corners"][0].as_array().unwrap().len(), 2);
    assert!(value["scannedImage"].as_str().unwrap().starts_with("data:image/jpeg;base64,"));
    assert!(value.get("reason").is_none());
    assert!(value.get("debugImages").is_none());
}

#[test]
fn blank_image_fails_with_no_contours() {
    init_tracing();
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255])));
    let outcome = PageScanner::new()
        .scan_with_debug(&png_bytes(&img), false)
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.reason, Some(FailureReason::NoContoursDetected));

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["reason"], "no_contours_detected");
    assert_eq!(value.as_object().unwrap().len(), 2, "only success and reason belong on the wire");
}

#[test]
fn debug_scan_includes_stage_snapshots() {
    init_tracing();
    let (img, _) = rotated_page();
    let outcome = PageScanner::new()
        .scan_with_debug(&png_bytes(&img), true)
        .unwrap();

    assert!(outcome.success);
    let images = outcome.debug_images.unwrap();
    for key in ["gray", "blurred", "edges"] {
        assert!(images.contains_key(key), "missing debug key {}", key);
    }
    for url in images.values() {
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }
}

#[test]
fn rectification_is_near_idempotent_for_axis_aligned_pages() {
    init_tracing();
    let scanner = PageScanner::new();

    // First pass crops the page out of the photo.
    let first = scanner
        .scan_with_debug(&png_bytes(&framed_page()), false)
        .unwrap();
    assert!(first.success);
    let first_corners = first.corners.unwrap();
    assert!((f64::from(first_corners[0].x) - 50.0).abs() <= 5.0);
    assert!((f64::from(first_corners[0].y) - 100.0).abs() <= 5.0);

    let rectified = encode::decode_data_url(first.scanned_image.as_deref().unwrap()).unwrap();
    let (out_w, out_h) = (rectified.width(), rectified.height());

    // Second pass on the already-rectified page: corners stay within a
    // small tolerance of the output's own bounds.
    let second = scanner.rectify(&rectified, false);
    assert!(second.success, "second pass failed: {:?}", second.reason);
    let expected = [
        (0.0, 0.0),
        (f64::from(out_w - 1), 0.0),
        (f64::from(out_w - 1), f64::from(out_h - 1)),
        (0.0, f64::from(out_h - 1)),
    ];
    for (corner, (ex, ey)) in second.corners.unwrap().into_iter().zip(expected) {
        let dist = (f64::from(corner.x) - ex).hypot(f64::from(corner.y) - ey);
        assert!(dist <= 12.0, "corner {:?} is {:.1}px from bound ({}, {})", corner, dist, ex, ey);
    }
}

#[test]
fn tiny_document_region_returns_full_image_bounds() {
    init_tracing();
    let mut img = RgbaImage::from_pixel(300, 240, Rgba([0, 0, 0, 255]));
    for y in 40..52 {
        for x in 40..52 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    let outcome = PageScanner::new()
        .scan_with_debug(&png_bytes(&DynamicImage::ImageRgba8(img)), false)
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.tier, Some(QuadTier::FullImage));
    let corners = outcome.corners.unwrap();
    assert_eq!([corners[0].x, corners[0].y], [0, 0]);
    assert_eq!([corners[2].x, corners[2].y], [299, 239]);
}
