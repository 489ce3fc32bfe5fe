// SPDX-License-Identifier: MIT
//
// Perspective solving and warping — compute the destination rectangle from
// the ordered corners, derive the homography, and resample the source.

use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use pagewarp_core::{CornerQuad, PagewarpError};
use tracing::{debug, instrument};

/// Destination rectangle dimensions for an ordered TL/TR/BR/BL quad.
///
/// Width is the longer of the top and bottom edges, height the longer of
/// the left and right edges, each rounded; degenerate quads are clamped to
/// at least 1×1.
pub fn output_size(corners: &CornerQuad) -> (u32, u32) {
    let [tl, tr, br, bl] = corners;
    let width_top = tr.distance(tl);
    let width_bottom = br.distance(bl);
    let height_left = bl.distance(tl);
    let height_right = br.distance(tr);

    let width = width_top.max(width_bottom).round().max(1.0) as u32;
    let height = height_left.max(height_right).round().max(1.0) as u32;
    (width, height)
}

/// Flatten the quadrilateral region of `source` into an axis-aligned
/// rectangle.
///
/// Derives the unique projective transform mapping the source corners onto
/// the destination rectangle and resamples with bilinear interpolation.
/// Source lookups outside the image produce transparent black.
#[instrument(skip(source, corners), fields(src_w = source.width(), src_h = source.height()))]
pub fn warp_to_rect(source: &RgbaImage, corners: &CornerQuad) -> Result<RgbaImage, PagewarpError> {
    let (out_w, out_h) = output_size(corners);

    let src_points: [(f32, f32); 4] = [
        (corners[0].x as f32, corners[0].y as f32),
        (corners[1].x as f32, corners[1].y as f32),
        (corners[2].x as f32, corners[2].y as f32),
        (corners[3].x as f32, corners[3].y as f32),
    ];
    let dst_points: [(f32, f32); 4] = [
        (0.0, 0.0),
        ((out_w - 1) as f32, 0.0),
        ((out_w - 1) as f32, (out_h - 1) as f32),
        (0.0, (out_h - 1) as f32),
    ];

    let projection = Projection::from_control_points(src_points, dst_points).ok_or_else(|| {
        PagewarpError::Transform(format!(
            "degenerate corner correspondence: {:?}",
            src_points
        ))
    })?;

    let mut output = RgbaImage::new(out_w, out_h);
    warp_into(
        source,
        &projection,
        Interpolation::Bilinear,
        Rgba([0, 0, 0, 0]),
        &mut output,
    );
    debug!(out_w, out_h, "Perspective warp applied");
    Ok(output)
}
