// SPDX-License-Identifier: MIT
//
// Quadrilateral extraction — reduce the dominant contour to four corner
// points through a three-tier fallback chain, then order them into
// canonical TL/TR/BR/BL roles.

use imageproc::geometry::{approximate_polygon_dp, arc_length, min_area_rect};
use imageproc::point::Point;
use pagewarp_core::{CornerQuad, PixelPoint, QuadTier, ScanConfig};
use tracing::{debug, instrument, warn};

use crate::contour::polygon_area;

/// Reduce a contour to exactly four ordered corner points.
///
/// Tiers, first success wins:
/// 1. Douglas-Peucker approximation with epsilon proportional to the
///    closed-curve perimeter; accepted only when it yields exactly 4
///    vertices.
/// 2. Minimum-area rotated bounding rectangle, unless degenerate
///    (zero width or height).
/// 3. Axis-aligned default rectangle spanning the full width with a
///    margin cropped from top and bottom.
///
/// The chain always produces a quadrilateral; ambiguous geometry degrades
/// to a more conservative guess instead of failing.
#[instrument(skip(contour, config), fields(contour_len = contour.len()))]
pub fn extract(
    contour: &[Point<i32>],
    width: u32,
    height: u32,
    config: &ScanConfig,
) -> (CornerQuad, QuadTier) {
    if contour.len() >= 3 {
        let perimeter = arc_length(contour, true);
        let epsilon = config.epsilon_ratio * perimeter;
        let approx = approximate_polygon_dp(contour, epsilon, true);
        debug!(
            perimeter,
            epsilon,
            approx_len = approx.len(),
            "Polygon approximation"
        );

        if approx.len() == 4 {
            let corners = order_corners([
                to_pixel(approx[0]),
                to_pixel(approx[1]),
                to_pixel(approx[2]),
                to_pixel(approx[3]),
            ]);
            return (corners, QuadTier::Approximated);
        }

        warn!(
            approx_len = approx.len(),
            "Approximation did not yield 4 points, trying min-area rectangle"
        );
        // A contour with no enclosed area (collinear points) can only
        // produce a zero-width or zero-height rectangle.
        if polygon_area(contour) > 0.0 {
            let rect = min_area_rect(contour);
            if polygon_area(&rect) > 0.0 {
                let corners = order_corners([
                    to_pixel(rect[0]),
                    to_pixel(rect[1]),
                    to_pixel(rect[2]),
                    to_pixel(rect[3]),
                ]);
                return (corners, QuadTier::MinAreaRect);
            }
        }
        warn!("Min-area rectangle degenerate, using margin default");
    } else {
        warn!(len = contour.len(), "Contour too short for approximation");
    }

    (
        margin_default(width, height, config.margin_ratio),
        QuadTier::MarginDefault,
    )
}

/// Quadrilateral covering the entire image, used when the dominant contour
/// is judged too small to be a real page boundary.
pub fn full_image(width: u32, height: u32) -> CornerQuad {
    let right = width as i32 - 1;
    let bottom = height as i32 - 1;
    [
        PixelPoint::new(0, 0),
        PixelPoint::new(right, 0),
        PixelPoint::new(right, bottom),
        PixelPoint::new(0, bottom),
    ]
}

/// Last-resort rectangle: full image width, with a fraction of the image
/// height cropped from top and bottom.
fn margin_default(width: u32, height: u32, margin_ratio: f64) -> CornerQuad {
    let margin = (margin_ratio * f64::from(height)).round() as i32;
    let right = width as i32 - 1;
    let top = margin;
    let bottom = height as i32 - 1 - margin;
    [
        PixelPoint::new(0, top),
        PixelPoint::new(right, top),
        PixelPoint::new(right, bottom),
        PixelPoint::new(0, bottom),
    ]
}

/// Assign four unordered points to TL, TR, BR, BL roles.
///
/// Sorts by coordinate sum: smallest is top-left, largest bottom-right; of
/// the two middle points, the one with the smaller y is top-right. Stable
/// for near-rectangular quadrilaterals; extreme non-rectangular shapes can
/// be misclassified (see `extreme_quad_is_misordered` below), which is an
/// accepted approximation.
pub fn order_corners(points: [PixelPoint; 4]) -> CornerQuad {
    let mut pts = points;
    pts.sort_by_key(|p| p.x + p.y);

    let tl = pts[0];
    let br = pts[3];
    let (tr, bl) = if pts[1].y < pts[2].y {
        (pts[1], pts[2])
    } else {
        (pts[2], pts[1])
    };
    [tl, tr, br, bl]
}

fn to_pixel(p: Point<i32>) -> PixelPoint {
    PixelPoint::new(p.x, p.y)
}
