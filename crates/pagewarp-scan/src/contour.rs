// SPDX-License-Identifier: MIT
//
// Contour analysis — external boundary extraction and dominant-contour
// selection from a binary edge map.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use tracing::{debug, instrument};

/// Extract all external (outermost) closed boundary curves from a binary
/// edge map, via Suzuki-Abe border following.
///
/// Only top-level outer borders are kept, matching `RETR_EXTERNAL`
/// semantics: the outer border of a shape nested inside another shape is
/// discarded along with hole borders.
#[instrument(skip(edges), fields(width = edges.width(), height = edges.height()))]
pub fn external_contours(edges: &GrayImage) -> Vec<Vec<Point<i32>>> {
    let contours = find_contours::<i32>(edges);
    let external: Vec<Vec<Point<i32>>> = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points)
        .collect();
    debug!(count = external.len(), "External contours extracted");
    external
}

/// Index and enclosed area of the largest contour, or `None` for an empty
/// set.
pub fn dominant(contours: &[Vec<Point<i32>>]) -> Option<(usize, f64)> {
    contours
        .iter()
        .enumerate()
        .map(|(i, c)| (i, polygon_area(c)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Enclosed area of a closed polygon via the shoelace formula.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        area += f64::from(points[i].x) * f64::from(points[j].y);
        area -= f64::from(points[j].x) * f64::from(points[i].y);
    }
    area.abs() / 2.0
}
