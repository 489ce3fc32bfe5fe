// SPDX-License-Identifier: MIT
//
// Core domain types for the Pagewarp rectification pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An integer pixel coordinate.
///
/// Serializes as a plain `[x, y]` pair so that corner lists appear on the
/// wire as `[[x, y], [x, y], [x, y], [x, y]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &PixelPoint) -> f64 {
        (f64::from(self.x - other.x)).hypot(f64::from(self.y - other.y))
    }
}

impl From<[i32; 2]> for PixelPoint {
    fn from(p: [i32; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl From<PixelPoint> for [i32; 2] {
    fn from(p: PixelPoint) -> Self {
        [p.x, p.y]
    }
}

/// Four corner points in canonical order: top-left, top-right,
/// bottom-right, bottom-left.
pub type CornerQuad = [PixelPoint; 4];

/// Named map of diagnostic snapshot images (stage name → data URL).
pub type DebugImages = BTreeMap<String, String>;

/// Which resolution tier produced the final quadrilateral.
///
/// The pipeline never fails on ambiguous geometry; it degrades through
/// increasingly conservative guesses. Recording the tier lets tests assert
/// which branch ran instead of inferring it from output geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadTier {
    /// Douglas-Peucker polygon approximation yielded exactly 4 vertices.
    Approximated,
    /// Minimum-area rotated bounding rectangle of the dominant contour.
    MinAreaRect,
    /// Axis-aligned default rectangle with a 5%-of-height top/bottom margin.
    MarginDefault,
    /// Dominant contour was below the area threshold; the full image bounds
    /// were used instead.
    FullImage,
}

/// Why a scan did not produce a rectified image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Edge detection found zero boundary curves.
    NoContoursDetected,
    /// Any unexpected stage failure, reported generically.
    InternalError,
}

/// Outcome of one rectification pipeline invocation.
///
/// This is the sole externally visible output. Field presence follows the
/// wire contract: `reason` only on failure, `corners`/`scanned_image` only
/// on success, `debug_images` only when debug capture was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,

    /// Ordered TL, TR, BR, BL corner coordinates in the source image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corners: Option<CornerQuad>,

    /// Rectified page as a `data:image/jpeg;base64,...` string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_images: Option<DebugImages>,

    /// Which fallback tier produced the corners. Diagnostic only; never
    /// part of the wire contract.
    #[serde(skip)]
    pub tier: Option<QuadTier>,
}

impl ScanOutcome {
    /// Build a successful outcome.
    pub fn success(
        corners: CornerQuad,
        scanned_image: String,
        tier: QuadTier,
        debug_images: Option<DebugImages>,
    ) -> Self {
        Self {
            success: true,
            reason: None,
            corners: Some(corners),
            scanned_image: Some(scanned_image),
            debug_images,
            tier: Some(tier),
        }
    }

    /// Build a failed outcome.
    pub fn failure(reason: FailureReason, debug_images: Option<DebugImages>) -> Self {
        Self {
            success: false,
            reason: Some(reason),
            corners: None,
            scanned_image: None,
            debug_images,
            tier: None,
        }
    }
}
