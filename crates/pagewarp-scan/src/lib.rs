// SPDX-License-Identifier: MIT
//
// pagewarp-scan — Document-image rectification pipeline.
//
// Takes a photographed or scanned page and produces a flattened,
// perspective-corrected rectangular image. Stages run in order: decode and
// upright, edge detection, contour analysis, quadrilateral extraction with
// tiered fallbacks, corner ordering, perspective warp, and JPEG/data-URL
// encoding. An optional debug capture records intermediate snapshots.

pub mod contour;
pub mod debug;
pub mod decode;
pub mod edges;
pub mod encode;
pub mod quad;
pub mod runtime;
pub mod scanner;
pub mod warp;

pub use scanner::PageScanner;

// Re-export the shared types callers need alongside the scanner.
pub use pagewarp_core::{FailureReason, PagewarpError, QuadTier, ScanConfig, ScanOutcome};
