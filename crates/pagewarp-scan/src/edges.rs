// SPDX-License-Identifier: MIT
//
// Edge detection — grayscale conversion, Gaussian smoothing, and Canny.

use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use pagewarp_core::ScanConfig;
use tracing::{debug, instrument};

/// Intermediate single-channel stages of edge detection.
///
/// Kept together so the caller can snapshot each stage for debug capture
/// and then drop the whole group once contours have been extracted.
pub struct EdgeStages {
    pub gray: GrayImage,
    pub blurred: GrayImage,
    pub edges: GrayImage,
}

/// Run grayscale conversion, noise smoothing, and Canny edge detection.
///
/// The thresholds are fixed and slightly permissive to tolerate
/// low-contrast page boundaries. An all-zero edge map is a valid result,
/// not an error; the contour stage decides what to do with it.
#[instrument(skip(image, config), fields(width = image.width(), height = image.height()))]
pub fn detect(image: &DynamicImage, config: &ScanConfig) -> EdgeStages {
    let gray = image.to_luma8();
    debug!("Converted to grayscale");

    let blurred = gaussian_blur_f32(&gray, config.blur_sigma);
    debug!(sigma = config.blur_sigma, "Applied Gaussian blur");

    let edges = canny(&blurred, config.canny_low, config.canny_high);
    debug!(
        low = config.canny_low,
        high = config.canny_high,
        "Canny edge detection complete"
    );

    EdgeStages {
        gray,
        blurred,
        edges,
    }
}
