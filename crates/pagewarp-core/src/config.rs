// SPDX-License-Identifier: MIT
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Tuning parameters for the rectification pipeline.
///
/// The defaults are fixed, deliberately permissive constants rather than
/// per-image auto-tuned values; they favour finding *some* page boundary
/// over rejecting low-contrast input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Lower Canny hysteresis threshold (0–255 scale).
    pub canny_low: f32,
    /// Upper Canny hysteresis threshold (0–255 scale).
    pub canny_high: f32,
    /// Gaussian smoothing sigma. 1.1 is the sigma OpenCV derives for a
    /// 5×5 kernel with sigma left at 0.
    pub blur_sigma: f32,
    /// Minimum dominant-contour area as a fraction of total image area.
    /// Below this the pipeline falls back to the full image bounds.
    pub min_area_ratio: f64,
    /// Douglas-Peucker epsilon as a fraction of the contour perimeter.
    pub epsilon_ratio: f64,
    /// Top/bottom margin of the default rectangle, as a fraction of image
    /// height.
    pub margin_ratio: f64,
    /// JPEG quality of the rectified output image.
    pub output_jpeg_quality: u8,
    /// Maximum width of debug snapshots; larger snapshots are downscaled,
    /// smaller ones are never enlarged.
    pub debug_max_width: u32,
    /// JPEG quality of debug snapshots.
    pub debug_jpeg_quality: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            blur_sigma: 1.1,
            min_area_ratio: 0.05,
            epsilon_ratio: 0.05,
            margin_ratio: 0.05,
            output_jpeg_quality: 80,
            debug_max_width: 800,
            debug_jpeg_quality: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.canny_low, 50.0);
        assert_eq!(cfg.canny_high, 150.0);
        assert_eq!(cfg.min_area_ratio, 0.05);
        assert_eq!(cfg.epsilon_ratio, 0.05);
        assert_eq!(cfg.margin_ratio, 0.05);
        assert_eq!(cfg.debug_max_width, 800);
        assert_eq!(cfg.debug_jpeg_quality, 60);
    }
}
