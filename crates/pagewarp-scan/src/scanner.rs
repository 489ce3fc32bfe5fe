// SPDX-License-Identifier: MIT
//
// Pipeline boundary — runs the rectification stages in order and converts
// every post-decode failure (error or panic) into a tagged outcome, so
// nothing internal crosses the public surface.

use std::panic::{AssertUnwindSafe, catch_unwind};

use image::DynamicImage;
use pagewarp_core::{
    CornerQuad, FailureReason, PagewarpError, QuadTier, ScanConfig, ScanOutcome,
};
use tracing::{error, info, instrument, warn};

use crate::debug::DebugCapture;
use crate::{contour, decode, edges, encode, quad, runtime, warp};

/// What the stage sequence produced, before outcome conversion.
enum Rectification {
    Done {
        corners: CornerQuad,
        tier: QuadTier,
        scanned_image: String,
    },
    NoContours,
}

/// Document-image rectifier.
///
/// One instance is immutable and holds only configuration, so a single
/// scanner may serve concurrent callers from parallel threads without
/// locking.
#[derive(Debug, Clone, Default)]
pub struct PageScanner {
    config: ScanConfig,
}

impl PageScanner {
    /// Scanner with the default fixed thresholds.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan raw image bytes, with debug capture following the process-wide
    /// environment default.
    ///
    /// Returns `Err` only when the bytes cannot be decoded as an image;
    /// every later failure is reported inside the [`ScanOutcome`].
    pub fn scan(&self, data: &[u8]) -> Result<ScanOutcome, PagewarpError> {
        self.scan_with_debug(data, runtime::debug_default())
    }

    /// Scan raw image bytes with an explicit debug-capture flag.
    #[instrument(skip(self, data, debug), fields(data_len = data.len()))]
    pub fn scan_with_debug(&self, data: &[u8], debug: bool) -> Result<ScanOutcome, PagewarpError> {
        let image = decode::decode_upright(data)?;
        Ok(self.rectify(&image, debug))
    }

    /// Run the pipeline on an already-decoded, upright image.
    ///
    /// Never returns an error and never panics across this boundary: stage
    /// errors and panics both become an `internal_error` outcome, keeping
    /// whatever debug snapshots were captured before the failure.
    #[instrument(skip(self, image, debug), fields(width = image.width(), height = image.height()))]
    pub fn rectify(&self, image: &DynamicImage, debug: bool) -> ScanOutcome {
        let mut capture = DebugCapture::new(debug, &self.config);

        let result = catch_unwind(AssertUnwindSafe(|| self.run_stages(image, &mut capture)));
        match result {
            Ok(Ok(Rectification::Done {
                corners,
                tier,
                scanned_image,
            })) => {
                info!(?tier, "Rectification succeeded");
                ScanOutcome::success(corners, scanned_image, tier, capture.finish())
            }
            Ok(Ok(Rectification::NoContours)) => {
                warn!("No contours detected");
                ScanOutcome::failure(FailureReason::NoContoursDetected, capture.finish())
            }
            Ok(Err(err)) => {
                error!(%err, "Rectification stage failed");
                ScanOutcome::failure(FailureReason::InternalError, capture.finish())
            }
            Err(_) => {
                error!("Rectification stage panicked");
                ScanOutcome::failure(FailureReason::InternalError, capture.finish())
            }
        }
    }

    fn run_stages(
        &self,
        image: &DynamicImage,
        capture: &mut DebugCapture,
    ) -> Result<Rectification, PagewarpError> {
        let source = image.to_rgba8();
        let (width, height) = source.dimensions();
        let min_area = self.config.min_area_ratio * f64::from(width) * f64::from(height);

        let stages = edges::detect(image, &self.config);
        capture.gray("gray", &stages.gray);
        capture.gray("blurred", &stages.blurred);
        capture.gray("edges", &stages.edges);

        let contours = contour::external_contours(&stages.edges);
        // The edge map's lifetime ends with contour extraction.
        drop(stages);
        capture.contour_overlay("all_contours", &source, &contours);

        let Some((dominant_idx, area)) = contour::dominant(&contours) else {
            return Ok(Rectification::NoContours);
        };

        let (corners, tier) = if area < min_area {
            // A too-small region is more likely a detection failure than a
            // genuinely tiny document; return the whole image uncorrected
            // rather than committing to a spurious crop.
            warn!(area, min_area, "Dominant contour below threshold, using full image bounds");
            let corners = quad::full_image(width, height);
            capture.quad_overlay("fallback_full_image", &source, &corners);
            (corners, QuadTier::FullImage)
        } else {
            quad::extract(&contours[dominant_idx], width, height, &self.config)
        };
        drop(contours);
        info!(?corners, ?tier, "Quadrilateral resolved");

        let warped = warp::warp_to_rect(&source, &corners)?;
        drop(source);
        capture.color("warped", &warped);

        let normalized = encode::normalize_rgba(DynamicImage::ImageRgba8(warped));
        let scanned_image = encode::jpeg_data_url(&normalized, self.config.output_jpeg_quality)?;

        Ok(Rectification::Done {
            corners,
            tier,
            scanned_image,
        })
    }
}
