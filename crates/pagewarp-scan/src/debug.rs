// SPDX-License-Identifier: MIT
//
// Debug visualizer — best-effort capture of intermediate-stage snapshots.
// A failed snapshot is logged and skipped; it never affects the pipeline
// outcome.

use image::{DynamicImage, GrayImage, Rgba, RgbaImage};
use image::imageops::FilterType;
use imageproc::drawing::draw_line_segment_mut;
use imageproc::point::Point;
use pagewarp_core::{CornerQuad, DebugImages, ScanConfig};
use tracing::warn;

use crate::encode;

const CONTOUR_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
const FALLBACK_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Collects named snapshot images while the pipeline runs.
///
/// When disabled, every method is a cheap no-op so the success path pays
/// nothing for instrumentation it did not ask for.
pub struct DebugCapture {
    enabled: bool,
    max_width: u32,
    quality: u8,
    images: DebugImages,
}

impl DebugCapture {
    pub fn new(enabled: bool, config: &ScanConfig) -> Self {
        Self {
            enabled,
            max_width: config.debug_max_width,
            quality: config.debug_jpeg_quality,
            images: DebugImages::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Capture a single-channel stage image.
    pub fn gray(&mut self, name: &str, image: &GrayImage) {
        if !self.enabled {
            return;
        }
        self.snapshot(name, DynamicImage::ImageLuma8(image.clone()));
    }

    /// Capture a color stage image.
    pub fn color(&mut self, name: &str, image: &RgbaImage) {
        if !self.enabled {
            return;
        }
        self.snapshot(name, DynamicImage::ImageRgba8(image.clone()));
    }

    /// Capture the source image with all extracted contours traced over it.
    pub fn contour_overlay(&mut self, name: &str, base: &RgbaImage, contours: &[Vec<Point<i32>>]) {
        if !self.enabled {
            return;
        }
        let mut canvas = base.clone();
        for contour in contours {
            let n = contour.len();
            for i in 0..n {
                let a = contour[i];
                let b = contour[(i + 1) % n];
                draw_line_segment_mut(
                    &mut canvas,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    CONTOUR_COLOR,
                );
            }
        }
        self.snapshot(name, DynamicImage::ImageRgba8(canvas));
    }

    /// Capture the source image with a fallback quadrilateral outlined on it.
    pub fn quad_overlay(&mut self, name: &str, base: &RgbaImage, corners: &CornerQuad) {
        if !self.enabled {
            return;
        }
        let mut canvas = base.clone();
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            draw_line_segment_mut(
                &mut canvas,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                FALLBACK_COLOR,
            );
        }
        self.snapshot(name, DynamicImage::ImageRgba8(canvas));
    }

    /// The collected map, present iff capture was enabled.
    pub fn finish(self) -> Option<DebugImages> {
        self.enabled.then_some(self.images)
    }

    /// Downscale, compress, and store one snapshot. Best-effort: failures
    /// are logged and the snapshot dropped.
    fn snapshot(&mut self, name: &str, image: DynamicImage) {
        let bounded = if image.width() > self.max_width {
            let height = (u64::from(image.height()) * u64::from(self.max_width)
                / u64::from(image.width())) as u32;
            image.resize(self.max_width, height.max(1), FilterType::Triangle)
        } else {
            image
        };

        let rgba = encode::normalize_rgba(bounded);
        match encode::jpeg_data_url(&rgba, self.quality) {
            Ok(url) => {
                self.images.insert(name.to_string(), url);
            }
            Err(err) => {
                warn!(name, %err, "Debug snapshot failed, skipping");
            }
        }
    }
}
