// SPDX-License-Identifier: MIT
//
// Channel normalization and transport encoding — RGBA layout guarantee,
// JPEG serialization, and data-URL wrapping.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};
use pagewarp_core::PagewarpError;
use tracing::instrument;

/// Guarantee a 4-channel RGBA layout.
///
/// Grayscale replicates the intensity into R, G, and B; RGB gains an
/// opaque alpha channel; RGBA passes through untouched.
pub fn normalize_rgba(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => other.to_rgba8(),
    }
}

/// Encode an RGBA buffer as a `data:image/jpeg;base64,...` string.
///
/// JPEG carries no alpha, so the channel is dropped at the codec; callers
/// that need transparency must keep the raw buffer.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn jpeg_data_url(image: &RgbaImage, quality: u8) -> Result<String, PagewarpError> {
    let rgb: RgbImage = image.convert();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder
        .encode_image(&rgb)
        .map_err(|err| PagewarpError::Encode(format!("JPEG encoding failed: {}", err)))?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&bytes)))
}

/// Decode a `data:image/jpeg;base64,...` string back into pixels.
///
/// Inverse of [`jpeg_data_url`], used by tests and diagnostic tooling.
pub fn decode_data_url(data_url: &str) -> Result<DynamicImage, PagewarpError> {
    let payload = data_url
        .strip_prefix("data:image/jpeg;base64,")
        .ok_or_else(|| PagewarpError::Decode("not a JPEG data URL".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|err| PagewarpError::Decode(format!("invalid base64 payload: {}", err)))?;
    image::load_from_memory(&bytes)
        .map_err(|err| PagewarpError::Decode(format!("invalid JPEG payload: {}", err)))
}
