// SPDX-License-Identifier: MIT
//
// Image decoding and orientation normalization.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use pagewarp_core::PagewarpError;
use tracing::{debug, instrument};

/// Decode raw image bytes into pixels with the content upright.
///
/// Reads the embedded EXIF orientation (if any) before decoding and applies
/// it afterwards, so that pixel rows correspond to the intended view
/// regardless of how the camera was held.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_upright(data: &[u8]) -> Result<DynamicImage, PagewarpError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|err| PagewarpError::Decode(format!("failed to probe image format: {}", err)))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|err| PagewarpError::Decode(format!("failed to decode image: {}", err)))?;

    // Formats without orientation metadata report no transform.
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut img = DynamicImage::from_decoder(decoder)
        .map_err(|err| PagewarpError::Decode(format!("failed to decode image: {}", err)))?;
    img.apply_orientation(orientation);

    debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "Image decoded and uprighted"
    );
    Ok(img)
}
