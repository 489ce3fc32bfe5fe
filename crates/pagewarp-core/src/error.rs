// SPDX-License-Identifier: MIT
//
// Unified error types for Pagewarp.

use thiserror::Error;

/// Top-level error type for all Pagewarp operations.
///
/// Only [`PagewarpError::Decode`] ever reaches callers of the public
/// scanning API directly; every other variant is caught at the pipeline
/// boundary and reported as a generic `internal_error` outcome so that
/// stage internals never leak across the public surface.
#[derive(Debug, Error)]
pub enum PagewarpError {
    /// The input bytes are not a decodable raster image.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// The perspective transform could not be derived from the corner
    /// correspondence (degenerate control points).
    #[error("perspective transform failed: {0}")]
    Transform(String),

    /// Encoding the rectified image for transport failed.
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagewarpError>;
