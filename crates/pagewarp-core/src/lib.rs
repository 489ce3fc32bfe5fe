// SPDX-License-Identifier: MIT
//
// pagewarp-core — Shared types, error taxonomy, and configuration for the
// Pagewarp document-image rectification pipeline.

pub mod config;
pub mod error;
pub mod types;

pub use config::ScanConfig;
pub use error::PagewarpError;
pub use types::*;
