// SPDX-License-Identifier: MIT
//
// One-time, process-wide runtime setup.
//
// The pipeline itself is pure CPU work with no engine to boot, but the
// debug-capture default is sourced from the environment exactly once so
// concurrent first callers agree on it for the life of the process.

use std::sync::OnceLock;

use tracing::debug;

/// Environment variable controlling the process-wide debug default.
/// Set to `true` to capture debug snapshots on every scan that does not
/// specify its own flag.
pub const DEBUG_ENV_VAR: &str = "PAGEWARP_DEBUG";

static DEBUG_DEFAULT: OnceLock<bool> = OnceLock::new();

/// Process-wide default for debug capture.
///
/// Read from [`DEBUG_ENV_VAR`] on first call and cached; later changes to
/// the environment are deliberately ignored.
pub fn debug_default() -> bool {
    *DEBUG_DEFAULT.get_or_init(|| {
        let enabled = std::env::var(DEBUG_ENV_VAR).is_ok_and(|v| v == "true");
        debug!(enabled, "Debug capture default initialized from environment");
        enabled
    })
}
