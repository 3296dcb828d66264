//! Comparison settings for tolerance-based state equality.

use serde::{Deserialize, Serialize};

/// Default element-wise tolerance used when comparing states.
///
/// This is intentionally loose; tightening it changes which puzzles the
/// generator accepts.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Settings for [`AmplitudeVector::is_equal_to`](crate::AmplitudeVector::is_equal_to).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Maximum magnitude of any element of the difference vector.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Treat every comparison as equal unless the caller ignores the
    /// override. Used by debugging tools to skip puzzles.
    #[serde(default)]
    pub force_equal: bool,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl ComparisonConfig {
    /// Create a config with the given tolerance and no override.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            force_equal: false,
        }
    }

    /// Enable or disable the equality override.
    #[must_use]
    pub fn with_force_equal(mut self, force_equal: bool) -> Self {
        self.force_equal = force_equal;
        self
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }
}
