//! Generator configuration.

use serde::{Deserialize, Serialize};

use qrogue_hal::VALIDATION_TOLERANCE;
use qrogue_state::ComparisonConfig;

use crate::error::{GenError, GenResult};

/// Default number of extra construction attempts.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// How the target circuit is grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Avoid revisiting any state seen so far; skip gates that cannot.
    Nearsighted,
    /// Grow one circuit, rejecting only zero states and direct cancellations.
    Farsighted,
}

/// Generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// State comparison used to detect repeated states.
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Extra attempts when too few gates were placed.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Select the farsighted strategy, which tries harder to place every
    /// selected gate.
    #[serde(default)]
    pub force_num_of_gates: bool,

    /// Tolerance for validating backend output.
    #[serde(default = "default_validation_tolerance")]
    pub validation_tolerance: f64,
}

fn default_max_retries() -> usize {
    DEFAULT_MAX_RETRIES
}

fn default_validation_tolerance() -> f64 {
    VALIDATION_TOLERANCE
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            comparison: ComparisonConfig::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            force_num_of_gates: false,
            validation_tolerance: VALIDATION_TOLERANCE,
        }
    }
}

impl GeneratorConfig {
    /// Strategy selected by `force_num_of_gates`.
    pub fn strategy(&self) -> Strategy {
        if self.force_num_of_gates {
            Strategy::Farsighted
        } else {
            Strategy::Nearsighted
        }
    }

    /// Check numeric settings.
    pub fn validate(&self) -> GenResult<()> {
        let tolerance = self.comparison.tolerance;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(GenError::InvalidConfig(format!(
                "comparison tolerance must be non-negative, got {tolerance}"
            )));
        }
        if self.validation_tolerance.is_nan() || self.validation_tolerance <= 0.0 {
            return Err(GenError::InvalidConfig(format!(
                "validation tolerance must be positive, got {}",
                self.validation_tolerance
            )));
        }
        Ok(())
    }
}
