//! Tunable thresholds for conflict detection.

use quotewise_core::{AppError, AppResult, ComparisonSettings};
use serde::{Deserialize, Serialize};

/// A limit conflict fires when the lowest limit is below `max * (1 - 0.5)`.
pub const DEFAULT_LIMIT_VARIANCE_THRESHOLD: f64 = 0.5;

/// A deductible conflict fires when the highest is above `min * (1 + 1.0)`.
pub const DEFAULT_DEDUCTIBLE_VARIANCE_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonPolicy {
    pub limit_variance_threshold: f64,
    pub deductible_variance_threshold: f64,
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        Self {
            limit_variance_threshold: DEFAULT_LIMIT_VARIANCE_THRESHOLD,
            deductible_variance_threshold: DEFAULT_DEDUCTIBLE_VARIANCE_THRESHOLD,
        }
    }
}

impl ComparisonPolicy {
    /// Apply config overrides on top of the defaults.
    pub fn from_settings(settings: &ComparisonSettings) -> Self {
        let defaults = Self::default();
        Self {
            limit_variance_threshold: settings
                .limit_variance_threshold
                .unwrap_or(defaults.limit_variance_threshold),
            deductible_variance_threshold: settings
                .deductible_variance_threshold
                .unwrap_or(defaults.deductible_variance_threshold),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..1.0).contains(&self.limit_variance_threshold) {
            return Err(AppError::Config(format!(
                "limitVarianceThreshold must be in [0, 1): {}",
                self.limit_variance_threshold
            )));
        }

        if !self.deductible_variance_threshold.is_finite() || self.deductible_variance_threshold < 0.0 {
            return Err(AppError::Config(format!(
                "deductibleVarianceThreshold must be non-negative: {}",
                self.deductible_variance_threshold
            )));
        }

        Ok(())
    }

    /// Whether the spread between `min` and `max` limits is a conflict.
    pub fn is_limit_conflict(&self, min: f64, max: f64) -> bool {
        min < max * (1.0 - self.limit_variance_threshold)
    }

    /// Whether the spread between `min` and `max` deductibles is a conflict.
    pub fn is_deductible_conflict(&self, min: f64, max: f64) -> bool {
        max > min * (1.0 + self.deductible_variance_threshold)
    }
}
