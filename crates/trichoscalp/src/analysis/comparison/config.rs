use serde::{Deserialize, Serialize};

use super::super::domain::{Indicator, IndicatorSet};

/// Weighting table and thresholds driving evolution classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub weights: IndicatorSet<f64>,
    /// Absolute deltas strictly below this are classified as stable.
    pub stability_threshold: f64,
    /// Minimum absolute delta listed in the executive summary.
    pub significant_change: f64,
}

impl ComparisonConfig {
    pub fn weight(&self, indicator: Indicator) -> f64 {
        *self.weights.get(indicator)
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            weights: IndicatorSet {
                densidade_capilar: 3.0,
                oleosidade: 2.0,
                descamacao: 1.5,
                miniaturizacao: 2.5,
                inflamacao: 2.0,
            },
            stability_threshold: 0.05,
            significant_change: 0.1,
        }
    }
}
