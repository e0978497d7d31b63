mod config;
mod policy;
mod rules;
mod summary;

pub use config::ComparisonConfig;
pub use policy::{Direction, EvolutionStatus, EvolutionSummary};
pub use summary::executive_summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{IndicatorSet, QuantitativeIndicators};
use super::format::days_between;

/// Stateless comparator applying the weighting table to two indicator sets.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: ComparisonConfig,
}

impl Comparator {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Diffs `current` against `previous`. The interval is left at zero days.
    pub fn compare(
        &self,
        current: &QuantitativeIndicators,
        previous: &QuantitativeIndicators,
    ) -> Result<ComparisonOutcome, ComparisonError> {
        rules::ensure_well_formed(current, "current")?;
        rules::ensure_well_formed(previous, "previous")?;

        let deltas = rules::measure(current, previous, &self.config);
        let evolution = policy::summarize(&deltas.directions, &deltas.absolute, &self.config);

        Ok(ComparisonOutcome {
            current: *current,
            previous: *previous,
            absolute_delta: deltas.absolute,
            relative_delta_percent: deltas.relative_percent,
            formatted_delta: deltas.formatted,
            directions: deltas.directions,
            evolution,
            days_between_evaluations: 0,
        })
    }

    pub fn compare_dated(
        &self,
        current: &QuantitativeIndicators,
        current_at: DateTime<Utc>,
        previous: &QuantitativeIndicators,
        previous_at: DateTime<Utc>,
    ) -> Result<ComparisonOutcome, ComparisonError> {
        let outcome = self.compare(current, previous)?;
        Ok(outcome.with_interval(days_between(current_at, previous_at)))
    }

    pub fn executive_summary(&self, outcome: &ComparisonOutcome) -> String {
        summary::render(outcome, self.config.significant_change)
    }
}

/// Compares two indicator sets with the default weighting table.
pub fn compare(
    current: &QuantitativeIndicators,
    previous: &QuantitativeIndicators,
) -> Result<ComparisonOutcome, ComparisonError> {
    Comparator::default().compare(current, previous)
}

/// Derived comparison between two evaluations of the same subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub current: QuantitativeIndicators,
    pub previous: QuantitativeIndicators,
    pub absolute_delta: IndicatorSet<f64>,
    pub relative_delta_percent: IndicatorSet<f64>,
    pub formatted_delta: IndicatorSet<String>,
    pub directions: IndicatorSet<Direction>,
    pub evolution: EvolutionSummary,
    pub days_between_evaluations: i64,
}

impl ComparisonOutcome {
    pub fn with_interval(mut self, days: i64) -> Self {
        self.days_between_evaluations = days.max(0);
        self
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComparisonError {
    #[error("invalid {set} indicator set: `{field}` {reason}")]
    InvalidIndicatorSet {
        set: &'static str,
        field: String,
        reason: String,
    },
}
