use super::super::domain::{Indicator, IndicatorSet, QuantitativeIndicators};
use super::super::format::{format_delta, round_to};
use super::config::ComparisonConfig;
use super::policy::Direction;
use super::ComparisonError;

pub(crate) struct IndicatorDeltas {
    pub absolute: IndicatorSet<f64>,
    pub relative_percent: IndicatorSet<f64>,
    pub formatted: IndicatorSet<String>,
    pub directions: IndicatorSet<Direction>,
}

pub(crate) fn ensure_well_formed(
    indicators: &QuantitativeIndicators,
    set: &'static str,
) -> Result<(), ComparisonError> {
    match indicators.iter().find(|(_, value)| !value.is_finite()) {
        Some((indicator, _)) => Err(ComparisonError::InvalidIndicatorSet {
            set,
            field: indicator.key().to_string(),
            reason: "is not a finite number".to_string(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn measure(
    current: &QuantitativeIndicators,
    previous: &QuantitativeIndicators,
    config: &ComparisonConfig,
) -> IndicatorDeltas {
    let absolute =
        IndicatorSet::from_fn(|indicator| current.get(indicator) - previous.get(indicator));

    let relative_percent = IndicatorSet::from_fn(|indicator| {
        let base = *previous.get(indicator);
        if base > 0.0 {
            absolute.get(indicator) / base * 100.0
        } else {
            0.0
        }
    });

    let formatted = IndicatorSet::from_fn(|indicator| format_delta(*absolute.get(indicator)));
    let directions =
        IndicatorSet::from_fn(|indicator| classify(indicator, *absolute.get(indicator), config));

    IndicatorDeltas {
        absolute,
        relative_percent,
        formatted,
        directions,
    }
}

/// Subtraction noise below this many decimals is dropped before the stability check.
const CLASSIFICATION_DECIMALS: u32 = 10;

pub(crate) fn classify(indicator: Indicator, delta: f64, config: &ComparisonConfig) -> Direction {
    let delta = round_to(delta, CLASSIFICATION_DECIMALS);
    if delta.abs() < config.stability_threshold {
        Direction::Stable
    } else if indicator.polarity().is_improvement(delta) {
        Direction::Improved
    } else {
        Direction::Worsened
    }
}
