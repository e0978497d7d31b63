//! Shape checks for analysis payloads arriving as untyped JSON.

use serde_json::Value;

use super::comparison::ComparisonError;
use super::domain::{IndicatorSet, QuantitativeIndicators};

/// Reads the five indicator fields from a JSON object.
///
/// Extra fields are ignored. A missing field or a value that is not a finite
/// number is reported with the indicator key.
pub fn parse_indicator_set(
    value: &Value,
    set: &'static str,
) -> Result<QuantitativeIndicators, ComparisonError> {
    IndicatorSet::try_from_fn(|indicator| {
        let field = value.get(indicator.key());
        match field {
            None | Some(Value::Null) => Err(invalid(set, indicator.key(), "is missing")),
            Some(raw) => raw
                .as_f64()
                .filter(|number| number.is_finite())
                .ok_or_else(|| invalid(set, indicator.key(), "is not numeric")),
        }
    })
}

fn invalid(set: &'static str, field: &str, reason: &str) -> ComparisonError {
    ComparisonError::InvalidIndicatorSet {
        set,
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// True when the candidate carries quantitative indicators, a qualitative analysis
/// and an interpretation.
pub fn validate_analysis_result(candidate: &Value) -> bool {
    let present = |key: &str| candidate.get(key).is_some_and(|value| !value.is_null());

    present("qualitative_analysis")
        && present("interpretation")
        && candidate
            .get("quantitative_indicators")
            .is_some_and(|indicators| parse_indicator_set(indicators, "candidate").is_ok())
}

pub fn validate_comparison_inputs(current: &Value, previous: &Value) -> bool {
    parse_indicator_set(current, "current").is_ok()
        && parse_indicator_set(previous, "previous").is_ok()
}
