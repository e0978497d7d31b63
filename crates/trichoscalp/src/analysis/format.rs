//! Numeric rounding and display helpers shared by the synthesizer, comparator and reports.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // normalizes -0.0 so it never renders as "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Signed two-decimal rendering of a delta; anything under 0.01 in magnitude is `"0.00"`.
pub fn format_delta(delta: f64) -> String {
    if delta.abs() < 0.01 {
        return "0.00".to_string();
    }

    let rounded = round_to(delta, 2);
    if rounded >= 0.0 {
        format!("+{rounded:.2}")
    } else {
        format!("{rounded:.2}")
    }
}

/// Turns `snake_case` or `camelCase` identifiers into capitalized, space separated words.
pub fn format_indicator_name(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut after_lowercase = false;

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            after_lowercase = false;
            continue;
        }

        if ch.is_uppercase() && after_lowercase && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        after_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whole days between two instants, rounded up, regardless of argument order.
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let elapsed = (a - b).num_milliseconds().abs();
    (elapsed + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn indicator_names_are_title_cased() {
        assert_eq!(format_indicator_name("densidade_capilar"), "Densidade Capilar");
        assert_eq!(format_indicator_name("densidadeCapilar"), "Densidade Capilar");
        assert_eq!(format_indicator_name("oleosidade"), "Oleosidade");
        assert_eq!(format_indicator_name(""), "");
    }

    #[test]
    fn deltas_carry_explicit_sign() {
        assert_eq!(format_delta(0.2), "+0.20");
        assert_eq!(format_delta(-0.15), "-0.15");
        assert_eq!(format_delta(0.004), "0.00");
        assert_eq!(format_delta(-0.009), "0.00");
        assert_eq!(format_delta(0.01), "+0.01");
    }

    #[test]
    fn rounding_uses_requested_precision() {
        assert_eq!(round_to(0.37999999999999995, 2), 0.38);
        assert_eq!(round_to(9.46, 1), 9.5);
        assert_eq!(round_to(-0.4249999999999998, 2), -0.42);
    }

    #[test]
    fn days_between_rounds_partial_days_up() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(days_between(start, start), 0);
        assert_eq!(days_between(start + Duration::days(30), start), 30);
        assert_eq!(days_between(start, start + Duration::hours(25)), 2);
        assert_eq!(days_between(start + Duration::minutes(1), start), 1);
    }
}
