use std::fmt::Write;

use super::super::domain::Indicator;
use super::super::format::round_to;
use super::config::ComparisonConfig;
use super::ComparisonOutcome;

/// Plain-text executive summary using the default significance threshold.
pub fn executive_summary(outcome: &ComparisonOutcome) -> String {
    render(outcome, ComparisonConfig::default().significant_change)
}

pub(crate) fn render(outcome: &ComparisonOutcome, significant_change: f64) -> String {
    let evolution = &outcome.evolution;
    let mut text = format!(
        "Evolução {}: {}\n\nPrincipais variações observadas:\n",
        evolution.status.label(),
        evolution.description
    );

    let mut variations: Vec<(Indicator, f64)> = outcome
        .absolute_delta
        .iter()
        .map(|(indicator, delta)| (indicator, round_to(*delta, 2)))
        .collect();
    variations.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    for (indicator, delta) in variations
        .into_iter()
        .filter(|(_, delta)| delta.abs() >= significant_change)
    {
        let sign = if delta >= 0.0 { '+' } else { '-' };
        let _ = writeln!(text, "• {}: {sign}{:.2}", indicator.label(), delta.abs());
    }

    let score = evolution.evolution_score;
    let _ = if score > 0.0 {
        write!(text, "\nScore de evolução: +{score:.1} (positivo)")
    } else if score < 0.0 {
        write!(text, "\nScore de evolução: {score:.1} (negativo)")
    } else {
        write!(text, "\nScore de evolução: {score:.1} (neutro)")
    };

    text
}
