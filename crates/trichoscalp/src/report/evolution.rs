use std::io::Write;

use serde::Serialize;

use crate::analysis::{ComparisonOutcome, Direction, EvolutionStatus};
use crate::analysis::format::round_to;

/// Table row handed to the report layout for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub indicator: &'static str,
    pub label: &'static str,
    pub previous: f64,
    pub current: f64,
    pub delta: String,
    pub relative_percent: f64,
    pub direction: Direction,
    pub direction_label: &'static str,
}

/// Plain-data view of a comparison, ready for the PDF pipeline or a CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionReport {
    pub status: EvolutionStatus,
    pub status_label: &'static str,
    pub description: String,
    pub evolution_score: f64,
    pub days_between_evaluations: i64,
    pub rows: Vec<IndicatorRow>,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    indicator: &'a str,
    previous: f64,
    current: f64,
    delta: &'a str,
    relative_percent: f64,
    direction: &'a str,
}

impl EvolutionReport {
    pub fn from_outcome(outcome: &ComparisonOutcome) -> Self {
        let rows = outcome
            .directions
            .iter()
            .map(|(indicator, direction)| IndicatorRow {
                indicator: indicator.key(),
                label: indicator.label(),
                previous: *outcome.previous.get(indicator),
                current: *outcome.current.get(indicator),
                delta: outcome.formatted_delta.get(indicator).clone(),
                relative_percent: round_to(*outcome.relative_delta_percent.get(indicator), 1),
                direction: *direction,
                direction_label: direction.label(),
            })
            .collect();

        Self {
            status: outcome.evolution.status,
            status_label: outcome.evolution.status.label(),
            description: outcome.evolution.description.clone(),
            evolution_score: outcome.evolution.evolution_score,
            days_between_evaluations: outcome.days_between_evaluations,
            rows,
        }
    }

    /// Writes one header line and one line per indicator.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(CsvRow {
                indicator: row.label,
                previous: row.previous,
                current: row.current,
                delta: &row.delta,
                relative_percent: row.relative_percent,
                direction: row.direction_label,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
}
