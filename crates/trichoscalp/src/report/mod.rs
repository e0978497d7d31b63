//! Report inputs: comparison tables and the literature cited alongside them.

mod evolution;
pub mod references;

pub use evolution::{EvolutionReport, IndicatorRow, ReportError};
