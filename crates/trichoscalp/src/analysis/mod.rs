//! Scalp evaluation analysis: the mock indicator synthesizer, the cross-visit
//! comparator, and the service and HTTP surface wiring them to persistence.
//!
//! Indicators are derived from image counts and injectable noise only; no image is
//! ever decoded.

pub mod comparison;
pub mod domain;
pub mod format;
pub mod repository;
pub mod router;
pub mod service;
pub mod synthesizer;
pub mod validation;

#[cfg(test)]
mod tests;

pub use comparison::{
    compare, executive_summary, Comparator, ComparisonConfig, ComparisonError,
    ComparisonOutcome, Direction, EvolutionStatus, EvolutionSummary,
};
pub use domain::{
    AnalysisMetadata, AnalysisResult, ComparisonSection, EvaluationId, ImageGroup, ImageGroups,
    Indicator, IndicatorSet, InterpretationResult, Polarity, PriorEvaluation,
    QualitativeAnalysis, QuantitativeIndicators, SubjectId, FIRST_EVALUATION_NOTE,
};
pub use format::{days_between, format_delta, format_indicator_name, round_to};
pub use repository::{
    EvaluationRecord, EvaluationRepository, EvaluationStatus, EvaluationStatusView,
    RepositoryError,
};
pub use router::analysis_router;
pub use service::{AnalysisService, AnalysisServiceError};
pub use synthesizer::{
    synthesize, IndicatorSynthesizer, NoiseSource, RandomNoise, SynthesisConfig,
    SynthesisRequest, ZeroNoise,
};
pub use validation::{parse_indicator_set, validate_analysis_result, validate_comparison_inputs};
