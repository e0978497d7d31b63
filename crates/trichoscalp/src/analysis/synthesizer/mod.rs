mod config;
mod indicators;
mod interpretation;
mod narrative;
mod noise;

pub use config::SynthesisConfig;
pub use noise::{NoiseSource, RandomNoise, ZeroNoise};

use chrono::{DateTime, Utc};
use tracing::warn;

use super::comparison::Comparator;
use super::domain::{
    AnalysisMetadata, AnalysisResult, ComparisonSection, EvaluationId, ImageGroup, ImageGroups,
    PriorEvaluation, QuantitativeIndicators, SubjectId,
};
use indicators::CaptureFactors;

const STANDARDIZED_DESCRIPTION: &str = "Imagens tricoscópicas de 10x a 200x";
const PANORAMIC_DESCRIPTION: &str = "Fotos panorâmicas da cabeça (sem ampliação)";

/// Inputs of one mock analysis run.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub subject_id: SubjectId,
    pub evaluation_id: EvaluationId,
    pub image_urls: Vec<String>,
    pub prior: Option<PriorEvaluation>,
    /// When the evaluation was opened. Intervals to the prior are measured from here;
    /// `None` falls back to the processing instant.
    pub evaluated_at: Option<DateTime<Utc>>,
}

/// Produces a complete [`AnalysisResult`] from image counts, a noise source and an
/// optional prior evaluation.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSynthesizer {
    config: SynthesisConfig,
    comparator: Comparator,
}

impl IndicatorSynthesizer {
    pub fn new(config: SynthesisConfig, comparator: Comparator) -> Self {
        Self { config, comparator }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    pub fn synthesize(
        &self,
        request: SynthesisRequest,
        noise: &mut dyn NoiseSource,
    ) -> AnalysisResult {
        self.synthesize_at(request, noise, Utc::now())
    }

    pub fn synthesize_at(
        &self,
        request: SynthesisRequest,
        noise: &mut dyn NoiseSource,
        processed_at: DateTime<Utc>,
    ) -> AnalysisResult {
        let SynthesisRequest {
            subject_id,
            evaluation_id,
            image_urls,
            prior,
            evaluated_at,
        } = request;

        let split = self.config.standardized_capture_count.min(image_urls.len());
        let factors = CaptureFactors::new(image_urls.len(), split, &self.config);
        let quantitative_indicators = indicators::derive_indicators(&factors, noise);
        let qualitative_analysis = narrative::describe(&quantitative_indicators);

        let comparison = self.compare_with_prior(
            &evaluation_id,
            &quantitative_indicators,
            prior.as_ref(),
            evaluated_at.unwrap_or(processed_at),
        );
        let interpretation =
            interpretation::interpret(&quantitative_indicators, &comparison, noise);

        let (standardized, panoramic) = image_urls.split_at(split);

        AnalysisResult {
            subject_id,
            evaluation_id,
            evaluation_date: processed_at.date_naive(),
            image_groups: ImageGroups {
                standardized: ImageGroup {
                    description: STANDARDIZED_DESCRIPTION.to_string(),
                    urls: standardized.to_vec(),
                },
                panoramic: ImageGroup {
                    description: PANORAMIC_DESCRIPTION.to_string(),
                    urls: panoramic.to_vec(),
                },
            },
            quantitative_indicators,
            qualitative_analysis,
            comparison,
            interpretation,
            metadata: AnalysisMetadata {
                generated_by: self.config.generated_by.clone(),
                model_version: self.config.model_version.clone(),
                processed_at,
            },
        }
    }

    fn compare_with_prior(
        &self,
        evaluation_id: &EvaluationId,
        current: &QuantitativeIndicators,
        prior: Option<&PriorEvaluation>,
        evaluated_at: DateTime<Utc>,
    ) -> ComparisonSection {
        let Some(prior) = prior else {
            return ComparisonSection::first_evaluation();
        };

        match self
            .comparator
            .compare_dated(current, evaluated_at, &prior.indicators, prior.created_at)
        {
            Ok(outcome) => ComparisonSection::Comparison(outcome),
            Err(error) => {
                warn!(
                    evaluation = %evaluation_id,
                    prior = %prior.evaluation_id,
                    %error,
                    "ignoring malformed prior evaluation"
                );
                ComparisonSection::first_evaluation()
            }
        }
    }
}

/// One-shot synthesis with default settings and entropy-seeded noise.
pub fn synthesize(request: SynthesisRequest) -> AnalysisResult {
    IndicatorSynthesizer::default().synthesize(request, &mut RandomNoise::from_entropy())
}
