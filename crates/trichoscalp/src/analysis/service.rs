use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::comparison::ComparisonError;
use super::domain::{AnalysisResult, ComparisonSection, EvaluationId, SubjectId};
use super::format::days_between;
use super::repository::{
    EvaluationRecord, EvaluationRepository, EvaluationStatus, EvaluationStatusView,
    RepositoryError,
};
use super::synthesizer::{IndicatorSynthesizer, NoiseSource, RandomNoise, SynthesisRequest};
use crate::config::AnalysisSettings;

/// Coordinates the repository, the synthesizer and the noise source for each visit.
pub struct AnalysisService<R> {
    repository: Arc<R>,
    synthesizer: Arc<IndicatorSynthesizer>,
    noise: Mutex<Box<dyn NoiseSource>>,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<R> AnalysisService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        synthesizer: IndicatorSynthesizer,
        noise: Box<dyn NoiseSource>,
    ) -> Self {
        Self {
            repository,
            synthesizer: Arc::new(synthesizer),
            noise: Mutex::new(noise),
        }
    }

    /// Seeded noise when configured, entropy otherwise.
    pub fn from_settings(repository: Arc<R>, settings: &AnalysisSettings) -> Self {
        let noise: Box<dyn NoiseSource> = match settings.noise_seed {
            Some(seed) => Box::new(RandomNoise::seeded(seed)),
            None => Box::new(RandomNoise::from_entropy()),
        };
        Self::new(repository, IndicatorSynthesizer::default(), noise)
    }

    pub fn synthesizer(&self) -> &IndicatorSynthesizer {
        &self.synthesizer
    }

    /// Opens a new pending evaluation for `subject_id`.
    pub fn register(
        &self,
        subject_id: SubjectId,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<EvaluationRecord, AnalysisServiceError> {
        if subject_id.0.trim().is_empty() {
            return Err(AnalysisServiceError::InvalidRequest(
                "subject id must not be blank".to_string(),
            ));
        }

        let record = EvaluationRecord::new(
            next_evaluation_id(),
            subject_id,
            created_at.unwrap_or_else(Utc::now),
        );
        let stored = self.repository.insert(record)?;
        info!(evaluation = %stored.evaluation_id, subject = %stored.subject_id, "evaluation registered");
        Ok(stored)
    }

    /// Runs the mock analysis for an evaluation and persists the result.
    pub fn analyze(
        &self,
        evaluation_id: &EvaluationId,
        image_urls: Vec<String>,
    ) -> Result<AnalysisResult, AnalysisServiceError> {
        if image_urls.is_empty() {
            return Err(AnalysisServiceError::NoImages);
        }
        if evaluation_id.0.trim().is_empty() {
            return Err(AnalysisServiceError::InvalidRequest(
                "evaluation id must not be blank".to_string(),
            ));
        }

        let mut record = self
            .repository
            .fetch(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?;

        let prior = match self
            .repository
            .latest_analysed(&record.subject_id, evaluation_id)
        {
            Ok(found) => found.and_then(|prior| prior.prior_evaluation()),
            Err(error) => {
                warn!(evaluation = %evaluation_id, %error, "prior evaluation lookup failed; continuing without comparison");
                None
            }
        };

        record.status = EvaluationStatus::Analyzing;
        self.repository.update(record.clone())?;

        let request = SynthesisRequest {
            subject_id: record.subject_id.clone(),
            evaluation_id: evaluation_id.clone(),
            image_urls,
            prior,
            evaluated_at: Some(record.created_at),
        };
        let result = {
            let mut noise = self.noise.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            self.synthesizer.synthesize(request, &mut **noise)
        };

        let mut completed = record.clone();
        completed.status = EvaluationStatus::Completed;
        completed.analysis = Some(result.clone());
        if let Err(error) = self.repository.update(completed) {
            record.status = EvaluationStatus::Failed;
            if let Err(mark_error) = self.repository.update(record) {
                warn!(evaluation = %evaluation_id, error = %mark_error, "could not mark evaluation as failed");
            }
            return Err(error.into());
        }

        info!(
            evaluation = %evaluation_id,
            global_score = result.interpretation.global_score,
            compared = result.comparison.outcome().is_some(),
            "analysis completed"
        );
        Ok(result)
    }

    pub fn status(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<EvaluationStatusView, AnalysisServiceError> {
        let record = self
            .repository
            .fetch(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record.status_view())
    }

    /// Compares the two most recent analysed evaluations of a subject.
    pub fn evolution(&self, subject_id: &SubjectId) -> Result<ComparisonSection, AnalysisServiceError> {
        let history = self.repository.analysed_history(subject_id)?;
        let (Some(latest), Some(previous)) = (history.first(), history.get(1)) else {
            return Ok(ComparisonSection::first_evaluation());
        };

        let (Some(current), Some(prior)) = (&latest.analysis, &previous.analysis) else {
            return Ok(ComparisonSection::first_evaluation());
        };

        let outcome = self
            .synthesizer
            .comparator()
            .compare(&current.quantitative_indicators, &prior.quantitative_indicators)?
            .with_interval(days_between(latest.created_at, previous.created_at));

        Ok(ComparisonSection::Comparison(outcome))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("at least one image is required for analysis")]
    NoImages,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}
