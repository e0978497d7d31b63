use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnalysisResult, EvaluationId, PriorEvaluation, SubjectId};

/// Lifecycle of an evaluation as seen by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Pending,
    Analyzing,
    Completed,
    Failed,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Pending => "pending",
            EvaluationStatus::Analyzing => "analyzing",
            EvaluationStatus::Completed => "completed",
            EvaluationStatus::Failed => "failed",
        }
    }
}

/// Stored evaluation together with its analysis, once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub evaluation_id: EvaluationId,
    pub subject_id: SubjectId,
    pub created_at: DateTime<Utc>,
    pub status: EvaluationStatus,
    pub analysis: Option<AnalysisResult>,
}

impl EvaluationRecord {
    pub fn new(evaluation_id: EvaluationId, subject_id: SubjectId, created_at: DateTime<Utc>) -> Self {
        Self {
            evaluation_id,
            subject_id,
            created_at,
            status: EvaluationStatus::Pending,
            analysis: None,
        }
    }

    /// Indicators of this record as a comparison baseline, when analysed.
    pub fn prior_evaluation(&self) -> Option<PriorEvaluation> {
        self.analysis
            .as_ref()
            .map(|analysis| analysis.as_prior(self.created_at))
    }

    pub fn status_view(&self) -> EvaluationStatusView {
        EvaluationStatusView {
            evaluation_id: self.evaluation_id.clone(),
            subject_id: self.subject_id.clone(),
            status: self.status.label(),
            created_at: self.created_at,
            global_score: self
                .analysis
                .as_ref()
                .map(|analysis| analysis.interpretation.global_score),
        }
    }
}

/// Persistence collaborator. Implementations must be safe to share across handlers.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    /// Most recent analysed evaluation of `subject`, ignoring `excluding`.
    fn latest_analysed(
        &self,
        subject: &SubjectId,
        excluding: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError>;
    /// Analysed evaluations of `subject`, newest first.
    fn analysed_history(&self, subject: &SubjectId)
        -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public projection of an evaluation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationStatusView {
    pub evaluation_id: EvaluationId,
    pub subject_id: SubjectId,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_score: Option<f64>,
}
