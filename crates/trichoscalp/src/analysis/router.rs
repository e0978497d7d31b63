use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{EvaluationId, SubjectId};
use super::repository::{EvaluationRepository, RepositoryError};
use super::service::{AnalysisService, AnalysisServiceError};
use super::validation::parse_indicator_set;

#[derive(Debug, Deserialize)]
pub struct RegisterEvaluation {
    pub subject_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeEvaluation {
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Untyped pair of indicator sets, validated field by field before comparing.
#[derive(Debug, Deserialize)]
pub struct CompareIndicators {
    pub current: Value,
    pub previous: Value,
}

/// Evaluation registration, analysis, status and comparison endpoints.
pub fn analysis_router<R>(service: Arc<AnalysisService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(register_handler::<R>))
        .route(
            "/api/v1/evaluations/:evaluation_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/analysis",
            post(analyze_handler::<R>),
        )
        .route(
            "/api/v1/subjects/:subject_id/evolution",
            get(evolution_handler::<R>),
        )
        .route("/api/v1/comparisons", post(compare_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<AnalysisService<R>>>,
    axum::Json(body): axum::Json<RegisterEvaluation>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.register(SubjectId(body.subject_id), body.created_at) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<AnalysisService<R>>>,
    Path(evaluation_id): Path<String>,
    axum::Json(body): axum::Json<AnalyzeEvaluation>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.analyze(&EvaluationId(evaluation_id), body.image_urls) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AnalysisService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.status(&EvaluationId(evaluation_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evolution_handler<R>(
    State(service): State<Arc<AnalysisService<R>>>,
    Path(subject_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let subject_id = SubjectId(subject_id);
    match service.evolution(&subject_id) {
        Ok(section) => {
            let summary = section
                .outcome()
                .map(|outcome| service.synthesizer().comparator().executive_summary(outcome));
            let payload = json!({
                "subject_id": subject_id,
                "comparison": section,
                "executive_summary": summary,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compare_handler<R>(
    State(service): State<Arc<AnalysisService<R>>>,
    axum::Json(body): axum::Json<CompareIndicators>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let comparator = service.synthesizer().comparator();
    let outcome = parse_indicator_set(&body.current, "current").and_then(|current| {
        let previous = parse_indicator_set(&body.previous, "previous")?;
        comparator.compare(&current, &previous)
    });

    match outcome {
        Ok(outcome) => {
            let payload = json!({
                "executive_summary": comparator.executive_summary(&outcome),
                "outcome": outcome,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error.into()),
    }
}

fn error_response(error: AnalysisServiceError) -> Response {
    let status = match &error {
        AnalysisServiceError::NoImages
        | AnalysisServiceError::InvalidRequest(_)
        | AnalysisServiceError::Comparison(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AnalysisServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AnalysisServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
