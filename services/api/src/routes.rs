use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use trichoscalp::analysis::{analysis_router, AnalysisService, EvaluationRepository};
use trichoscalp::report::references::{self, CatalogStatistics, Reference};

#[derive(Debug, Serialize)]
pub(crate) struct ReferencesResponse {
    pub(crate) references: &'static [Reference],
    pub(crate) citations: String,
    pub(crate) statistics: CatalogStatistics,
}

pub(crate) fn with_analysis_routes<R>(service: Arc<AnalysisService<R>>) -> axum::Router
where
    R: EvaluationRepository + 'static,
{
    analysis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/references", axum::routing::get(references_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Literature cited in evaluation reports.
pub(crate) async fn references_endpoint() -> Json<ReferencesResponse> {
    Json(ReferencesResponse {
        references: references::catalog(),
        citations: references::citation_list(),
        statistics: references::statistics(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryEvaluationRepository;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use trichoscalp::analysis::{IndicatorSynthesizer, ZeroNoise};

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(AnalysisService::new(
            Arc::new(InMemoryEvaluationRepository::default()),
            IndicatorSynthesizer::default(),
            Box::new(ZeroNoise),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_analysis_routes(service).layer(Extension(state))
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("router responds")
            .status()
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        assert_eq!(status_of(app(false), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_the_flag() {
        assert_eq!(
            status_of(app(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(app(true), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn analysis_routes_are_mounted() {
        assert_eq!(
            status_of(app(true), "/api/v1/evaluations/eval-404").await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(app(true), "/api/v1/subjects/client-1/evolution").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn references_endpoint_lists_catalog() {
        let Json(body) = references_endpoint().await;
        assert_eq!(body.references.len(), 8);
        assert_eq!(body.statistics.total, 8);
        assert!(body.citations.starts_with("1. "));
    }
}
