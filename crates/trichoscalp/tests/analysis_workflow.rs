//! End-to-end visits of one client through the analysis service facade and HTTP router.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};

    use trichoscalp::analysis::{
        AnalysisService, EvaluationId, EvaluationRecord, EvaluationRepository,
        IndicatorSynthesizer, RepositoryError, SubjectId, ZeroNoise,
    };

    #[derive(Default)]
    pub struct ClinicRepository {
        records: Mutex<BTreeMap<EvaluationId, EvaluationRecord>>,
    }

    impl ClinicRepository {
        fn analysed(&self, subject: &SubjectId) -> Vec<EvaluationRecord> {
            let records = self.records.lock().expect("repository mutex poisoned");
            let mut analysed: Vec<_> = records
                .values()
                .filter(|record| &record.subject_id == subject && record.analysis.is_some())
                .cloned()
                .collect();
            analysed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            analysed
        }
    }

    impl EvaluationRepository for ClinicRepository {
        fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
            let mut records = self.records.lock().expect("repository mutex poisoned");
            if records.contains_key(&record.evaluation_id) {
                return Err(RepositoryError::Conflict);
            }
            records.insert(record.evaluation_id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
            let mut records = self.records.lock().expect("repository mutex poisoned");
            match records.get_mut(&record.evaluation_id) {
                Some(existing) => {
                    *existing = record;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }

        fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("repository mutex poisoned")
                .get(id)
                .cloned())
        }

        fn latest_analysed(
            &self,
            subject: &SubjectId,
            excluding: &EvaluationId,
        ) -> Result<Option<EvaluationRecord>, RepositoryError> {
            Ok(self
                .analysed(subject)
                .into_iter()
                .find(|record| &record.evaluation_id != excluding))
        }

        fn analysed_history(
            &self,
            subject: &SubjectId,
        ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
            Ok(self.analysed(subject))
        }
    }

    pub fn service() -> AnalysisService<ClinicRepository> {
        AnalysisService::new(
            Arc::new(ClinicRepository::default()),
            IndicatorSynthesizer::default(),
            Box::new(ZeroNoise),
        )
    }

    pub fn session(count: usize) -> Vec<String> {
        (0..count)
            .map(|index| format!("evaluations/client-7/capture-{index}.jpg"))
            .collect()
    }

    pub fn day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 14, 30, 0)
            .single()
            .expect("valid date")
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use trichoscalp::analysis::{
    analysis_router, validate_analysis_result, ComparisonSection, EvolutionStatus, SubjectId,
};

use common::*;

#[test]
fn three_visits_track_progress_against_the_previous_one() {
    let service = service();
    let subject = SubjectId("client-7".to_string());

    let first = service.register(subject.clone(), Some(day(2))).expect("registered");
    let baseline = service
        .analyze(&first.evaluation_id, session(3))
        .expect("baseline analysis");
    assert_eq!(baseline.comparison, ComparisonSection::first_evaluation());

    let second = service.register(subject.clone(), Some(day(16))).expect("registered");
    let follow_up = service
        .analyze(&second.evaluation_id, session(14))
        .expect("follow-up analysis");
    let outcome = follow_up.comparison.outcome().expect("compared with baseline");
    assert_eq!(outcome.previous, baseline.quantitative_indicators);
    assert_eq!(outcome.evolution.status, EvolutionStatus::Melhora);

    let evolution = service.evolution(&subject).expect("evolution available");
    let latest = evolution.outcome().expect("two analysed visits");
    assert_eq!(latest.days_between_evaluations, 14);
    assert_eq!(latest.current, follow_up.quantitative_indicators);

    let serialized = serde_json::to_value(&follow_up).expect("serializable");
    assert!(validate_analysis_result(&serialized));
}

#[tokio::test]
async fn http_flow_registers_and_analyses_an_evaluation() {
    let router = analysis_router(Arc::new(service()));

    let created = router
        .clone()
        .oneshot(
            Request::post("/api/v1/evaluations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"subject_id":"client-9"}"#))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);
    let view: Value = serde_json::from_slice(
        &axum::body::to_bytes(created.into_body(), 4096)
            .await
            .expect("body"),
    )
    .expect("json");
    let evaluation_id = view["evaluation_id"].as_str().expect("id").to_string();

    let payload = serde_json::json!({ "image_urls": session(10) });
    let analysed = router
        .clone()
        .oneshot(
            Request::post(format!("/api/v1/evaluations/{evaluation_id}/analysis"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(analysed.status(), StatusCode::OK);

    let status = router
        .oneshot(
            Request::get(format!("/api/v1/evaluations/{evaluation_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let view: Value = serde_json::from_slice(
        &axum::body::to_bytes(status.into_body(), 4096)
            .await
            .expect("body"),
    )
    .expect("json");
    assert_eq!(view["status"], "completed");
    assert!(view["global_score"].as_f64().is_some());
}
