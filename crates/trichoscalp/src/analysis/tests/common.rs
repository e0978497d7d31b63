use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::analysis::domain::{EvaluationId, IndicatorSet, QuantitativeIndicators, SubjectId};
use crate::analysis::repository::{
    EvaluationRecord, EvaluationRepository, EvaluationStatus, RepositoryError,
};
use crate::analysis::synthesizer::{IndicatorSynthesizer, NoiseSource, ZeroNoise};
use crate::analysis::{analysis_router, AnalysisService};

pub(super) fn indicators(
    densidade_capilar: f64,
    oleosidade: f64,
    descamacao: f64,
    miniaturizacao: f64,
    inflamacao: f64,
) -> QuantitativeIndicators {
    IndicatorSet {
        densidade_capilar,
        oleosidade,
        descamacao,
        miniaturizacao,
        inflamacao,
    }
}

pub(super) fn image_urls(count: usize) -> Vec<String> {
    (1..=count)
        .map(|index| format!("https://storage.example/evaluations/img-{index:02}.jpg"))
        .collect()
}

pub(super) fn visit_day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0)
        .single()
        .expect("valid visit date")
}

/// Always returns the same fraction of the requested range.
pub(super) struct ScaledNoise(pub f64);

impl NoiseSource for ScaledNoise {
    fn draw(&mut self, upper: f64) -> f64 {
        upper * self.0
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EvaluationId, EvaluationRecord>>>,
}

impl MemoryRepository {
    fn subject_analysed(&self, subject: &SubjectId) -> Vec<EvaluationRecord> {
        let records = self.records.lock().expect("repository mutex poisoned");
        let mut analysed: Vec<EvaluationRecord> = records
            .values()
            .filter(|record| &record.subject_id == subject && record.analysis.is_some())
            .cloned()
            .collect();
        analysed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        analysed
    }
}

impl EvaluationRepository for MemoryRepository {
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
        records.insert(record.evaluation_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn latest_analysed(
        &self,
        subject: &SubjectId,
        excluding: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(self
            .subject_analysed(subject)
            .into_iter()
            .find(|record| &record.evaluation_id != excluding))
    }

    fn analysed_history(
        &self,
        subject: &SubjectId,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Ok(self.subject_analysed(subject))
    }
}

/// Stores and fetches normally but cannot answer history queries.
#[derive(Default)]
pub(super) struct HistoryOutageRepository {
    inner: MemoryRepository,
}

impl EvaluationRepository for HistoryOutageRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn latest_analysed(
        &self,
        _subject: &SubjectId,
        _excluding: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("history index offline".to_string()))
    }

    fn analysed_history(
        &self,
        _subject: &SubjectId,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("history index offline".to_string()))
    }
}

/// Accepts every write except the one that stores a completed analysis.
#[derive(Default)]
pub(super) struct CompletionRejectingRepository {
    pub(super) inner: MemoryRepository,
}

impl EvaluationRepository for CompletionRejectingRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        if record.status == EvaluationStatus::Completed {
            return Err(RepositoryError::Unavailable("results table read-only".to_string()));
        }
        self.inner.update(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn latest_analysed(
        &self,
        subject: &SubjectId,
        excluding: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        self.inner.latest_analysed(subject, excluding)
    }

    fn analysed_history(
        &self,
        subject: &SubjectId,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        self.inner.analysed_history(subject)
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EvaluationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_analysed(
        &self,
        _subject: &SubjectId,
        _excluding: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn analysed_history(
        &self,
        _subject: &SubjectId,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with<R: EvaluationRepository + 'static>(
    repository: Arc<R>,
) -> AnalysisService<R> {
    AnalysisService::new(repository, IndicatorSynthesizer::default(), Box::new(ZeroNoise))
}

pub(super) fn build_service() -> (AnalysisService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    (service_with(repository.clone()), repository)
}

pub(super) fn router_with_service(service: AnalysisService<MemoryRepository>) -> axum::Router {
    analysis_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
