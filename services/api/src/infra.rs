use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use trichoscalp::analysis::{
    parse_indicator_set, EvaluationId, EvaluationRecord, EvaluationRepository,
    QuantitativeIndicators, RepositoryError, SubjectId,
};
use trichoscalp::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local evaluation store backing the API and the CLI commands.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    records: Arc<Mutex<HashMap<EvaluationId, EvaluationRecord>>>,
}

impl InMemoryEvaluationRepository {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<EvaluationId, EvaluationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("evaluation store poisoned".to_string()))
    }

    fn analysed_for(&self, subject: &SubjectId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.guard()?;
        let mut analysed: Vec<EvaluationRecord> = guard
            .values()
            .filter(|record| &record.subject_id == subject && record.analysis.is_some())
            .cloned()
            .collect();
        analysed.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.evaluation_id.cmp(&a.evaluation_id))
        });
        Ok(analysed)
    }
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.evaluation_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.evaluation_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.evaluation_id) {
            guard.insert(record.evaluation_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn latest_analysed(
        &self,
        subject: &SubjectId,
        excluding: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(self
            .analysed_for(subject)?
            .into_iter()
            .find(|record| &record.evaluation_id != excluding))
    }

    fn analysed_history(
        &self,
        subject: &SubjectId,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        self.analysed_for(subject)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Midday UTC of `date`, used when CLI visits only carry a calendar date.
pub(crate) fn visit_timestamp(date: NaiveDate) -> Result<DateTime<Utc>, AppError> {
    date.and_hms_opt(12, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Input(format!("cannot build a timestamp for {date}")))
}

pub(crate) fn parse_indicator_json(
    raw: &str,
    set: &'static str,
) -> Result<QuantitativeIndicators, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| AppError::Input(format!("{set} indicators are not valid JSON ({err})")))?;
    Ok(parse_indicator_set(&value, set)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use trichoscalp::analysis::EvaluationStatus;

    fn record(id: &str, subject: &str, created_at: DateTime<Utc>) -> EvaluationRecord {
        EvaluationRecord::new(
            EvaluationId(id.to_string()),
            SubjectId(subject.to_string()),
            created_at,
        )
    }

    #[test]
    fn update_requires_existing_record() {
        let repository = InMemoryEvaluationRepository::default();
        let now = Utc::now();

        let error = repository
            .update(record("eval-1", "client-1", now))
            .expect_err("record missing");
        assert!(matches!(error, RepositoryError::NotFound));

        repository
            .insert(record("eval-1", "client-1", now))
            .expect("inserted");
        assert!(matches!(
            repository.insert(record("eval-1", "client-1", now)),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn history_skips_unanalysed_records() {
        let repository = InMemoryEvaluationRepository::default();
        let now = Utc::now();
        repository
            .insert(record("eval-1", "client-1", now - Duration::days(3)))
            .expect("inserted");

        let history = repository
            .analysed_history(&SubjectId("client-1".to_string()))
            .expect("history");
        assert!(history.is_empty());

        let stored = repository
            .fetch(&EvaluationId("eval-1".to_string()))
            .expect("fetch")
            .expect("present");
        assert_eq!(stored.status, EvaluationStatus::Pending);
    }

    #[test]
    fn parses_dates_and_indicator_json() {
        assert_eq!(
            parse_date(" 2025-04-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid"))
        );
        assert!(parse_date("01/04/2025").is_err());

        let parsed = parse_indicator_json(
            r#"{"densidade_capilar":0.7,"oleosidade":0.4,"descamacao":0.2,"miniaturizacao":0.3,"inflamacao":0.1}"#,
            "current",
        )
        .expect("valid set");
        assert_eq!(parsed.oleosidade, 0.4);

        let error = parse_indicator_json(r#"{"densidade_capilar":0.7}"#, "current")
            .expect_err("incomplete set");
        assert!(error.to_string().contains("oleosidade"));
    }
}
