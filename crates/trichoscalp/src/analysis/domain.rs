use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::comparison::ComparisonOutcome;

/// Identifier wrapper for the client whose scalp is being followed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub String);

/// Identifier wrapper for a single clinical visit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an increase of the indicator reflects a healthier scalp or a worse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    /// Direction check only; the stability band is applied by the comparator.
    pub fn is_improvement(self, delta: f64) -> bool {
        match self {
            Polarity::HigherIsBetter => delta > 0.0,
            Polarity::LowerIsBetter => delta < 0.0,
        }
    }
}

/// The five scalp indicators scored for every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    DensidadeCapilar,
    Oleosidade,
    Descamacao,
    Miniaturizacao,
    Inflamacao,
}

impl Indicator {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::DensidadeCapilar,
            Self::Oleosidade,
            Self::Descamacao,
            Self::Miniaturizacao,
            Self::Inflamacao,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DensidadeCapilar => "densidade_capilar",
            Self::Oleosidade => "oleosidade",
            Self::Descamacao => "descamacao",
            Self::Miniaturizacao => "miniaturizacao",
            Self::Inflamacao => "inflamacao",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DensidadeCapilar => "Densidade Capilar",
            Self::Oleosidade => "Oleosidade",
            Self::Descamacao => "Descamação",
            Self::Miniaturizacao => "Miniaturização",
            Self::Inflamacao => "Inflamação",
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Self::DensidadeCapilar => Polarity::HigherIsBetter,
            Self::Oleosidade | Self::Descamacao | Self::Miniaturizacao | Self::Inflamacao => {
                Polarity::LowerIsBetter
            }
        }
    }
}

/// One value per indicator, serialized with the indicator keys as field names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet<T> {
    pub densidade_capilar: T,
    pub oleosidade: T,
    pub descamacao: T,
    pub miniaturizacao: T,
    pub inflamacao: T,
}

impl<T> IndicatorSet<T> {
    /// Builds the set by visiting indicators in [`Indicator::ordered`] order.
    pub fn from_fn(mut value_for: impl FnMut(Indicator) -> T) -> Self {
        Self {
            densidade_capilar: value_for(Indicator::DensidadeCapilar),
            oleosidade: value_for(Indicator::Oleosidade),
            descamacao: value_for(Indicator::Descamacao),
            miniaturizacao: value_for(Indicator::Miniaturizacao),
            inflamacao: value_for(Indicator::Inflamacao),
        }
    }

    pub fn try_from_fn<E>(
        mut value_for: impl FnMut(Indicator) -> Result<T, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            densidade_capilar: value_for(Indicator::DensidadeCapilar)?,
            oleosidade: value_for(Indicator::Oleosidade)?,
            descamacao: value_for(Indicator::Descamacao)?,
            miniaturizacao: value_for(Indicator::Miniaturizacao)?,
            inflamacao: value_for(Indicator::Inflamacao)?,
        })
    }

    pub fn get(&self, indicator: Indicator) -> &T {
        match indicator {
            Indicator::DensidadeCapilar => &self.densidade_capilar,
            Indicator::Oleosidade => &self.oleosidade,
            Indicator::Descamacao => &self.descamacao,
            Indicator::Miniaturizacao => &self.miniaturizacao,
            Indicator::Inflamacao => &self.inflamacao,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, &T)> + '_ {
        Indicator::ordered()
            .into_iter()
            .map(move |indicator| (indicator, self.get(indicator)))
    }
}

/// Quantitative scalp indicators, each within `[0, 1]` and rounded to two decimals.
pub type QuantitativeIndicators = IndicatorSet<f64>;

/// Rule-based narrative derived from the quantitative indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitativeAnalysis {
    pub summary: String,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Final reading of the evaluation: global score (0-10) and model confidence (0-1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
    pub narrative: String,
    pub confidence: f64,
    pub global_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGroup {
    pub description: String,
    pub urls: Vec<String>,
}

/// Standardized 3x3 trichoscopic captures and the remaining panoramic photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGroups {
    pub standardized: ImageGroup,
    pub panoramic: ImageGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub generated_by: String,
    pub model_version: String,
    pub processed_at: DateTime<Utc>,
}

/// Indicators of an earlier evaluation of the same subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorEvaluation {
    pub evaluation_id: EvaluationId,
    pub created_at: DateTime<Utc>,
    pub indicators: QuantitativeIndicators,
}

pub const FIRST_EVALUATION_NOTE: &str =
    "Primeira avaliação - não há dados comparativos disponíveis.";

/// Comparison against the previous evaluation, or the explicit first-visit marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonSection {
    Comparison(ComparisonOutcome),
    NoPriorEvaluation { note: String },
}

impl ComparisonSection {
    pub fn first_evaluation() -> Self {
        Self::NoPriorEvaluation {
            note: FIRST_EVALUATION_NOTE.to_string(),
        }
    }

    pub fn outcome(&self) -> Option<&ComparisonOutcome> {
        match self {
            ComparisonSection::Comparison(outcome) => Some(outcome),
            ComparisonSection::NoPriorEvaluation { .. } => None,
        }
    }
}

/// Complete analysis of one evaluation. Never mutated once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub subject_id: SubjectId,
    pub evaluation_id: EvaluationId,
    pub evaluation_date: NaiveDate,
    pub image_groups: ImageGroups,
    pub quantitative_indicators: QuantitativeIndicators,
    pub qualitative_analysis: QualitativeAnalysis,
    pub comparison: ComparisonSection,
    pub interpretation: InterpretationResult,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn as_prior(&self, created_at: DateTime<Utc>) -> PriorEvaluation {
        PriorEvaluation {
            evaluation_id: self.evaluation_id.clone(),
            created_at,
            indicators: self.quantitative_indicators,
        }
    }
}
