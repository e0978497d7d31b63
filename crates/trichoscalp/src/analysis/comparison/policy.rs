use serde::{Deserialize, Serialize};

use super::super::domain::IndicatorSet;
use super::super::format::round_to;
use super::config::ComparisonConfig;

/// Per-indicator movement between two evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Improved,
    Worsened,
    Stable,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Direction::Improved => "melhorou",
            Direction::Worsened => "piorou",
            Direction::Stable => "estável",
        }
    }
}

/// Overall evolution between two evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionStatus {
    Melhora,
    Piora,
    Estavel,
    Mista,
}

impl EvolutionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvolutionStatus::Melhora => "melhora",
            EvolutionStatus::Piora => "piora",
            EvolutionStatus::Estavel => "estavel",
            EvolutionStatus::Mista => "mista",
        }
    }
}

/// Aggregated classification with the weighted evolution score.
///
/// `evolution_score` is the raw signed sum of `delta * weight`. Improvements of the
/// lower-is-better indicators therefore pull the score down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub status: EvolutionStatus,
    pub description: String,
    pub improved_count: usize,
    pub worsened_count: usize,
    pub stable_count: usize,
    pub evolution_score: f64,
}

pub(crate) fn summarize(
    directions: &IndicatorSet<Direction>,
    deltas: &IndicatorSet<f64>,
    config: &ComparisonConfig,
) -> EvolutionSummary {
    let mut improved = 0;
    let mut worsened = 0;
    let mut stable = 0;
    let mut score = 0.0;

    for (indicator, direction) in directions.iter() {
        score += deltas.get(indicator) * config.weight(indicator);
        match direction {
            Direction::Improved => improved += 1,
            Direction::Worsened => worsened += 1,
            Direction::Stable => stable += 1,
        }
    }

    let status = decide_status(improved, worsened, stable);

    EvolutionSummary {
        status,
        description: describe(status, improved, worsened).to_string(),
        improved_count: improved,
        worsened_count: worsened,
        stable_count: stable,
        evolution_score: round_to(score, 2),
    }
}

/// A status wins only with a strict majority over both other counts.
pub(crate) fn decide_status(improved: usize, worsened: usize, stable: usize) -> EvolutionStatus {
    if improved > worsened && improved > stable {
        EvolutionStatus::Melhora
    } else if worsened > improved && worsened > stable {
        EvolutionStatus::Piora
    } else if stable > improved && stable > worsened {
        EvolutionStatus::Estavel
    } else {
        EvolutionStatus::Mista
    }
}

fn describe(status: EvolutionStatus, improved: usize, worsened: usize) -> &'static str {
    match status {
        EvolutionStatus::Melhora if improved >= 4 => {
            "Evolução muito positiva. Todos os indicadores principais apresentaram melhora significativa."
        }
        EvolutionStatus::Melhora if improved >= 3 => {
            "Evolução positiva. Maioria dos indicadores apresentando melhora consistente."
        }
        EvolutionStatus::Melhora => {
            "Evolução moderada. Alguns indicadores melhoraram, outros mantiveram-se estáveis."
        }
        EvolutionStatus::Piora if worsened >= 4 => {
            "Evolução preocupante. Múltiplos indicadores apresentaram piora significativa."
        }
        EvolutionStatus::Piora if worsened >= 3 => {
            "Evolução negativa. Maioria dos indicadores apresentando piora."
        }
        EvolutionStatus::Piora => {
            "Evolução desfavorável. Alguns indicadores pioraram, requer atenção."
        }
        EvolutionStatus::Estavel => {
            "Evolução estável. Indicadores mantiveram-se dentro dos valores esperados."
        }
        EvolutionStatus::Mista => {
            "Evolução mista. Alguns indicadores melhoraram, outros pioraram. Análise individual necessária."
        }
    }
}
