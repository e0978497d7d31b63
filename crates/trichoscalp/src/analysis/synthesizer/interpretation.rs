use super::super::domain::{ComparisonSection, InterpretationResult, QuantitativeIndicators};
use super::super::format::round_to;
use super::noise::NoiseSource;

const BASE_SCORE: f64 = 5.0;

pub(crate) fn interpret(
    indicators: &QuantitativeIndicators,
    comparison: &ComparisonSection,
    noise: &mut dyn NoiseSource,
) -> InterpretationResult {
    let global_score = global_score(indicators);

    let mut narrative = score_band(global_score).to_string();
    if let Some(outcome) = comparison.outcome() {
        narrative.push_str(evolution_clause(outcome.evolution.improved_count));
    }

    let confidence = round_to((0.7 + noise.draw(0.25)).min(0.95), 2);

    InterpretationResult {
        narrative,
        confidence,
        global_score,
    }
}

/// Score in `[0, 10]`, one decimal place.
pub(crate) fn global_score(indicators: &QuantitativeIndicators) -> f64 {
    let mut score = BASE_SCORE;

    let density = indicators.densidade_capilar;
    score += if density > 0.7 {
        2.0
    } else if density > 0.5 {
        1.0
    } else if density < 0.3 {
        -2.0
    } else {
        -1.0
    };

    let oiliness = indicators.oleosidade;
    if (0.3..=0.6).contains(&oiliness) {
        score += 1.0;
    } else if oiliness > 0.8 || oiliness < 0.2 {
        score -= 1.0;
    }

    if indicators.miniaturizacao < 0.3 {
        score += 1.0;
    } else if indicators.miniaturizacao > 0.6 {
        score -= 1.5;
    }

    if indicators.inflamacao < 0.1 {
        score += 0.5;
    } else if indicators.inflamacao > 0.4 {
        score -= 1.0;
    }

    if indicators.descamacao < 0.2 {
        score += 0.5;
    } else if indicators.descamacao > 0.5 {
        score -= 0.5;
    }

    round_to(score.clamp(0.0, 10.0), 1)
}

fn score_band(score: f64) -> &'static str {
    if score >= 8.0 {
        "Excelente saúde capilar. Todos os indicadores dentro da normalidade."
    } else if score >= 6.0 {
        "Boa saúde capilar com pequenos ajustes necessários."
    } else if score >= 4.0 {
        "Saúde capilar moderada, requer atenção e tratamento específico."
    } else {
        "Saúde capilar comprometida, necessita intervenção imediata."
    }
}

fn evolution_clause(improved: usize) -> &'static str {
    if improved >= 3 {
        " Evolução muito positiva observada."
    } else if improved >= 1 {
        " Alguma melhora foi observada."
    } else {
        " Estabilidade ou piora nos indicadores."
    }
}
