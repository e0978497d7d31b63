use super::super::domain::QuantitativeIndicators;
use super::super::format::{clamp_unit, round_to};
use super::config::SynthesisConfig;
use super::noise::NoiseSource;

pub(crate) struct CaptureFactors {
    pub quality: f64,
    pub standardized: f64,
}

impl CaptureFactors {
    pub fn new(total: usize, standardized: usize, config: &SynthesisConfig) -> Self {
        Self {
            quality: saturating_ratio(total, config.expected_capture_count),
            standardized: saturating_ratio(standardized, config.standardized_capture_count),
        }
    }
}

fn saturating_ratio(count: usize, expected: usize) -> f64 {
    if expected == 0 {
        return 1.0;
    }
    (count as f64 / expected as f64).min(1.0)
}

/// Draw order is fixed: density, oiliness, flaking, miniaturization, inflammation.
/// The coupled indicators read the unrounded density.
pub(crate) fn derive_indicators(
    factors: &CaptureFactors,
    noise: &mut dyn NoiseSource,
) -> QuantitativeIndicators {
    let densidade_capilar = clamp_unit(0.5 + factors.standardized * 0.3 + noise.draw(0.2));
    let oleosidade = clamp_unit((0.7 - densidade_capilar * 0.4 + noise.draw(0.2)).max(0.1));
    let descamacao = clamp_unit((0.3 - factors.quality * 0.2 + noise.draw(0.15)).max(0.05));
    let miniaturizacao = clamp_unit((0.4 - densidade_capilar * 0.3 + noise.draw(0.2)).max(0.1));
    let inflamacao = clamp_unit((0.15 - factors.quality * 0.1 + noise.draw(0.1)).max(0.02));

    QuantitativeIndicators {
        densidade_capilar: round_to(densidade_capilar, 2),
        oleosidade: round_to(oleosidade, 2),
        descamacao: round_to(descamacao, 2),
        miniaturizacao: round_to(miniaturizacao, 2),
        inflamacao: round_to(inflamacao, 2),
    }
}
