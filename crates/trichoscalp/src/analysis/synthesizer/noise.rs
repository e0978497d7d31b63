use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the uniform noise layered over the deterministic indicator formulas.
///
/// The mock model is intentionally non-reproducible in production; tests inject a
/// seeded generator or [`ZeroNoise`] to pin the output.
pub trait NoiseSource: Send {
    /// Uniform draw in `[0, upper)`. Returns `0.0` when `upper` is not positive.
    fn draw(&mut self, upper: f64) -> f64;
}

pub struct RandomNoise {
    rng: StdRng,
}

impl RandomNoise {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for RandomNoise {
    fn draw(&mut self, upper: f64) -> f64 {
        if upper <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..upper)
    }
}

/// Noise source that always yields zero, exposing the deterministic base formulas.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn draw(&mut self, _upper: f64) -> f64 {
        0.0
    }
}
