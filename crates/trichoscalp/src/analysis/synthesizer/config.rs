use serde::{Deserialize, Serialize};

/// Capture expectations and provenance stamped on every synthesized result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Leading images treated as the standardized 3x3 trichoscopic grid.
    pub standardized_capture_count: usize,
    /// Total captures of a complete photo documentation session.
    pub expected_capture_count: usize,
    pub generated_by: String,
    pub model_version: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            standardized_capture_count: 9,
            expected_capture_count: 14,
            generated_by: "Assessoria de Anamnese – IA TrichoScalp".to_string(),
            model_version: "1.0.0".to_string(),
        }
    }
}
