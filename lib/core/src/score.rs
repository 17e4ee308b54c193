//! Relevance scores
//!
//! Engine-native scores are unbounded; callers that need a comparable
//! relevance in `[0, 1]` pass them through a [`RelevanceScoreFn`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Largest exponent `f64::exp` takes without overflowing
const EXP_CLAMP: f64 = 709.0;

/// Monotonic map from a raw engine score to a relevance value
pub type RelevanceScoreFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Logistic normalization `1 - 1 / (1 + e^x)`.
///
/// The exponent is clamped to `[-709, 709]` so the result is always finite
/// and in `[0, 1]`. `normalize_score(0.0) == 0.5`.
#[inline]
pub fn normalize_score(raw: f32) -> f32 {
    if raw.is_nan() {
        return 0.5;
    }
    let x = f64::from(raw).clamp(-EXP_CLAMP, EXP_CLAMP);
    (1.0 - 1.0 / (1.0 + x.exp())) as f32
}

/// The default relevance function
pub fn default_relevance_score_fn() -> RelevanceScoreFn {
    Arc::new(normalize_score)
}

/// A relevance value together with the engine's explanation of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: f32,
    pub explanation: String,
}

impl Score {
    pub fn new(value: f32, explanation: impl Into<String>) -> Self {
        Self {
            value,
            explanation: explanation.into(),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.value, self.explanation)
    }
}
