use serde::{Deserialize, Serialize};

/// A dense embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Dot product with two accumulators for better pipelining.
/// Mismatched lengths yield 0.0.
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot0 = 0.0f32;
    let mut dot1 = 0.0f32;

    let chunks = a.chunks_exact(4);
    let remainder = chunks.remainder();
    for (a_chunk, b_chunk) in chunks.zip(b.chunks_exact(4)) {
        dot0 += a_chunk[0] * b_chunk[0] + a_chunk[1] * b_chunk[1];
        dot1 += a_chunk[2] * b_chunk[2] + a_chunk[3] * b_chunk[3];
    }

    let tail = a.len() - remainder.len();
    for (x, y) in remainder.iter().zip(&b[tail..]) {
        dot0 += x * y;
    }

    dot0 + dot1
}

#[inline]
pub fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Zero-safe cosine similarity.
///
/// A zero vector, an empty vector or a dimension mismatch yields exactly 0.0,
/// so NaN never leaks into ranking.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let sim = dot(a, b) / (norm_a * norm_b);
    if sim.is_finite() {
        sim
    } else {
        0.0
    }
}
