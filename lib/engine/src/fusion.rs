//! Relative score fusion for hybrid queries
//!
//! Keyword and vector scores live on different scales, so each side is
//! min-max scaled to `[0, 1]` before mixing with `alpha`.

use ahash::AHashMap;

/// A fused hit borrowing its id from the partition
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit<'a> {
    pub id: &'a str,
    pub score: f32,
    pub explain: String,
}

/// Combine keyword and vector scores as `alpha * vector + (1 - alpha) * keyword`.
///
/// An id missing from one side contributes 0 on that side. Hits come back in
/// no particular order.
pub fn relative_score_fusion<'a>(
    keyword: &[(&'a str, f32)],
    vector: &[(&'a str, f32)],
    alpha: f32,
) -> Vec<ScoredHit<'a>> {
    let alpha = alpha.clamp(0.0, 1.0);
    let keyword_scaled = min_max(keyword);
    let vector_scaled = min_max(vector);

    let mut ids: Vec<&'a str> = keyword.iter().chain(vector).map(|(id, _)| *id).collect();
    ids.sort_unstable();
    ids.dedup();

    ids.into_iter()
        .map(|id| {
            let (kw_raw, kw) = keyword_scaled.get(id).copied().unwrap_or((0.0, 0.0));
            let (vec_raw, vec) = vector_scaled.get(id).copied().unwrap_or((0.0, 0.0));
            ScoredHit {
                id,
                score: alpha * vec + (1.0 - alpha) * kw,
                explain: format!(
                    "(hybrid) keyword: {kw_raw:.4} (normalized {kw:.4}), vector: {vec_raw:.4} (normalized {vec:.4}), alpha {alpha:.2}"
                ),
            }
        })
        .collect()
}

/// id -> (raw, scaled). A constant score scales to 1.0.
fn min_max<'a>(scores: &[(&'a str, f32)]) -> AHashMap<&'a str, (f32, f32)> {
    let (min, max) = scores
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), (_, s)| (lo.min(*s), hi.max(*s)));
    let range = max - min;

    scores
        .iter()
        .map(|(id, s)| {
            let scaled = if range > f32::EPSILON { (s - min) / range } else { 1.0 };
            (*id, (*s, scaled))
        })
        .collect()
}
