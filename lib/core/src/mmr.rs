//! Maximal Marginal Relevance
//!
//! Re-ranks a candidate pool so that each pick is relevant to the query but
//! dissimilar to what was already picked.

use crate::vector::cosine_similarity;

/// Select up to `k` diverse candidates among the first `fetch_k`.
///
/// Each round scores every unselected candidate `i` as
/// `lambda * sim(query, i) - (1 - lambda) * max_{j selected} sim(i, j)`
/// and picks the best one, lowest index first on ties. `lambda_mult` is
/// clamped to `[0, 1]`: 1.0 ranks purely by relevance, 0.0 purely by
/// diversity.
///
/// Returns indices into `candidates` in selection order, without duplicates;
/// its length is `min(k, fetch_k, candidates.len())`.
pub fn select_diverse(
    query: &[f32],
    candidates: &[Vec<f32>],
    k: usize,
    fetch_k: usize,
    lambda_mult: f32,
) -> Vec<usize> {
    let pool = fetch_k.min(candidates.len());
    let target = k.min(pool);
    if target == 0 {
        return Vec::new();
    }

    let lambda = if lambda_mult.is_nan() {
        0.5
    } else {
        lambda_mult.clamp(0.0, 1.0)
    };

    let relevance: Vec<f32> = candidates[..pool]
        .iter()
        .map(|c| cosine_similarity(query, c))
        .collect();

    // Running max similarity of each candidate to the selected set
    let mut redundancy = vec![0.0f32; pool];
    let mut taken = vec![false; pool];
    let mut selected = Vec::with_capacity(target);

    while selected.len() < target {
        let mut best: Option<(usize, f32)> = None;
        for i in 0..pool {
            if taken[i] {
                continue;
            }
            let score = lambda * relevance[i] - (1.0 - lambda) * redundancy[i];
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((i, score)),
            }
        }

        let Some((pick, _)) = best else { break };
        taken[pick] = true;
        selected.push(pick);

        for i in 0..pool {
            if !taken[i] {
                let sim = cosine_similarity(&candidates[i], &candidates[pick]);
                if selected.len() == 1 || sim > redundancy[i] {
                    redundancy[i] = sim;
                }
            }
        }
    }

    selected
}
