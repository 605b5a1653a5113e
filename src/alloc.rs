//! Selection helpers over per-arm scores.
//!
//! Deterministic: ties always resolve to the lower arm index.

/// Indices of the `k` largest values, largest first.
///
/// Ties keep index order. Returns fewer than `k` indices only when `values` is shorter.
pub fn top_k_indices(values: &[f64], k: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    // Stable sort: equal values keep ascending index order.
    idx.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    idx.truncate(k);
    idx
}

/// Index of the first maximum, or `None` for an empty slice.
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some(b) if v <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
