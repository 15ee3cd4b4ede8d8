//! Multiset arithmetic over token sequences.

use logic::{LogicToken, TokenSequence};

use crate::counts::TokenCounts;

/// Remove template tokens from `tokens`.
///
/// Each template occurrence cancels at most one occurrence of the same
/// category. Tokens are consumed first come, first served, so survivors keep
/// their relative order.
pub fn subtract(tokens: &[LogicToken], template: &[LogicToken]) -> TokenSequence {
    if template.is_empty() {
        return tokens.iter().copied().collect();
    }
    subtract_budget(tokens, TokenCounts::from_tokens(template))
}

/// [`subtract`] with a precomputed template budget.
pub fn subtract_budget(tokens: &[LogicToken], mut budget: TokenCounts) -> TokenSequence {
    tokens.iter().copied().filter(|&t| !budget.take(t)).collect()
}

/// Weighted Jaccard similarity of two sequences as multisets, in `[0, 100]`.
///
/// `100 * Σ min(countA, countB) / Σ max(countA, countB)`; `0` when both are
/// empty. Order within each sequence is irrelevant.
pub fn similarity(a: &[LogicToken], b: &[LogicToken]) -> f64 {
    similarity_counts(&TokenCounts::from_tokens(a), &TokenCounts::from_tokens(b))
}

/// [`similarity`] over precomputed counts.
pub fn similarity_counts(a: &TokenCounts, b: &TokenCounts) -> f64 {
    let union = a.union_size(b);
    if union == 0 {
        return 0.0;
    }
    100.0 * a.intersection_size(b) as f64 / union as f64
}
