//! Scoring arithmetic
//!
//! A document's score for a query term is the saturated, boost-weighted sum
//! of its length-normalized field hits, times the term's rarity. Prefix
//! expansions are further scaled by how much of the indexed term the query
//! actually typed.

use crate::config::{F32, U32};

/// How much a term match is worth given how many documents contain it.
///
/// `ln(1 + (N - df + 0.5) / (df + 0.5))`, clamped so a term present in every
/// document still scores zero or more. A term that occurs nowhere is worth 0.
#[inline]
pub fn calculate_idf(total_documents: usize, doc_frequency: usize) -> F32 {
    if doc_frequency == 0 {
        return 0.0;
    }
    let rarity = (total_documents as f32 - doc_frequency as f32 + 0.5)
        / (doc_frequency as f32 + 0.5);
    rarity.max(0.0).ln_1p()
}

/// Occurrences of a term in one field, scaled by how long that field is
/// compared with the same field on an average document.
///
/// A hit in a two-word title counts for more than a hit in a long keyword
/// list. `b` sets how strongly length matters; `b = 0` ignores it.
#[inline]
pub fn normalized_term_frequency(
    tf: U32,
    field_length: U32,
    average_field_length: F32,
    b: F32,
) -> F32 {
    if tf == 0 || average_field_length <= 0.0 {
        return 0.0;
    }
    let relative_length = field_length as f32 / average_field_length;
    let scale = 1.0 - b + b * relative_length;
    if scale <= 0.0 {
        return 0.0;
    }
    tf as f32 / scale
}

/// Caps the boosted sum of all field contributions for one term, so
/// repeating a word across fields has diminishing returns. The result
/// approaches `k1 + 1`; `k1 = 0` leaves the sum untouched.
#[inline]
pub fn saturate(aggregated_score: F32, k1: F32) -> F32 {
    if !(aggregated_score.is_finite() && aggregated_score > 0.0) {
        return 0.0;
    }
    if k1 <= 0.0 {
        aggregated_score
    } else {
        aggregated_score * (k1 + 1.0) / (aggregated_score + k1)
    }
}

/// Weight of an indexed term reached by prefix expansion
///
/// Longer completions of a short query term count for less:
/// weight = base * |q| / (|t| + 0.3 * (|t| - |q|))
#[inline]
pub fn prefix_match_weight(query_len: usize, term_len: usize, base_weight: F32) -> F32 {
    if term_len == 0 || query_len == 0 {
        return 0.0;
    }
    let distance = term_len.saturating_sub(query_len) as f32;
    base_weight * query_len as f32 / (term_len as f32 + 0.3 * distance)
}
