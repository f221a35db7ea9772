//! Weighted-ratio string similarity for playlist name lookup.
//!
//! Blends whole-string and token-based similarity so a query tolerates
//! reordered words, partial substrings and case differences. Scores range
//! from 0 (nothing in common) to 100 (equivalent after normalization).
//!
//! The blend works like the classic "weighted ratio": the plain ratio is
//! always a candidate, token-sort and token-set variants are scaled by
//! 0.95, and when the two strings differ a lot in length the partial
//! (best-window) variants take over, scaled by 0.9.

use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Case-folds, replaces every non-alphanumeric character with a space and
/// collapses runs of whitespace.
pub fn normalize(input: &str) -> String {
    let lowered: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain similarity between two strings: Levenshtein distance normalized
/// by the longer length, on a 0-100 scale.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    slice_ratio(&a, &b)
}

fn slice_ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    let longest = a.len().max(b.len());
    let distance = levenshtein(a, b);
    100.0 * (1.0 - distance as f64 / longest as f64)
}

/// Two-row Levenshtein distance (insert, delete, substitute all cost 1).
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Best ratio between the shorter string and any equal-length window of
/// the longer one, so a query scores high against a name that merely
/// contains it.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let mut best = 0.0f64;
    for start in 0..=(long.len() - short.len()) {
        let window = &long[start..start + short.len()];
        best = best.max(slice_ratio(short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn token_sorted(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio after sorting word tokens, making word order irrelevant.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&token_sorted(a), &token_sorted(b))
}

/// Token-set ratio: compares the shared tokens against each side's full
/// token set, so a query whose tokens are all contained in a name scores
/// a clean 100 regardless of the extra words.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let common = join_tokens(tokens_a.intersection(&tokens_b));
    let only_a = join_tokens(tokens_a.difference(&tokens_b));
    let only_b = join_tokens(tokens_b.difference(&tokens_a));

    let combined_a = join_nonempty(&common, &only_a);
    let combined_b = join_nonempty(&common, &only_b);

    ratio(&common, &combined_a)
        .max(ratio(&common, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

/// The full weighted blend. Inputs are normalized here, so callers pass
/// raw user text and stored names as-is.
pub fn weighted_ratio(query: &str, candidate: &str) -> f64 {
    let a = normalize(query);
    let b = normalize(candidate);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 100.0;
    }

    let base = ratio(&a, &b);
    let shorter = a.chars().count().min(b.chars().count());
    let longer = a.chars().count().max(b.chars().count());
    let length_ratio = longer as f64 / shorter as f64;

    if length_ratio < 1.5 {
        return base
            .max(0.95 * token_sort_ratio(&a, &b))
            .max(0.95 * token_set_ratio(&a, &b));
    }

    // Lengths diverge: the shorter string is likely a fragment of the
    // longer one, so the best-window variants carry more signal.
    let partial_scale = if length_ratio > 8.0 { 0.6 } else { 0.9 };
    base.max(partial_scale * partial_ratio(&a, &b))
        .max(0.95 * partial_scale * partial_ratio(&token_sorted(&a), &token_sorted(&b)))
        .max(0.95 * partial_scale * token_set_ratio(&a, &b))
}

/// Ranks `choices` against `query` and returns `(index, score)` pairs,
/// best first, truncated to `limit`.
///
/// Ties keep the original order of `choices` (the sort is stable), and the
/// source slice is never reordered or mutated.
pub fn extract(query: &str, choices: &[String], limit: usize) -> Vec<(usize, f64)> {
    let mut scored: Vec<(usize, f64)> = choices
        .iter()
        .enumerate()
        .map(|(index, choice)| (index, weighted_ratio(query, choice)))
        .collect();
    scored.sort_by(|left, right| right.1.partial_cmp(&left.1).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
