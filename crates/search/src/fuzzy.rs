//! Fuzzy text matching for relevance scoring
//!
//! Three tiers, cheapest first: literal substring, word-set overlap, and a
//! matching-blocks similarity ratio as the typo fallback. The ratio is the
//! classic Ratcliff/Obershelp measure — find the longest common block, then
//! recurse on the pieces to its left and right — implemented in-house since
//! it has to agree with the scores the storefront was tuned against.
//!
//! All functions expect normalized input (see [`crate::normalize`]).

use std::collections::HashMap;
use std::collections::HashSet;

/// Matching-blocks similarity ratio in [0.0, 1.0]
///
/// `2 * M / (len(a) + len(b))` where `M` is the total length of the common
/// matching blocks. Two empty strings are trivially identical (ratio 1.0).
pub fn match_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total length of common matching blocks (Ratcliff/Obershelp)
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..ai], &b[..bi]) + matching_chars(&a[ai + len..], &b[bi + len..])
}

/// Find the longest common contiguous block
///
/// Ties resolve to the earliest start in `a`, then in `b`, so the
/// decomposition (and therefore the ratio) is deterministic.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let (mut best_a, mut best_b, mut best_len) = (0, 0, 0);
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, &ch) in a.iter().enumerate() {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = b2j.get(&ch) {
            for &j in js {
                let run = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next.insert(j, run);
                if run > best_len {
                    best_a = i + 1 - run;
                    best_b = j + 1 - run;
                    best_len = run;
                }
            }
        }
        j2len = next;
    }

    (best_a, best_b, best_len)
}

/// Score how well a normalized query matches a normalized text, in [0.0, 1.0]
///
/// 1. Either side empty: 0.0 (an empty query is not a match).
/// 2. Query is a literal substring of the text: 1.0.
/// 3. Any query word appears in the text: `0.8 + shared_fraction * 0.2`,
///    so partial word hits land in [0.8, 1.0].
/// 4. Otherwise the matching-blocks ratio, for typos and partial tokens.
pub fn fuzzy_match(query: &str, text: &str) -> f64 {
    if query.is_empty() || text.is_empty() {
        return 0.0;
    }

    if text.contains(query) {
        return 1.0;
    }

    let query_words: HashSet<&str> = query.split_whitespace().collect();
    let text_words: HashSet<&str> = text.split_whitespace().collect();
    let shared = query_words.intersection(&text_words).count();
    if shared > 0 {
        return 0.8 + (shared as f64 / query_words.len() as f64) * 0.2;
    }

    match_ratio(query, text)
}
