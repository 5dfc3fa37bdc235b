//! Family-name similarity (made by FontLab https://www.fontlab.com/)
//!
//! Family names are compared on a normalized key: lower-cased, with
//! everything that is not alphanumeric removed, so `"Noto Sans"`,
//! `"noto-sans"` and `"NotoSans"` all collapse to `"notosans"`.

use std::mem;

/// Lower-case `s` and drop every non-alphanumeric character.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Levenshtein distance between `a` and `b`, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in `[0, 1]` between an installed family name and a requested one.
///
/// Inputs that normalize to the same key score exactly 1.0; an empty key
/// on either side scores 0.0.
pub fn family_similarity(candidate: &str, query: &str) -> f32 {
    let candidate = normalize(candidate);
    let query = normalize(query);
    if candidate.is_empty() || query.is_empty() {
        return 0.0;
    }
    if candidate == query {
        return 1.0;
    }

    let max_len = candidate.chars().count().max(query.chars().count());
    let ratio = edit_distance(&candidate, &query) as f32 / max_len as f32;
    (1.0 - ratio.clamp(0.0, 1.0)).max(0.0)
}
