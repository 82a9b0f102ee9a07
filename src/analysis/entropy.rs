//! Shannon entropy over a line's character distribution.

use std::collections::HashMap;

/// Entropy in bits of the character frequency distribution.
///
/// Used as a proxy for information density: repetitive filler scores
/// low, dense structured log lines score higher. Empty input yields
/// 0.0 rather than dividing by zero.
pub fn shannon_entropy(line: &str) -> f64 {
    if line.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in line.chars() {
        *freq.entry(c).or_insert(0) += 1;
        len += 1;
    }

    let len = len as f64;
    freq.values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}
