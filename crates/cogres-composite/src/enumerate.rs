//! Generic subset enumeration over proxy indices.
//!
//! One enumeration covers every subset size from the configured minimum up
//! to the full proxy count; there is no fixed upper tier.

/// All `k`-combinations of `0..n` in lexicographic order.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        out.push(indices.clone());
        // Find the rightmost index that can still advance.
        let mut pos = k;
        while pos > 0 {
            pos -= 1;
            if indices[pos] != pos + n - k {
                break;
            }
            if pos == 0 {
                return out;
            }
        }
        indices[pos] += 1;
        for next in pos + 1..k {
            indices[next] = indices[next - 1] + 1;
        }
    }
}

/// Every subset of `0..n` with size in `min_size..=n`, ordered by size and
/// then lexicographically. This is the builder's enumeration order and
/// therefore the composite column order.
pub fn subsets(n: usize, min_size: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    for k in min_size..=n {
        out.extend(combinations(n, k));
    }
    out
}

/// Closed-form subset count for `n` proxies: `2^n - 1`, minus `n` when
/// size-1 subsets are excluded.
pub fn subset_count(n: usize, min_size: usize) -> u128 {
    let all = (1u128 << n) - 1;
    if min_size >= 2 { all - n as u128 } else { all }
}
