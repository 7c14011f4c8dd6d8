//! Exact integer combinatorics for the completeness check.
//!
//! Floating-point factorial division loses precision past n ≈ 15, so the
//! expected column count is computed with the iterative multiplicative
//! binomial formula in u128.

/// `C(n, k)` computed exactly.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// `Σ_{k=min_size..=n} C(n, k)`: the number of distinct subsets the
/// builder must have produced.
pub fn expected_subset_count(n: usize, min_size: usize) -> u128 {
    (min_size..=n).map(|k| binomial(n, k)).sum()
}
