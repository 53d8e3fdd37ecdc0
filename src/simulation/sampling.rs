//! Sampling without replacement.
//!
//! Pairs are drawn by sampling distinct indices into the enumeration of all
//! pairs and decoding them, so no pair is ever produced twice and the cost
//! does not grow with rejected draws.

use rand::Rng;
use rand::seq::index;

use super::error::SimulationError;

/// Draws `k` distinct indices from `0..n`.
pub fn sample_indices<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, SimulationError> {
    if k > n {
        return Err(SimulationError::NotEnoughElements {
            requested: k,
            available: n,
        });
    }
    Ok(index::sample(rng, n, k).into_vec())
}

/// Draws `k` distinct unordered pairs `(i, j)`, `i != j`, from `0..n`.
///
/// Each pair is returned as `(min, max)`. Fails if `k > n * (n - 1) / 2`.
pub fn k_unique_pairs<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<(usize, usize)>, SimulationError> {
    let available = n * n.saturating_sub(1) / 2;
    if k > available {
        return Err(SimulationError::NotEnoughPairs {
            requested: k,
            available,
        });
    }
    Ok(index::sample(rng, available, k)
        .into_iter()
        .map(|t| unordered_pair(n, t))
        .collect())
}

/// Draws `k` distinct ordered pairs `(a, b)`, `a != b`, from `0..n`.
///
/// `(a, b)` and `(b, a)` count as different pairs. Fails if
/// `k > n * (n - 1)`.
pub fn k_unique_ordered_pairs<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<(usize, usize)>, SimulationError> {
    let available = n * n.saturating_sub(1);
    if k > available {
        return Err(SimulationError::NotEnoughPairs {
            requested: k,
            available,
        });
    }
    Ok(index::sample(rng, available, k)
        .into_iter()
        .map(|t| ordered_pair(n, t))
        .collect())
}

/// Decodes the `t`-th pair of the row-wise enumeration
/// `(0,1), (0,2), .., (0,n-1), (1,2), ..`.
fn unordered_pair(n: usize, mut t: usize) -> (usize, usize) {
    let mut i = 0;
    loop {
        let row = n - 1 - i;
        if t < row {
            return (i, i + 1 + t);
        }
        t -= row;
        i += 1;
    }
}

fn ordered_pair(n: usize, t: usize) -> (usize, usize) {
    let a = t / (n - 1);
    let r = t % (n - 1);
    let b = if r >= a { r + 1 } else { r };
    (a, b)
}
