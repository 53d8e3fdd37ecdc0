#![allow(missing_docs)]

use copter::simulation::error::SimulationError;
use copter::simulation::sampling::{k_unique_ordered_pairs, k_unique_pairs, sample_indices};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;

#[test]
fn test_unique_pairs_are_distinct_for_every_valid_k() {
    let n = 6;
    let mut rng = SmallRng::seed_from_u64(21);

    for k in 0..=n * (n - 1) / 2 {
        let pairs = k_unique_pairs(n, k, &mut rng).unwrap();
        assert_eq!(pairs.len(), k);

        let distinct: HashSet<_> = pairs.iter().copied().collect();
        assert_eq!(distinct.len(), k);
        assert!(pairs.iter().all(|&(i, j)| i < j && j < n));
    }
}

#[test]
fn test_unique_pairs_beyond_bound_fail() {
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(
        k_unique_pairs(6, 16, &mut rng).unwrap_err(),
        SimulationError::NotEnoughPairs {
            requested: 16,
            available: 15
        }
    );
    assert!(k_unique_pairs(1, 1, &mut rng).is_err());
    assert!(k_unique_pairs(0, 0, &mut rng).unwrap().is_empty());
}

#[test]
fn test_all_pairs_are_reachable() {
    let mut rng = SmallRng::seed_from_u64(5);
    let pairs: HashSet<_> = k_unique_pairs(5, 10, &mut rng).unwrap().into_iter().collect();

    for i in 0..5 {
        for j in i + 1..5 {
            assert!(pairs.contains(&(i, j)));
        }
    }
}

#[test]
fn test_ordered_pairs_cover_both_directions() {
    let mut rng = SmallRng::seed_from_u64(13);
    let pairs = k_unique_ordered_pairs(4, 12, &mut rng).unwrap();

    let distinct: HashSet<_> = pairs.iter().copied().collect();
    assert_eq!(distinct.len(), 12);
    assert!(pairs.iter().all(|&(a, b)| a != b && a < 4 && b < 4));
    assert!(distinct.contains(&(1, 3)) && distinct.contains(&(3, 1)));

    assert_eq!(
        k_unique_ordered_pairs(4, 13, &mut rng).unwrap_err(),
        SimulationError::NotEnoughPairs {
            requested: 13,
            available: 12
        }
    );
}

#[test]
fn test_sample_indices() {
    let mut rng = SmallRng::seed_from_u64(17);
    let indices = sample_indices(10, 10, &mut rng).unwrap();

    let distinct: HashSet<_> = indices.iter().copied().collect();
    assert_eq!(distinct.len(), 10);
    assert!(indices.iter().all(|&i| i < 10));

    assert_eq!(
        sample_indices(3, 4, &mut rng).unwrap_err(),
        SimulationError::NotEnoughElements {
            requested: 4,
            available: 3
        }
    );
}
