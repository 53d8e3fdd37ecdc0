#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use copter::simulation::error::SimulationError;
use copter::simulation::params::GeneticParams;
use copter::simulation::population::{MUTATION_RANGE, Population};
use ndarray::{Array1, array};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn create_test_params(retained_fraction: f32, mutation_probability: f32) -> GeneticParams {
    GeneticParams {
        population_size: 4,
        retained_fraction,
        crossover_fraction: 0.5,
        mutation_probability,
        ..GeneticParams::default()
    }
}

fn constant_genomes(count: usize, len: usize) -> Vec<Array1<f32>> {
    (0..count)
        .map(|i| Array1::from_elem(len, i as f32))
        .collect()
}

#[test]
fn test_generation_step_keeps_the_best_and_refills() {
    let params = create_test_params(0.5, 0.0);
    let mut population = Population::new(constant_genomes(4, 3), &params).unwrap();
    population.set_fitnesses(&[10.0, 30.0, 5.0, 20.0]).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);

    population.generation_step(&mut rng).unwrap();

    let individuals = population.individuals();
    assert_eq!(individuals.len(), 4);
    assert_eq!(individuals[0].genome, array![1.0, 1.0, 1.0]);
    assert_eq!(individuals[0].fitness, 30.0);
    assert_eq!(individuals[1].genome, array![3.0, 3.0, 3.0]);
    assert_eq!(individuals[1].fitness, 20.0);

    // Two retained parents give exactly two ordered pairs, cut at gene 1.
    let mut children: Vec<Vec<f32>> = individuals[2..]
        .iter()
        .map(|child| child.genome.to_vec())
        .collect();
    children.sort_by(|a, b| a[0].total_cmp(&b[0]));
    assert_eq!(children, vec![vec![1.0, 3.0, 3.0], vec![3.0, 1.0, 1.0]]);
    assert!(individuals[2..].iter().all(|child| child.fitness == 0.0));
}

#[test]
fn test_selection_breaks_ties_by_current_order() {
    let params = create_test_params(0.5, 0.0);
    let mut population = Population::new(constant_genomes(4, 2), &params).unwrap();
    population.set_fitnesses(&[5.0, 5.0, 1.0, 5.0]).unwrap();

    population.selection();

    let kept: Vec<f32> = population
        .individuals()
        .iter()
        .map(|individual| individual.genome[0])
        .collect();
    assert_eq!(kept, vec![0.0, 1.0]);
}

#[test]
fn test_population_size_is_invariant() {
    let params = GeneticParams {
        population_size: 20,
        retained_fraction: 0.3,
        mutation_probability: 0.1,
        ..GeneticParams::default()
    };
    let mut rng = SmallRng::seed_from_u64(8);
    let mut population = Population::random(&[4, 3, 1], &params, &mut rng).unwrap();

    for _ in 0..10 {
        let fitnesses: Vec<f32> = (0..population.len())
            .map(|_| rng.random_range(0.0..100.0))
            .collect();
        population.set_fitnesses(&fitnesses).unwrap();
        population.generation_step(&mut rng).unwrap();
        assert_eq!(population.len(), 20);
        assert_eq!(population.genome_len(), 3 * 5 + 4);
    }
}

#[test]
fn test_too_few_parents_fails_without_changes() {
    let params = GeneticParams {
        population_size: 10,
        retained_fraction: 0.2,
        ..create_test_params(0.2, 0.0)
    };
    let mut population = Population::new(constant_genomes(10, 3), &params).unwrap();
    let before = population.individuals().to_vec();
    let mut rng = SmallRng::seed_from_u64(2);

    assert_eq!(
        population.generation_step(&mut rng).unwrap_err(),
        SimulationError::NotEnoughPairs {
            requested: 8,
            available: 2
        }
    );
    assert_eq!(population.individuals(), before.as_slice());
}

#[test]
fn test_mutation_perturbation_is_bounded() {
    let params = create_test_params(0.5, 1.0);
    let mut population = Population::new(constant_genomes(4, 50), &params).unwrap();
    let mut rng = SmallRng::seed_from_u64(4);

    population.mutation(&mut rng);

    for (i, individual) in population.individuals().iter().enumerate() {
        let original = i as f32;
        assert!(individual.genome.iter().all(|&gene| {
            (gene - original).abs() <= MUTATION_RANGE + 1e-6
        }));
        assert!(individual.genome.iter().any(|&gene| gene != original));
    }
}

#[test]
fn test_zero_mutation_probability_changes_nothing() {
    let params = create_test_params(0.5, 0.0);
    let mut population = Population::new(constant_genomes(4, 10), &params).unwrap();
    let before = population.individuals().to_vec();
    let mut rng = SmallRng::seed_from_u64(6);

    population.mutation(&mut rng);

    assert_eq!(population.individuals(), before.as_slice());
}

#[test]
fn test_operator_sizes() {
    let params = create_test_params(0.5, 0.0);
    let population = Population::new(constant_genomes(4, 7), &params).unwrap();

    assert_eq!(population.retained_count(), 2);
    assert_eq!(population.crossover_point(), 3);
}

#[test]
fn test_construction_errors() {
    let params = create_test_params(0.5, 0.0);

    assert_eq!(
        Population::new(Vec::new(), &params).unwrap_err(),
        SimulationError::EmptyInput
    );
    assert_eq!(
        Population::new(vec![Array1::zeros(3), Array1::zeros(4)], &params).unwrap_err(),
        SimulationError::DimensionMismatch {
            expected: 3,
            actual: 4
        }
    );
}

#[test]
fn test_fitness_count_must_match() {
    let params = create_test_params(0.5, 0.0);
    let mut population = Population::new(constant_genomes(4, 3), &params).unwrap();

    assert_eq!(
        population.set_fitnesses(&[1.0, 2.0]).unwrap_err(),
        SimulationError::DimensionMismatch {
            expected: 4,
            actual: 2
        }
    );
}

#[test]
fn test_decode_and_best() {
    let params = create_test_params(0.5, 0.0);
    let mut rng = SmallRng::seed_from_u64(12);
    let mut population = Population::random(&[3, 2, 1], &params, &mut rng).unwrap();
    population.set_fitnesses(&[1.0, 4.0, 2.0, 3.0]).unwrap();

    let networks = population.decode(&[3, 2, 1]).unwrap();
    assert_eq!(networks.len(), 4);
    for (network, individual) in networks.iter().zip(population.individuals()) {
        assert_eq!(network.layer_sizes(), vec![3, 2, 1]);
        assert_eq!(network.flatten(), individual.genome);
    }

    assert_eq!(population.best().map(|best| best.fitness), Some(4.0));
    assert!(population.decode(&[4, 2, 1]).is_err());
}

#[test]
fn test_rates_outside_unit_interval_are_rejected() {
    let cases = [
        (create_test_params(0.5, 1.5), "genetic.mutation_probability"),
        (create_test_params(0.5, f32::NAN), "genetic.mutation_probability"),
        (create_test_params(-0.1, 0.1), "genetic.retained_fraction"),
        (
            GeneticParams {
                crossover_fraction: 2.0,
                ..create_test_params(0.5, 0.1)
            },
            "genetic.crossover_fraction",
        ),
    ];

    for (params, expected) in cases {
        match Population::new(constant_genomes(4, 3), &params) {
            Err(SimulationError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected {expected} to be rejected, got {other:?}"),
        }
    }

    let edges = create_test_params(1.0, 1.0);
    assert!(Population::new(constant_genomes(4, 3), &edges).is_ok());
}
