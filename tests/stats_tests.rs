#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use copter::simulation::error::SimulationError;
use copter::simulation::stats::{self, FitnessHistory};

#[test]
fn test_summary_statistics() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    assert_eq!(stats::mean(&values).unwrap(), 5.0);
    assert_eq!(stats::std_dev(&values).unwrap(), 2.0);
    assert_eq!(stats::max(&values).unwrap(), 9.0);
}

#[test]
fn test_degenerate_inputs_are_errors() {
    assert_eq!(stats::mean(&[]).unwrap_err(), SimulationError::EmptyInput);
    assert_eq!(stats::std_dev(&[]).unwrap_err(), SimulationError::EmptyInput);
    assert_eq!(stats::max(&[]).unwrap_err(), SimulationError::EmptyInput);
    assert_eq!(
        stats::min_max_normalize(&[]).unwrap_err(),
        SimulationError::EmptyInput
    );
    assert_eq!(
        stats::min_max_normalize(&[3.0]).unwrap_err(),
        SimulationError::SingleElement
    );
    assert_eq!(
        stats::normalize(1.0, 2.0, 2.0).unwrap_err(),
        SimulationError::ZeroWidthRange { min: 2.0, max: 2.0 }
    );
}

#[test]
fn test_normalization() {
    assert_eq!(stats::normalize(0.0, -5.0, 5.0).unwrap(), 0.5);
    assert_eq!(stats::normalize(600.0, 0.0, 800.0).unwrap(), 0.75);
    assert_eq!(
        stats::min_max_normalize(&[0.0, 5.0, 10.0]).unwrap(),
        vec![0.0, 0.5, 1.0]
    );
}

#[test]
fn test_history_moving_average() {
    let mut history = FitnessHistory::new(2);

    let first = history.record(0, &[1.0], 10).unwrap();
    let second = history.record(1, &[2.0, 4.0], 20).unwrap();
    let third = history.record(2, &[5.0, 5.0], 30).unwrap();

    assert_eq!(first.moving_average, 1.0);
    assert_eq!(second.moving_average, 2.0);
    assert_eq!(third.moving_average, 4.0);
    assert_eq!(second.best, 4.0);
    assert_eq!(second.average, 3.0);
    assert_eq!(third.ticks, 30);

    assert_eq!(history.reports.len(), 3);
    assert_eq!(history.latest().map(|r| r.generation), Some(2));
    assert_eq!(history.all_time_best(), Some(5.0));
}

#[test]
fn test_history_rejects_empty_generation() {
    let mut history = FitnessHistory::default();

    assert_eq!(
        history.record(0, &[], 0).unwrap_err(),
        SimulationError::EmptyInput
    );
    assert!(history.reports.is_empty());
    assert_eq!(history.all_time_best(), None);
}
