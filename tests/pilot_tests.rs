#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use copter::simulation::brain::Network;
use copter::simulation::cave::Cave;
use copter::simulation::copter::Copter;
use copter::simulation::params::Params;
use copter::simulation::pilot::{
    self, Decide, HumanInput, NetworkPilot, Pilot, RandomPilot, Readout,
};
use ndarray::{Array1, array};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn test_readout_selection() {
    assert_eq!(Readout::for_outputs(1).unwrap(), Readout::Threshold);
    assert_eq!(Readout::for_outputs(2).unwrap(), Readout::Compare);
    assert!(Readout::for_outputs(3).is_err());
}

#[test]
fn test_readout_thresholds() {
    assert!(Readout::Threshold.apply(&array![0.6]));
    assert!(!Readout::Threshold.apply(&array![0.5]));
    assert!(Readout::Compare.apply(&array![0.4, 0.3]));
    assert!(!Readout::Compare.apply(&array![0.3, 0.3]));
}

#[test]
fn test_network_pilot_decides_from_outputs() {
    // sigmoid(x0 - 0.5): thrust once the first input exceeds 0.5.
    let network = Network::from_genome(&array![1.0, 0.0, -0.5], &[2, 1]).unwrap();
    let mut pilot = Pilot::Network(NetworkPilot::new(network).unwrap());

    assert!(pilot.decide(&array![0.9, 0.0]).unwrap());
    assert!(!pilot.decide(&array![0.1, 0.0]).unwrap());
    assert!(pilot.decide(&array![0.1]).is_err());
}

#[test]
fn test_network_pilot_needs_one_or_two_outputs() {
    let mut rng = SmallRng::seed_from_u64(0);
    let network = Network::new(&[4, 3], &mut rng).unwrap();
    assert!(NetworkPilot::new(network).is_err());

    let network = Network::new(&[4, 2], &mut rng).unwrap();
    assert_eq!(NetworkPilot::new(network).unwrap().readout(), Readout::Compare);
}

#[test]
fn test_human_input_passes_signal_through() {
    let mut pilot = Pilot::Human(HumanInput { engaged: true });
    assert!(pilot.is_human());
    assert!(!pilot.uses_sensors());
    assert!(pilot.decide(&Array1::zeros(0)).unwrap());

    let mut idle = HumanInput::default();
    assert!(!idle.decide(&Array1::zeros(0)).unwrap());
}

#[test]
fn test_random_pilot_is_seeded() {
    let mut a = RandomPilot::new(99);
    let mut b = RandomPilot::new(99);
    let empty = Array1::zeros(0);

    let mut thrusts = 0;
    for _ in 0..10_000 {
        let decision = a.decide(&empty).unwrap();
        assert_eq!(decision, b.decide(&empty).unwrap());
        thrusts += usize::from(decision);
    }

    let rate = thrusts as f64 / 10_000.0;
    assert!((rate - pilot::RANDOM_THRUST_PROBABILITY).abs() < 0.03, "rate {rate}");
}

#[test]
fn test_sensor_encoding() {
    let params = Params::default();
    let cave = Cave::from_params(&params.cave).unwrap();
    let copter = Copter::new(&params.copter, params.cave.height, params.cave.scroll_speed);
    let look_ahead = params.genetic.look_ahead_points;

    let inputs = pilot::encode_inputs(&cave, &copter, look_ahead).unwrap();
    assert_eq!(inputs.len(), pilot::sensor_size(look_ahead));
    assert_eq!(inputs.len(), params.input_size());

    // Tail at x = 437 lies in the segment starting at x = 400.
    assert!((inputs[0] - (400.0 - 500.0) / 1200.0).abs() < 1e-6);
    let first = cave.sample(5);
    assert_eq!(first.x, 400.0);
    assert!((inputs[1] - cave.ceiling_y(&first) / 800.0).abs() < 1e-6);
    assert!((inputs[2] - cave.floor_y(&first) / 800.0).abs() < 1e-6);

    let own = pilot::VALUES_PER_SAMPLE * look_ahead;
    assert_eq!(inputs[own], 300.0 / 800.0);
    assert_eq!(inputs[own + 1], 0.5);
}
