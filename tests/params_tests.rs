#![allow(missing_docs)]

use copter::simulation::error::SimulationError;
use copter::simulation::params::{CaveParams, GeneticParams, Params};

#[test]
fn test_default_params_are_valid() {
    let params = Params::default();

    assert!(params.validate().is_ok());
    assert_eq!(params.input_size(), 17);
    assert_eq!(params.layer_sizes(), vec![17, 8, 1]);
}

#[test]
fn test_layer_sizes_follow_genetic_params() {
    let params = Params {
        genetic: GeneticParams {
            look_ahead_points: 3,
            hidden_layers: vec![6, 4],
            outputs: 2,
            ..GeneticParams::default()
        },
        ..Params::default()
    };

    assert_eq!(params.layer_sizes(), vec![11, 6, 4, 2]);
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let cases = [
        (
            Params {
                cave: CaveParams {
                    min_radius: 400.0,
                    ..CaveParams::default()
                },
                ..Params::default()
            },
            "cave.min_radius",
        ),
        (
            Params {
                cave: CaveParams {
                    x_spacing: 0.0,
                    ..CaveParams::default()
                },
                ..Params::default()
            },
            "cave.x_spacing",
        ),
        (
            Params {
                cave: CaveParams {
                    radius_variation: -5.0,
                    ..CaveParams::default()
                },
                ..Params::default()
            },
            "cave.radius_variation",
        ),
        (
            Params {
                genetic: GeneticParams {
                    mutation_probability: 1.5,
                    ..GeneticParams::default()
                },
                ..Params::default()
            },
            "genetic.mutation_probability",
        ),
        (
            Params {
                genetic: GeneticParams {
                    outputs: 3,
                    ..GeneticParams::default()
                },
                ..Params::default()
            },
            "genetic.outputs",
        ),
        (
            Params {
                max_ticks: 0,
                ..Params::default()
            },
            "max_ticks",
        ),
    ];

    for (params, expected) in cases {
        match params.validate() {
            Err(SimulationError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected {expected} to be rejected, got {other:?}"),
        }
    }
}

#[test]
fn test_save_and_load_round_trip() {
    let params = Params {
        has_human_player: true,
        max_ticks: 1_234,
        ..Params::default()
    };
    let path = std::env::temp_dir().join(format!("copter_params_{}.json", std::process::id()));
    let path = path.to_string_lossy().into_owned();

    params.save_to_file(&path).unwrap();
    let loaded = Params::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, params);
}

#[test]
fn test_load_rejects_invalid_file() {
    let path = std::env::temp_dir().join(format!("copter_bad_params_{}.json", std::process::id()));
    let path = path.to_string_lossy().into_owned();
    std::fs::write(&path, "{ \"not\": \"params\" }").unwrap();

    assert!(Params::load_from_file(&path).is_err());
    std::fs::remove_file(&path).unwrap();
}
