// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use indoc::indoc;

use super::*;
use crate::{
    geometry::Representation,
    io::{parse_document, DocumentType},
    tile::TileError,
    view::ViewStateMachine,
};

fn obs_from_json(json: &str) -> ObservationDoc {
    parse_document(json, DocumentType::Json).unwrap()
}

fn con_from_json(json: &str) -> ConfigurationDoc {
    parse_document(json, DocumentType::Json).unwrap()
}

/// A configuration with tiles "1" to "10" on an east-west line.
fn ten_tile_con() -> ConfigurationDoc {
    (1..=10)
        .map(|i| {
            (
                i.to_string(),
                TileConfig {
                    pos: [i as f64 * 10.0, 0.0],
                    altitude: Some(377.0),
                    receiver: Some(1 + (i - 1) / 8),
                    slot: Some((i - 1) % 8),
                    name: format!("Tile{i:03}"),
                },
            )
        })
        .collect()
}

#[test]
fn single_tile_with_dead_delays() {
    let con = con_from_json(
        r#"{"1": {"pos": [10, 20], "altitude": 0, "receiver": 1, "slot": 0, "name": "Tile01"}}"#,
    );
    let dead = vec![32; 16];
    let mut obs = obs_from_json(r#"{"rfstreams": {"0": {"azimuth": 45, "elevation": 60}}}"#);
    obs.alldelays
        .insert("1".to_string(), vec![dead.clone(), dead]);

    let array = ArrayModel::new(&obs, &con, &ModelParams::default()).unwrap();
    assert_eq!(array.num_tiles(), 1);
    let tile = array.tile(1).unwrap();
    assert_eq!(tile.name, "Tile01");
    assert_eq!(tile.receiver, Some(1));
    assert_eq!(tile.slot, Some(0));
    assert_abs_diff_eq!(tile.position, ENH::new(10.0, 20.0, 0.0));
    assert!(!tile.fault);
    assert!(tile.dipoles().iter().all(|d| !d.bad_x && !d.bad_y));
    assert_eq!(tile.steering_vectors().count(), 0);
    assert_abs_diff_eq!(array.pointing().unwrap(), AzEl::new_degrees(45.0, 60.0));
}

#[test]
fn only_bad_tiles_are_faulty() {
    let obs = obs_from_json(r#"{"bad_tiles": ["5"]}"#);
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    assert_eq!(array.num_tiles(), 10);
    for tile in array.tiles() {
        assert_eq!(tile.fault, tile.id == 5, "tile {}", tile.id);
    }
    assert_eq!(array.faulty_tiles().map(|t| t.id).collect::<Vec<_>>(), [5]);
}

#[test]
fn bad_tiles_may_be_numbers() {
    let obs = obs_from_json(r#"{"bad_tiles": [2, "07", "not a tile"]}"#);
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    let faulty: Vec<u32> = array.faulty_tiles().map(|t| t.id).collect();
    assert_eq!(faulty, [2, 7]);
}

#[test]
fn tiles_keep_configuration_order() {
    let con = con_from_json(indoc! {r#"{
        "30": {"pos": [0, 0], "name": "c"},
        "10": {"pos": [1, 0], "name": "a"},
        "20": {"pos": [2, 0], "name": "b"}
    }"#});
    let array = ArrayModel::new(&ObservationDoc::default(), &con, &ModelParams::default()).unwrap();
    let ids: Vec<u32> = array.tiles().map(|t| t.id).collect();
    assert_eq!(ids, [30, 10, 20]);
    assert!(array.pointing().is_none());
}

#[test]
fn bad_dipoles_are_one_indexed() {
    let obs = obs_from_json(indoc! {r#"{
        "rfstreams": {"0": {
            "azimuth": 0, "elevation": 90,
            "bad_dipoles": {"3": [[1, 16], [2]], "99": [[1], [1]]}
        }}
    }"#});
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    let tile = array.tile(3).unwrap();
    assert!(tile.dipoles()[0].bad_x);
    assert!(tile.dipoles()[15].bad_x);
    assert!(!tile.dipoles()[1].bad_x);
    assert!(tile.dipoles()[1].bad_y);
    assert_eq!(tile.bad_dipoles(Polarisation::X), [1, 16]);
    assert_eq!(tile.bad_dipoles(Polarisation::Y), [2]);

    // Tiles without an entry have no bad dipoles.
    let tile = array.tile(4).unwrap();
    assert!(tile.bad_dipoles(Polarisation::X).is_empty());
    assert!(tile.bad_dipoles(Polarisation::Y).is_empty());
    // The entry for a tile not in the configuration is ignored.
    assert!(array.tile(99).is_none());
    assert_eq!(tile.dipoles()[0].health(Polarisation::X), Some(false));
}

#[test]
fn dipole_health_is_unknown_without_the_stream() {
    let obs = obs_from_json(r#"{"rfstreams": {"1": {"bad_dipoles": {"3": [[1], []]}}}}"#);
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    let tile = array.tile(3).unwrap();
    assert!(tile.dipoles().iter().all(|d| d.health(Polarisation::X).is_none()));
    match &tile.primitives(Representation::DipoleMarker(0))[0] {
        crate::geometry::Primitive::Box { colour, .. } => {
            assert_eq!(*colour, crate::geometry::Colour::grey(0.5))
        }
        p => panic!("Expected a box, got {p:?}"),
    }
}

#[test]
fn repeated_observation_ids_keep_the_first_entry() {
    let obs = obs_from_json(indoc! {r#"{
        "rfstreams": {"0": {
            "azimuth": 0, "elevation": 90,
            "bad_dipoles": {"3": [[1], []], "003": [[2], []]}
        }},
        "alldelays": {
            "05": [[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], []],
            "5": [[2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2], []]
        }
    }"#});
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    assert_eq!(array.tile(3).unwrap().bad_dipoles(Polarisation::X), [1]);
    assert_eq!(array.tile(5).unwrap().delays.get(Polarisation::X), [1; 16]);
}

#[test]
fn out_of_range_dipole_numbers_are_ignored() {
    let obs = obs_from_json(r#"{"rfstreams": {"0": {"bad_dipoles": {"1": [[0, 17, -3, 4], []]}}}}"#);
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    assert_eq!(array.tile(1).unwrap().bad_dipoles(Polarisation::X), [4]);
}

#[test]
fn steering_vectors_only_with_delays_and_pointing() {
    let delays: Vec<i64> = (0..16).collect();
    let mut obs = obs_from_json(r#"{"rfstreams": {"0": {"azimuth": 0, "elevation": 90}}}"#);
    obs.alldelays
        .insert("1".to_string(), vec![delays.clone(), delays.clone()]);

    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    // Delay 0 is a sentinel, so 15 vectors, X only by default.
    let tile = array.tile(1).unwrap();
    let vectors: Vec<_> = tile.steering_vectors().collect();
    assert_eq!(vectors.len(), 15);
    assert!(vectors.iter().all(|(_, pol, _)| *pol == Polarisation::X));
    let (i, _, v) = vectors[4];
    assert_eq!(i, 5);
    assert_abs_diff_eq!(v, ENH::new(0.0, 0.0, 5.0 * 435.0 * 0.000299798), epsilon = 1e-9);
    // No delays for the other tiles.
    assert_eq!(array.tile(2).unwrap().steering_vectors().count(), 0);

    // Both polarisations can be asked for.
    let params = ModelParams {
        steering_polarisations: vec![Polarisation::X, Polarisation::Y],
        ..Default::default()
    };
    let array = ArrayModel::new(&obs, &ten_tile_con(), &params).unwrap();
    assert_eq!(array.tile(1).unwrap().steering_vectors().count(), 30);

    // Without a pointing, there are no vectors.
    obs.rfstreams.clear();
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    assert_eq!(array.tile(1).unwrap().steering_vectors().count(), 0);
}

#[test]
fn other_streams_can_be_used() {
    let obs = obs_from_json(indoc! {r#"{
        "rfstreams": {
            "0": {"azimuth": 0, "elevation": 90},
            "1": {"azimuth": 180, "elevation": 30, "bad_dipoles": {"2": [[], [5]]}}
        }
    }"#});
    let params = ModelParams {
        stream: "1".to_string(),
        ..Default::default()
    };
    let array = ArrayModel::new(&obs, &ten_tile_con(), &params).unwrap();
    assert_abs_diff_eq!(array.pointing().unwrap(), AzEl::new_degrees(180.0, 30.0));
    assert_eq!(array.tile(2).unwrap().bad_dipoles(Polarisation::Y), [5]);
}

#[test]
fn bad_delays_fail_the_whole_array() {
    let mut obs = ObservationDoc::default();
    obs.alldelays
        .insert("4".to_string(), vec![vec![1; 15], vec![1; 16]]);
    let result = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default());
    assert!(matches!(
        result,
        Err(ArrayModelError::Tile {
            id: 4,
            err: TileError::DataIntegrity(_),
            ..
        })
    ));

    let mut obs = ObservationDoc::default();
    obs.alldelays
        .insert("4".to_string(), vec![vec![1; 16], vec![40; 16]]);
    assert!(ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).is_err());

    let mut obs = ObservationDoc::default();
    obs.alldelays.insert("4".to_string(), vec![vec![1; 16]]);
    let result = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default());
    assert!(matches!(
        result,
        Err(ArrayModelError::MalformedDelays { id: 4, num: 1 })
    ));
}

#[test]
fn empty_delays_are_not_an_error() {
    let mut obs = ObservationDoc::default();
    obs.alldelays.insert("4".to_string(), vec![]);
    obs.alldelays.insert("5".to_string(), vec![vec![], vec![]]);
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    assert!(array.tile(4).unwrap().delays.is_empty());
    assert!(array.tile(5).unwrap().delays.is_empty());
    assert!(array.ideal_delays().is_none());
}

#[test]
fn delays_for_unconfigured_tiles_are_ignored() {
    let mut obs = ObservationDoc::default();
    // These would be invalid, but the tile doesn't exist.
    obs.alldelays.insert("42".to_string(), vec![vec![99; 3]]);
    assert!(ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).is_ok());
}

#[test]
fn invalid_configurations() {
    let con = con_from_json(r#"{"one": {"pos": [0, 0], "name": "a"}}"#);
    let result = ArrayModel::new(&ObservationDoc::default(), &con, &ModelParams::default());
    assert!(matches!(result, Err(ArrayModelError::InvalidTileId(k)) if k == "one"));

    let con = con_from_json(r#"{"1": {"pos": [0, 0], "name": "a"}, "01": {"pos": [1, 0], "name": "b"}}"#);
    let result = ArrayModel::new(&ObservationDoc::default(), &con, &ModelParams::default());
    assert!(matches!(result, Err(ArrayModelError::DuplicateTile { id: 1, .. })));

    let params = ModelParams {
        dipole_separation: 0.0,
        ..Default::default()
    };
    let result = ArrayModel::new(&ObservationDoc::default(), &ten_tile_con(), &params);
    assert!(matches!(result, Err(ArrayModelError::BadDipoleSeparation(_))));
}

#[test]
fn ideal_delays_across_tiles() {
    let mut a = vec![7_i64; 16];
    a[3] = 32;
    let mut b = vec![7_i64; 16];
    b[3] = 6;
    let mut obs = ObservationDoc::default();
    obs.alldelays.insert("1".to_string(), vec![a, vec![]]);
    obs.alldelays.insert("2".to_string(), vec![b, vec![]]);
    let array = ArrayModel::new(&obs, &ten_tile_con(), &ModelParams::default()).unwrap();
    let ideal = array.ideal_delays().unwrap();
    assert_eq!(ideal[0], 7);
    assert_eq!(ideal[3], 6);
}

#[test]
fn view_state_is_broadcast() {
    let mut array =
        ArrayModel::new(&ObservationDoc::default(), &ten_tile_con(), &ModelParams::default())
            .unwrap();
    assert!(array.tiles().all(|t| t.view_state() == ViewState::None));
    assert_eq!(array.ground().view_state(), ViewState::None);

    array.set_view_state(ViewState::Complex);
    assert!(array.tiles().all(|t| t.view_state() == ViewState::Complex));
    assert_eq!(array.ground().view_state(), ViewState::Complex);
    let tile = array.tile(1).unwrap();
    assert!(tile
        .visible_geometry(tile.view_state())
        .contains(&Representation::Beamformer));

    let params = ModelParams {
        initial_view: ViewState::Simple,
        ..Default::default()
    };
    let mut array = ArrayModel::new(&ObservationDoc::default(), &ten_tile_con(), &params).unwrap();
    // The initial view is left to the view state machine, so the two agree.
    let mut machine = ViewStateMachine::new(params.key_map.clone());
    assert!(array.tiles().all(|t| t.view_state() == machine.state()));
    assert_eq!(array.ground().view_state(), machine.state());
    machine.transition(params.initial_view, &mut array);
    assert!(array.tiles().all(|t| t.view_state() == ViewState::Simple));
    assert_eq!(array.ground().view_state(), ViewState::Simple);
}
