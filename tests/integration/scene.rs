// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for writing scenes.

use tempfile::TempDir;

use crate::{get_cmd_output, obs_and_con, read_json, tileview};

fn count_items(doc: &serde_json::Value, entity: &serde_json::Value) -> usize {
    doc["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| &item["entity"] == entity)
        .count()
}

#[test]
fn simple_and_complex_scenes() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let simple = tmp_dir.path().join("simple.json");
    let complex = tmp_dir.path().join("complex.json");

    for (view, output) in [("simple", &simple), ("complex", &complex)] {
        let cmd = tileview()
            .arg("scene")
            .args(obs_and_con())
            .args(["--view", view])
            .arg("--output")
            .arg(output)
            .ok();
        assert!(cmd.is_ok(), "scene failed: {:?}", get_cmd_output(cmd));
        assert!(output.exists());
    }

    let doc = read_json(&simple);
    assert_eq!(doc["view"], "simple");
    // The ground, then a plate and 16 markers per tile.
    assert_eq!(doc["items"].as_array().unwrap().len(), 3 + 4 * 17);
    assert_eq!(count_items(&doc, &serde_json::json!("Ground")), 3);
    assert_eq!(count_items(&doc, &serde_json::json!({"Tile": 22})), 17);

    let doc = read_json(&complex);
    assert_eq!(doc["view"], "complex");
    // Plates, beamformers and detailed dipoles, plus the steering vectors of
    // the tiles with delays.
    assert_eq!(doc["items"].as_array().unwrap().len(), 3 + 4 * 18 + 35);
    assert_eq!(count_items(&doc, &serde_json::json!({"Tile": 21})), 18);
    assert_eq!(count_items(&doc, &serde_json::json!({"Tile": 22})), 18 + 11);
}

#[test]
fn faulty_tiles_have_red_plates() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("scene.json");
    let cmd = tileview()
        .arg("scene")
        .args(obs_and_con())
        .args(["--view", "simple", "--output"])
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    let doc = read_json(&output);
    let plate_colour = |tile: u32| {
        doc["items"]
            .as_array()
            .unwrap()
            .iter()
            .find(|item| {
                item["entity"] == serde_json::json!({ "Tile": tile })
                    && item["representation"] == "GroundPlate"
            })
            .map(|item| item["primitives"][0]["colour"].clone())
            .unwrap()
    };
    assert_eq!(plate_colour(21), serde_json::json!({"r": 1.0, "g": 0.0, "b": 0.0}));
    assert_eq!(plate_colour(11), serde_json::json!({"r": 0.5, "g": 0.5, "b": 0.5}));
}

#[test]
fn replayed_keys_change_the_view() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("scene.yaml");
    let cmd = tileview()
        .arg("scene")
        .args(obs_and_con())
        .args(["--view", "complex", "--keys", "qs", "--output"])
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd);
    let (stdout, _) = get_cmd_output(cmd);
    // 'q' isn't bound; it's reported, and the session carries on.
    assert!(stdout.contains("Key 'q' isn't bound to a view"), "{stdout}");

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("view: simple"), "{contents}");
}

#[test]
fn scenes_go_to_stdout_without_an_output() {
    let cmd = tileview()
        .arg("scene")
        .args(obs_and_con())
        .args(["--view", "none"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd);
    let (stdout, stderr) = get_cmd_output(cmd);
    // stdout has nothing but the scene; logging goes to stderr.
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["view"], "none");
    assert_eq!(doc["items"], serde_json::json!([]));
    assert!(stderr.contains("tileview scene"), "{stderr}");
}

#[test]
fn unknown_views_are_errors() {
    let cmd = tileview()
        .arg("scene")
        .args(obs_and_con())
        .args(["--view", "fancy"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("valid views are: none, simple, complex"), "{stderr}");
}
