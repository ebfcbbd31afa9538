// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests for cabling.

use std::io::Write;

use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, obs_and_con, read_json, test_file, tileview};

#[test]
fn cabling_is_listed() {
    let cmd = tileview()
        .arg("cabling")
        .args(obs_and_con())
        .arg(test_file("roster.yaml"))
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd);
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("2 pads in the cabling roster"), "{stdout}");
    assert!(stdout.contains("Rec02a (disabled)"), "{stdout}");
    assert!(stdout.contains("1 -> (110.0, 50.0) Default"), "{stdout}");
}

#[test]
fn emphasised_cables_are_written() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("cables.json");
    let cmd = tileview()
        .arg("cabling")
        .args(obs_and_con())
        .arg(test_file("roster.yaml"))
        .args(["--pad", "Rec02a", "--input", "2", "--colour", "0,0,1", "--fixed"])
        .arg("--output")
        .arg(&output)
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd);

    let doc = read_json(&output);
    let pad = &doc["Rec02a"];
    assert_eq!(pad["enabled"], false);
    assert_eq!(
        pad["label_position"],
        serde_json::json!({"e": -8.0, "n": 62.0, "h": 10.0})
    );
    assert_eq!(
        pad["trunk"]["to"],
        serde_json::json!({"e": -20.0, "n": 70.0, "h": 0.0})
    );

    let fixed = &pad["inputs"]["2"][0];
    assert_eq!(fixed["emphasis"], "fixed");
    assert_eq!(fixed["width"], 3.0);
    assert_eq!(fixed["colour"], serde_json::json!({"r": 0.0, "g": 0.0, "b": 1.0}));
    assert_eq!(fixed["to"], serde_json::json!({"e": -40.0, "n": 90.0, "h": 0.0}));

    let untouched = &pad["inputs"]["1"][0];
    assert_eq!(untouched["emphasis"], "default");
    assert_eq!(untouched["colour"], serde_json::json!({"r": 0.5, "g": 0.5, "b": 0.5}));

    assert_eq!(doc["Rec01"]["inputs"]["1"].as_array().unwrap().len(), 2);
}

#[test]
fn unknown_pads_are_errors() {
    let cmd = tileview()
        .arg("cabling")
        .args(obs_and_con())
        .arg(test_file("roster.yaml"))
        .args(["--pad", "Rec09"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("There is no pad named 'Rec09'"), "{stderr}");
}

#[test]
fn rosters_must_refer_to_known_tiles() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let roster = tmp_dir.path().join("roster.yaml");
    let mut f = std::fs::File::create(&roster).unwrap();
    write!(
        f,
        "{}",
        indoc! {r#"
            pads:
              Rec05:
                pos: [0, 0]
                inputs:
                  "1": [55]
        "#}
    )
    .unwrap();
    drop(f);

    let cmd = tileview()
        .arg("cabling")
        .args(obs_and_con())
        .arg(&roster)
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("tile 55"), "{stderr}");
}
