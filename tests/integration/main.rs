// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod cabling;
mod scene;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

fn tileview() -> Command {
    Command::cargo_bin("tileview").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Get a test file, checking that it exists.
fn test_file(name: &str) -> String {
    let pb = PathBuf::from("test_files/tileview").join(name);
    assert!(
        pb.exists(),
        "Could not find {}, which is required for this test",
        pb.display()
    );
    pb.display().to_string()
}

fn obs_and_con() -> [String; 2] {
    [test_file("obs.json"), test_file("con.json")]
}

fn read_json(path: &Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn summary() {
    let cmd = tileview().arg("summary").args(obs_and_con()).ok();
    assert!(cmd.is_ok(), "summary failed on simple test data: {:?}", cmd);
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Tiles: 4"), "{stdout}");
    assert!(stdout.contains("Faulty tiles (1): 21"), "{stdout}");
    assert!(stdout.contains("Bad dipoles: 1 X, 3 Y"), "{stdout}");
    assert!(
        stdout.contains("Ideal delays: [3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, 0, 0, 0, 0]"),
        "{stdout}"
    );
    assert!(stdout.contains("Steering vectors: 35"), "{stdout}");
}

#[test]
fn summary_with_arg_file() {
    let cmd = tileview()
        .arg("summary")
        .args(obs_and_con())
        .args(["--params", &test_file("params.toml")])
        .ok();
    assert!(cmd.is_ok(), "summary failed with an argument file: {:?}", cmd);
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dipole separation: 1.2 m"), "{stdout}");
    assert!(stdout.contains("Steering vectors: 71"), "{stdout}");
}

#[test]
fn cli_args_override_the_arg_file() {
    let cmd = tileview()
        .arg("summary")
        .args(obs_and_con())
        .args(["--params", &test_file("params.toml")])
        .args(["--steering-pols", "Y"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd);
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dipole separation: 1.2 m"), "{stdout}");
    assert!(stdout.contains("Steering vectors: 36"), "{stdout}");
}

#[test]
fn dipoles() {
    let cmd = tileview().arg("dipoles").args(obs_and_con()).ok();
    assert!(cmd.is_ok(), "{:?}", cmd);
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Tiles with all dipoles good (2):"), "{stdout}");
    assert!(stdout.contains("Tile012: X [3], Y [3, 16]"), "{stdout}");
    assert!(stdout.contains("Tile022: Y [1]"), "{stdout}");
}

#[test]
fn dry_run() {
    let cmd = tileview()
        .arg("summary")
        .args(obs_and_con())
        .arg("--dry-run")
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd);
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!stdout.contains("Steering vectors"), "{stdout}");
}

#[test]
fn missing_documents_are_errors() {
    let cmd = tileview()
        .arg("summary")
        .args(["does_not_exist.json", &test_file("con.json")])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
}

#[test]
fn bad_model_args_are_errors() {
    let cmd = tileview()
        .arg("summary")
        .args(obs_and_con())
        .args(["--dipole-separation", "0"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("dipole separation must be positive"), "{stderr}");
}
