use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_fixtures(dir: &Path) {
    fs::write(
        dir.join("areas.csv"),
        "Local authority code,Name (eng),Name (cym)\n\
         W06000001,Isle of Anglesey,Ynys Môn\n\
         W06000002,Gwynedd,Gwynedd\n",
    )
    .unwrap();
    fs::write(
        dir.join("complete-popu1009-pop.csv"),
        "AuthorityCode,1991,1992\nW06000001,69123,69012\nW06000002,115000,115500\n",
    )
    .unwrap();
    // Broken on purpose: one bad value.
    fs::write(
        dir.join("complete-popu1009-area.csv"),
        "AuthorityCode,1991,1992\nW06000001,711,oops\n",
    )
    .unwrap();
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("bethyw").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bethyw"));
}

#[test]
fn prints_table_for_selected_area() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let mut cmd = Command::cargo_bin("bethyw").unwrap();
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["-d", "complete-pop", "-a", "W06000001"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Isle of Anglesey / Ynys Môn (W06000001)"))
        .stdout(predicate::str::contains("Population (pop)"))
        .stdout(predicate::str::contains("Gwynedd").not());
}

#[test]
fn failed_dataset_is_reported_and_others_survive() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let mut cmd = Command::cargo_bin("bethyw").unwrap();
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["-d", "complete-area,complete-pop", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["W06000001"]["measures"]["pop"]["1991"], 69123.0);
    assert!(v["W06000001"]["measures"].get("area").is_none());
}

#[test]
fn missing_dataset_file_is_reported_on_stderr() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let mut cmd = Command::cargo_bin("bethyw").unwrap();
    cmd.arg("--dir").arg(dir.path()).args(["-d", "popden"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("popu1009.json"));
}

#[test]
fn invalid_years_argument_fails() {
    let mut cmd = Command::cargo_bin("bethyw").unwrap();
    cmd.args(["-y", "19x1"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("years"));
}

#[test]
fn out_flag_writes_csv() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let out = dir.path().join("merged.csv");
    let mut cmd = Command::cargo_bin("bethyw").unwrap();
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["-d", "complete-pop", "--out"])
        .arg(&out);
    cmd.assert().success();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("area_code,name_eng,name_cym,measure,label,year,value"));
    assert_eq!(text.lines().count(), 1 + 4);
}
