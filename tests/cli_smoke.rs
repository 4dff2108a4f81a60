//! Behavioural tests for the `volname` CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const MISSING_KUBECTL: &str = "volname-test-missing-kubectl";

#[test]
fn cli_sanitizes_raw_names() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.args(["sanitize", "My_Volume.Name!!"])
        .assert()
        .success()
        .stdout("my-volume-name\n")
        .stderr("");
}

#[test]
fn cli_fails_when_name_sanitizes_to_nothing() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.args(["sanitize", "___"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("name is empty after sanitization"));
}

#[test]
fn cli_resolves_from_claim_parameters() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.env("VOLNAME_METADATA_SOURCE", "parameters")
        .args([
            "resolve",
            "--fallback-name",
            "pvc-abc123",
            "--param",
            "csi.storage.k8s.io/pvc/namespace=team-a",
            "--param",
            "csi.storage.k8s.io/pvc/name=data-01",
        ])
        .assert()
        .success()
        .stdout("ns-team-a-pvc-data-01\n");
}

#[test]
fn cli_reads_parameters_file() {
    let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let path = tmp.path().join("params.json");
    std::fs::write(
        &path,
        r#"{"csi.storage.k8s.io/pvc/namespace":"Team A","csi.storage.k8s.io/pvc/name":"Data_01","volumeNamePrefix":"x-"}"#,
    )
    .unwrap_or_else(|err| panic!("write params file: {err}"));

    let mut cmd = cargo_bin_cmd!("volname");
    cmd.env("VOLNAME_METADATA_SOURCE", "parameters")
        .arg("resolve")
        .arg("--fallback-name")
        .arg("pvc-abc123")
        .arg("--params-file")
        .arg(&path)
        .args(["--param", "volumeNameSuffix=-y"])
        .assert()
        .success()
        .stdout("x-ns-team-a-pvc-data-01-y\n");
}

#[test]
fn cli_returns_fallback_without_claim() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.env("VOLNAME_METADATA_SOURCE", "parameters")
        .args(["resolve", "--fallback-name", "pvc-abc123"])
        .assert()
        .success()
        .stdout("pvc-abc123\n");
}

#[test]
fn cli_falls_back_when_kubectl_is_unavailable() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.env("VOLNAME_KUBECTL_BIN", MISSING_KUBECTL)
        .args([
            "resolve",
            "--metadata-source",
            "annotations",
            "--fallback-name",
            "pvc-abc123",
        ])
        .assert()
        .success()
        .stdout("pvc-abc123\n");
}

#[test]
fn cli_rejects_unknown_metadata_source() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.args([
        "resolve",
        "--metadata-source",
        "telepathy",
        "--fallback-name",
        "pvc-abc123",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown metadata source"));
}

#[test]
fn cli_requires_a_subcommand() {
    let mut cmd = cargo_bin_cmd!("volname");
    cmd.assert().failure();
}
