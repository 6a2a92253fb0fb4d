use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_prints_model_tree() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dhcpd-convert"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/campus.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("  ddns-update-style = none"))
        .stdout(predicate::str::contains("  PXE.mtftp-ip code=1 type=ip-address"))
        .stdout(predicate::str::contains("  phones lines=2"))
        .stdout(predicate::str::contains("  empty\n"))
        .stdout(predicate::str::contains(
            "    subnet 172.16.0.0 netmask 255.255.252.0 line=18",
        ))
        .stdout(predicate::str::contains(
            "      host printer fixed-address=172.16.0.20 hardware-ethernet=aa-bb-cc-dd-ee-0f",
        ));
}

#[test]
fn inspect_depth_zero_lists_sections_only() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dhcpd-convert"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/office.conf"))
        .arg("--depth")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("shared-networks"))
        .stdout(predicate::str::contains("Office").not());
}

#[test]
fn inspect_json_serializes_model() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dhcpd-convert"));
    let output = cmd
        .arg("inspect")
        .arg(fixture("fixtures/campus.conf"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["globals"]["option domain-name"], "\"campus.example\"");
    assert_eq!(json["option_definitions"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["shared_networks"][1], "empty");
    assert_eq!(json["subnets"][2]["options"]["routers"], "192.168.50.254");
    assert_eq!(json["subnets"][0]["hosts"][1]["fixed_address"], "");
}

#[test]
fn inspect_fails_on_unterminated_block() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dhcpd-convert"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/unterminated.conf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated shared-network block"));
}
