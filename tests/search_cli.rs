use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const PKG_RELEASE: &str = "tarantool-enterprise-sdk-nogc64-2.10.6-0-r549.linux.x86_64.tar.gz";
const PKG_DEBUG: &str = "tarantool-enterprise-sdk-debug-nogc64-2.10.6-0-r549.linux.x86_64.tar.gz";

fn write_catalog(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn eeri() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("eeri"));
    cmd.env_remove("EERI_CATALOG");
    cmd
}

#[test]
fn test_search_release_bundle() {
    let catalog = write_catalog(&format!(r#"{{"2.10": ["{}"]}}"#, PKG_RELEASE));

    eeri()
        .arg("search")
        .arg("--release")
        .arg("--all-platforms")
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2.10 nogc64-2.10.6-0-r549"));
}

#[test]
fn test_search_debug_filter_reports_no_match() {
    let catalog = write_catalog(&format!(r#"{{"2.10": ["{}"]}}"#, PKG_RELEASE));

    eeri()
        .arg("search")
        .arg("--debug")
        .arg("--all-platforms")
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no packages found for this OS or release version",
        ));
}

#[test]
fn test_search_debug_bundle() {
    let catalog = write_catalog(&format!(r#"{{"2.10": ["{}"]}}"#, PKG_DEBUG));

    eeri()
        .arg("search")
        .arg("--debug")
        .arg("--all-platforms")
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("debug-nogc64-2.10.6-0-r549"));
}

#[test]
fn test_search_garbage_catalog_reports_no_match() {
    let catalog = write_catalog(r#"{"random": "data"}"#);

    eeri()
        .arg("search")
        .arg("--all-platforms")
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no packages found for this OS or release version",
        ));
}

#[test]
fn test_search_reads_stdin_by_default() {
    eeri()
        .arg("search")
        .arg("--all-platforms")
        .write_stdin(format!(r#"{{"2.10": ["{}"]}}"#, PKG_RELEASE))
        .assert()
        .success()
        .stdout(predicate::str::contains("nogc64-2.10.6-0-r549"));
}

#[test]
fn test_search_json_output() {
    let catalog = write_catalog(&format!(r#"{{"2.10": ["{}"]}}"#, PKG_RELEASE));

    eeri()
        .arg("search")
        .arg("--all-platforms")
        .arg("--json")
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""release_series": "2.10""#))
        .stdout(predicate::str::contains(r#""package_name": "enterprise""#))
        .stdout(predicate::str::contains(PKG_RELEASE));
}

#[test]
fn test_search_orders_newest_first() {
    let catalog = write_catalog(
        r#"{
            "2.10": [
                "tarantool-enterprise-sdk-2.10.6-0-r549.linux.x86_64.tar.gz",
                "tarantool-enterprise-sdk-2.10.8-0-r598.linux.x86_64.tar.gz"
            ]
        }"#,
    );

    let output = eeri()
        .arg("search")
        .arg("--all-platforms")
        .arg("--catalog")
        .arg(catalog.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        ["2.10 2.10.8-0-r598", "2.10 2.10.6-0-r549"]
    );
}

#[test]
fn test_search_collapse_variants() {
    let catalog = write_catalog(
        r#"{
            "2.10": [
                "tarantool-enterprise-sdk-gc64-2.10.6-0-r549.linux.x86_64.tar.gz",
                "tarantool-enterprise-sdk-nogc64-2.10.6-0-r549.linux.x86_64.tar.gz"
            ]
        }"#,
    );

    let output = eeri()
        .arg("search")
        .arg("--all-platforms")
        .arg("--collapse-variants")
        .arg("--catalog")
        .arg(catalog.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_search_platform_filter_uses_host() {
    // Build a name targeting the host so the default platform filter keeps it.
    let host_bundle = format!(
        "tarantool-enterprise-sdk-2.10.6-0-r549.{}.{}.tar.gz",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    let catalog = write_catalog(&format!(
        r#"{{"2.10": ["{}", "tarantool-enterprise-sdk-2.10.6-0-r549.solaris.sparc64.tar.gz"]}}"#,
        host_bundle
    ));

    let output = eeri()
        .arg("search")
        .arg("--catalog")
        .arg(catalog.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_search_invalid_json_document_fails() {
    let catalog = write_catalog("not json at all");

    eeri()
        .arg("search")
        .arg("--catalog")
        .arg(catalog.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse catalog document"));
}
