#![forbid(unsafe_code)]

//! Loading policy files from disk.
//!
//! Run:
//!   cargo test -p dsviz-runtime --test policy_config_files

#![cfg(feature = "policy-config")]

use std::io::Write;

use dsviz_core::{Operation, Structure};
use dsviz_runtime::{PageController, PolicyConfig, PolicyConfigError};
use web_time::Duration;

fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn toml_file_drives_page_timing() {
    let file = write_temp(
        ".toml",
        r#"
[stack]
tick_interval_ms = 100
settle_delay_ms = 50
capacity = 6
"#,
    );
    let policy = PolicyConfig::from_path(file.path()).unwrap();
    let mut page = PageController::new(Structure::Stack, &policy);
    page.start(&Operation::push(6)).unwrap();
    let (_, elapsed) = page.run_to_idle();
    assert_eq!(elapsed, Duration::from_millis(3 * 100 + 50));
    assert_eq!(
        page.start(&Operation::push(7)),
        Err(dsviz_core::Rejection::CapacityExceeded { capacity: 6 })
    );
}

#[test]
fn json_file_by_extension() {
    let file = write_temp(".json", r#"{ "queue": { "seed": [4, 5] }, "history_depth": 2 }"#);
    let policy = PolicyConfig::from_path(file.path()).unwrap();
    let page = policy.page(Structure::Queue);
    assert_eq!(page.seed, vec![4, 5]);
    assert_eq!(page.history_depth, 2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PolicyConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PolicyConfigError::Io(_)));
}

#[test]
fn malformed_file_is_parse_error() {
    let file = write_temp(".toml", "[stack\ncapacity = ");
    assert!(matches!(
        PolicyConfig::from_toml_file(file.path()),
        Err(PolicyConfigError::Toml(_))
    ));
    let file = write_temp(".json", "{ \"stack\": ");
    assert!(matches!(
        PolicyConfig::from_json_file(file.path()),
        Err(PolicyConfigError::Json(_))
    ));
}

#[test]
fn invalid_values_fail_validation() {
    let file = write_temp(".toml", "history_depth = 0\n[array]\ntick_interval_ms = 0\n");
    match PolicyConfig::from_toml_file(file.path()) {
        Err(PolicyConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation failure, got {other:?}"),
    }
}
