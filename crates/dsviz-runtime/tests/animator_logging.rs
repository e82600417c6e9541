#![forbid(unsafe_code)]

//! Structured log events emitted while animating.
//!
//! Run:
//!   cargo test -p dsviz-runtime --test animator_logging

use dsviz_core::{Operation, Structure};
use dsviz_runtime::{PageController, PolicyConfig};
use tracing_test::traced_test;

fn stack() -> PageController {
    PageController::new(Structure::Stack, &PolicyConfig::default())
}

#[traced_test]
#[test]
fn step_commit_and_finish_are_logged() {
    let mut page = stack();
    page.start(&Operation::push(77)).unwrap();
    page.run_to_idle();

    assert!(logs_contain("operation started"));
    assert!(logs_contain("step=2"));
    assert!(logs_contain("commit applied"));
    assert!(logs_contain("operation finished"));
}

#[traced_test]
#[test]
fn rejections_are_logged() {
    let mut page = PageController::with_values(Structure::Stack, [], &PolicyConfig::default());
    assert!(page.start(&Operation::pop()).is_err());
    assert!(logs_contain("start rejected"));
}

#[traced_test]
#[test]
fn cancellation_is_logged_without_commit() {
    let mut page = stack();
    page.start(&Operation::pop()).unwrap();
    page.cancel();
    assert!(logs_contain("operation cancelled"));
    assert!(!logs_contain("commit applied"));
}
