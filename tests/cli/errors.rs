//! Tests for help, version, completions, and argument errors.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("hoist") || out.contains("Usage"));
    assert!(out.contains("--keep-going"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "hoist");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["--completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_hoist") || out.contains("complete"));
    assert!(t.calls().is_empty());
}

#[test]
fn test_completions_are_exclusive() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["demo", "--completions", "zsh"])
        .output()
        .unwrap();
    assert_failure(&output);
}

#[test]
fn test_extra_positional_fails() {
    let t = Test::new();

    let output = t.cmd().args(["demo", "other"]).output().unwrap();
    assert_failure(&output);
    assert!(t.calls().is_empty());
}
