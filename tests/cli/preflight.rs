//! Tests for the CLI presence and login checks.

use crate::support::*;

#[test]
fn test_missing_cli_exits_one_without_running_anything() {
    let t = Test::new().without("heroku");

    let output = t.deploy("demo");

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "heroku CLI not found on PATH");
    assert_stdout_contains(&output, "devcenter.heroku.com");
    assert!(t.calls().is_empty(), "unexpected calls: {:?}", t.calls());
}

#[test]
fn test_missing_cli_does_not_prompt() {
    let t = Test::new().without("heroku");

    let output = t.deploy_prompted("demo\n");

    assert_exit_code(&output, 1);
    assert_stdout_excludes(&output, "App name");
}

#[test]
fn test_missing_git_exits_one() {
    let t = Test::new().without("git");

    let output = t.deploy("demo");

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "git not found on PATH");
    assert!(t.calls().is_empty());
}

#[test]
fn test_not_logged_in_exits_one_before_resolution() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_NOT_LOGGED_IN", "1")
        .write_stdin("demo\n")
        .output()
        .unwrap();

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "not logged in to heroku");
    assert_stdout_contains(&output, "run: heroku login");
    assert_stdout_excludes(&output, "App name");
    assert_eq!(t.calls(), vec!["heroku auth:whoami"]);
}

#[test]
fn test_logged_in_account_is_shown() {
    let t = Test::new();

    let output = t.deploy("demo");

    assert_success(&output);
    assert_stdout_contains(&output, "dev@example.com");
}

#[test]
fn test_cli_override_from_env() {
    let t = Test::new();
    std::fs::rename(t.bin.path().join("heroku"), t.bin.path().join("hk")).unwrap();

    let output = t.cmd().env("HOIST_CLI", "hk").arg("demo").output().unwrap();

    assert_success(&output);
    assert!(t.calls().contains(&"heroku auth:whoami".to_string()));
    assert_stdout_contains(&output, "hk logs --tail --app demo");
}
