//! Tests for app resolution and look-up-or-create.

use crate::support::*;

#[test]
fn test_argument_skips_prompt() {
    let t = Test::new();

    let output = t.deploy("demo");

    assert_success(&output);
    assert_stdout_excludes(&output, "App name");
    assert_eq!(t.calls_to("heroku apps:info"), vec!["heroku apps:info --app demo"]);
}

#[test]
fn test_prompts_exactly_once_without_argument() {
    let t = Test::new();

    let output = t.deploy_prompted("demo\n");

    assert_success(&output);
    assert_eq!(stdout(&output).matches("App name").count(), 1);
    assert_eq!(t.calls_to("heroku apps:info"), vec!["heroku apps:info --app demo"]);
}

#[test]
fn test_empty_answer_is_rejected() {
    let t = Test::new();

    let output = t.deploy_prompted("\n");

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "app name cannot be empty");
    assert!(t.calls_to("heroku apps:info").is_empty());
}

#[test]
fn test_invalid_app_name_is_rejected() {
    let t = Test::new();

    let output = t.deploy_prompted("my bot\n");

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid app name");
}

#[test]
fn test_existing_app_is_reused() {
    let t = Test::new();

    let output = t.deploy("demo");

    assert_success(&output);
    assert_stdout_contains(&output, "using existing app demo");
    assert_eq!(
        t.calls_to("heroku git:remote"),
        vec!["heroku git:remote --app demo --remote heroku"]
    );
    assert!(t.calls_to("heroku apps:create").is_empty());
}

#[test]
fn test_missing_app_is_created() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_APP_MISSING", "1")
        .arg("demo")
        .output()
        .unwrap();

    assert_success(&output);
    assert_stdout_contains(&output, "created app demo");
    assert_eq!(
        t.calls_to("heroku apps:create"),
        vec!["heroku apps:create demo --remote heroku"]
    );
    assert!(t.calls_to("heroku git:remote").is_empty());
}

#[test]
fn test_lookup_error_does_not_create() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_LOOKUP_ERROR", "1")
        .args(["demo", "--keep-going"])
        .output()
        .unwrap();

    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "lookup of demo failed (exit 2)");
    assert_stdout_contains(&output, "not creating");
    assert!(t.calls_to("heroku apps:create").is_empty());
    assert!(t.calls_to("heroku config:set").is_empty());
    assert!(t.calls_to("git push").is_empty());
}

#[test]
fn test_failed_creation_halts() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_APP_MISSING", "1")
        .env("FAKE_FAIL", "apps:create")
        .arg("demo")
        .output()
        .unwrap();

    assert_exit_code(&output, 3);
    assert_stderr_contains(&output, "target failed (exit 3)");
    assert_stdout_excludes(&output, "not creating");
    assert_eq!(
        t.calls_to("heroku apps:create"),
        vec!["heroku apps:create demo --remote heroku"]
    );
    assert!(t.calls_to("git add").is_empty());
}
