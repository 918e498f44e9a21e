//! Tests for publishing, scaling, and the post-deploy run.

use crate::support::*;

#[test]
fn test_full_deploy_order() {
    let t = Test::new();
    t.write_env("A=1\n");

    let output = t.deploy("demo");

    assert_success(&output);
    assert_eq!(
        t.calls(),
        vec![
            "heroku auth:whoami",
            "heroku apps:info --app demo",
            "heroku git:remote --app demo --remote heroku",
            "heroku config:set A=1 --app demo",
            "git add .",
            "git status --porcelain",
            "git commit -m Deploy to Heroku",
            "git push heroku HEAD:main",
            "heroku ps:scale worker=1 --app demo",
            "heroku run --app demo playwright install chromium",
        ]
    );
    assert_stdout_contains(&output, "heroku logs --tail --app demo");
}

#[test]
fn test_clean_tree_skips_commit() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_GIT_CLEAN", "1")
        .arg("demo")
        .output()
        .unwrap();

    assert_success(&output);
    assert!(t.calls_to("git commit").is_empty());
    assert_eq!(t.calls_to("git push"), vec!["git push heroku HEAD:main"]);
    assert_stdout_contains(&output, "nothing to commit");
}

#[test]
fn test_push_failure_halts_with_its_status() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_GIT_FAIL", "push")
        .arg("demo")
        .output()
        .unwrap();

    assert_exit_code(&output, 128);
    assert_stderr_contains(&output, "publish failed (exit 128)");
    assert_stderr_contains(&output, "fake git failure");
    assert!(t.calls_to("heroku ps:scale").is_empty());
    assert!(t.calls_to("heroku run").is_empty());
    assert_stdout_excludes(&output, "heroku logs --tail");
}

#[test]
fn test_keep_going_runs_remaining_stages() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_GIT_FAIL", "push")
        .args(["demo", "--keep-going"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(t.calls_to("heroku ps:scale").len(), 1);
    assert_eq!(t.calls_to("heroku run").len(), 1);
    assert_stdout_contains(&output, "1 stage(s) failed during deploy of demo");
}

#[test]
fn test_keep_going_exit_status_is_last_command() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_FAIL", "run")
        .args(["demo", "--keep-going"])
        .output()
        .unwrap();

    assert_exit_code(&output, 3);
    assert_stdout_contains(&output, "heroku logs --tail --app demo");
}

#[test]
fn test_scale_is_absolute_across_runs() {
    let t = Test::new();

    assert_success(&t.deploy("demo"));
    assert_success(&t.deploy("demo"));

    assert_eq!(
        t.calls_to("heroku ps:scale"),
        vec![
            "heroku ps:scale worker=1 --app demo",
            "heroku ps:scale worker=1 --app demo",
        ]
    );
}

#[test]
fn test_publish_flags() {
    let t = Test::new();

    let output = t
        .cmd()
        .args([
            "demo",
            "--remote",
            "production",
            "--branch",
            "master",
            "-m",
            "Ship it",
        ])
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(t.calls_to("git commit"), vec!["git commit -m Ship it"]);
    assert_eq!(t.calls_to("git push"), vec!["git push production HEAD:master"]);
    assert_eq!(
        t.calls_to("heroku git:remote"),
        vec!["heroku git:remote --app demo --remote production"]
    );
}

#[test]
fn test_dry_run_executes_nothing() {
    let t = Test::new();
    t.write_env(SAMPLE_ENV);

    let output = t.cmd().args(["demo", "--dry-run"]).output().unwrap();

    assert_success(&output);
    assert!(t.calls().is_empty(), "unexpected calls: {:?}", t.calls());
    assert_stdout_contains(&output, "$ heroku auth:whoami");
    assert_stdout_contains(&output, "$ heroku config:set B=*** --app demo");
    assert_stdout_contains(&output, "$ git push heroku HEAD:main");
}

#[test]
fn test_keep_going_still_pushes_after_failed_add() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("FAKE_GIT_FAIL", "add")
        .args(["demo", "--keep-going"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_eq!(t.calls_to("git commit"), vec!["git commit -m Deploy to Heroku"]);
    assert_eq!(t.calls_to("git push"), vec!["git push heroku HEAD:main"]);
    assert_stdout_contains(&output, "could not run git add");
}

#[test]
fn test_keep_going_runs_every_post_deploy_command() {
    let t = Test::new();
    t.write_config("[deploy]\npost_deploy = [\"first\", \"second\"]\n");

    let output = t
        .cmd()
        .env("FAKE_FAIL", "run")
        .args(["demo", "--keep-going"])
        .output()
        .unwrap();

    assert_exit_code(&output, 3);
    assert_eq!(
        t.calls_to("heroku run"),
        vec!["heroku run --app demo first", "heroku run --app demo second"]
    );
    assert_stdout_contains(&output, "could not run first, second");
}
