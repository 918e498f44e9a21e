//! Test fixtures and constants.

/// Fake deployment CLI.
///
/// Behaviour switches (set on the command):
/// - `FAKE_NOT_LOGGED_IN`: `auth:whoami` fails
/// - `FAKE_APP_MISSING`: `apps:info` reports the app does not exist
/// - `FAKE_LOOKUP_ERROR`: `apps:info` fails with a network error
/// - `FAKE_FAIL=<subcommand>`: that subcommand exits 3
pub const FAKE_HEROKU: &str = r#"#!/bin/sh
printf '%s\n' "heroku $*" >> "$HOIST_TEST_LOG"
case "$1" in
  auth:whoami)
    if [ -n "$FAKE_NOT_LOGGED_IN" ]; then
      printf 'Error: Invalid credentials provided.\n' >&2
      exit 100
    fi
    printf 'dev@example.com\n'
    ;;
  apps:info)
    if [ -n "$FAKE_APP_MISSING" ]; then
      printf "Couldn't find that app.\n" >&2
      exit 1
    fi
    if [ -n "$FAKE_LOOKUP_ERROR" ]; then
      printf 'getaddrinfo ENOTFOUND api.heroku.com\n' >&2
      exit 2
    fi
    ;;
esac
if [ "$1" = "$FAKE_FAIL" ]; then
  printf 'fake failure\n' >&2
  exit 3
fi
exit 0
"#;

/// Fake git.
///
/// - `FAKE_GIT_CLEAN`: `status --porcelain` reports a clean tree
/// - `FAKE_GIT_FAIL=<subcommand>`: that subcommand exits 128
pub const FAKE_GIT: &str = r#"#!/bin/sh
printf '%s\n' "git $*" >> "$HOIST_TEST_LOG"
if [ "$1" = "status" ] && [ -z "$FAKE_GIT_CLEAN" ]; then
  printf ' M main.py\n'
fi
if [ "$1" = "$FAKE_GIT_FAIL" ]; then
  printf 'fake git failure\n' >&2
  exit 128
fi
exit 0
"#;

/// Secrets file with every line shape the parser handles.
pub const SAMPLE_ENV: &str = "A=1\n# comment\n\nB=\"two words\"\nC='three'\n";

/// Secrets file holding everything the bot needs.
pub const COMPLETE_ENV: &str = r#"
# Telegram
TELEGRAM_BOT_TOKEN=123456:ABC-DEF
OPENAI_API_KEY="sk-test-12345"
NOTION_API_KEY='secret_abc'
NOTION_DATABASE_ID=1cab9534753980cc8de6f88c0a2c19f4
"#;
