//! End-to-end integration tests for the vertical slice
//!
//! These exercise the complete flow: config document -> validation ->
//! orchestrator startup, without touching the real platform copy tool.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use mirrorwatch_core::{Config, RawRule, RetryPolicy, SyncMode, validate, validate_report};
use mirrorwatch_engine::{ExecutorSettings, Orchestrator};

fn dir(temp: &TempDir, name: &str) -> String {
    let path = temp.path().join(name);
    fs::create_dir_all(&path).unwrap();
    path.to_string_lossy().into_owned()
}

/// Scenario: one Mirror rule whose destination does not exist yet.
/// Validation accepts it, creates the destination, and start arms exactly
/// one monitor.
#[test]
fn mirror_rule_with_missing_destination_arms_one_monitor() {
    let temp = TempDir::new().unwrap();
    let source = dir(&temp, "a");
    let destination = temp.path().join("b");

    let candidates = vec![RawRule::new(
        "Mirror",
        &source,
        destination.to_string_lossy(),
    )];
    let rules = validate(&candidates);

    assert_eq!(rules.len(), 1);
    assert!(destination.is_dir(), "validation creates the destination");

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(rules, &ExecutorSettings::default());
    assert_eq!(orchestrator.armed(), 1);
    orchestrator.dispose();
}

/// Scenario: an undefined action leaves nothing to run, and start is a
/// no-op that arms zero monitors.
#[test]
fn undefined_action_leaves_nothing_to_run() {
    let temp = TempDir::new().unwrap();
    let candidates = vec![RawRule::new(
        "Bogus",
        dir(&temp, "a"),
        temp.path().join("b").to_string_lossy(),
    )];

    let rules = validate(&candidates);
    assert!(rules.is_empty());

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(rules, &ExecutorSettings::default());
    assert_eq!(orchestrator.armed(), 0);
}

/// Scenario: a Freeze rule whose destination is a filesystem root is
/// excluded; the same rule one level below the root is included.
#[cfg(unix)]
#[test]
fn freeze_root_destination_is_excluded() {
    let temp = TempDir::new().unwrap();
    let source = dir(&temp, "watched");

    let candidates = vec![
        RawRule::new("Freeze", &source, "/"),
        RawRule::new("Freeze", &source, dir(&temp, "reference")),
    ];
    let report = validate_report(&candidates);

    assert_eq!(report.accepted.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.accepted[0].destination, temp.path().join("reference"));
}

/// The full config path: save a document, load it back, validate, start.
#[test]
fn config_file_round_trip_through_validation_and_start() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("mirrorwatch.toml");

    let config = Config {
        retry: Some(RetryPolicy {
            retries: 3,
            interval_secs: 1,
        }),
        tool: None,
        rules: vec![
            RawRule::new("Copy", dir(&temp, "src"), dir(&temp, "dst")),
            RawRule::new("Weave", dir(&temp, "x"), dir(&temp, "y")),
        ],
    };
    config.save(&config_path).unwrap();

    let loaded = Config::load(&config_path).unwrap().unwrap();
    assert_eq!(loaded, config);

    let report = validate_report(&loaded.rules);
    assert_eq!(report.accepted.len(), 1);
    assert_eq!(report.accepted[0].mode, SyncMode::Copy);
    assert_eq!(report.rejected[0].rule.action, "Weave");

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(
        report.accepted,
        &ExecutorSettings {
            retry: loaded.retry,
            program: None,
        },
    );
    assert_eq!(orchestrator.armed(), 1);
    orchestrator.dispose();
    assert_eq!(orchestrator.armed(), 0);
}

/// Sample bootstrap produces a config that validates to one runnable rule.
#[test]
fn sample_config_validates_to_one_runnable_rule() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("mirrorwatch.toml");

    Config::write_sample(&config_path).unwrap();
    let config = Config::load(&config_path).unwrap().unwrap();

    let rules = validate(&config.rules);
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].mode, SyncMode::Mirror);
    assert!(rules[0].source.is_dir());
}

/// A rule whose source disappears between validation and start is skipped
/// at start time, leaving the others armed.
#[test]
fn source_vanishing_between_validation_and_start_is_skipped() {
    let temp = TempDir::new().unwrap();
    let doomed = dir(&temp, "doomed");
    let survivor = dir(&temp, "survivor");

    let rules = validate(&[
        RawRule::new("Mirror", &doomed, dir(&temp, "doomed-dst")),
        RawRule::new("Mirror", &survivor, dir(&temp, "survivor-dst")),
    ]);
    assert_eq!(rules.len(), 2);

    fs::remove_dir_all(&doomed).unwrap();

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(rules, &ExecutorSettings::default());
    assert_eq!(orchestrator.armed(), 1);
}
