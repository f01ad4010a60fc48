//! Live watch-to-tool tests
//!
//! These arm real monitors over real directories and substitute the
//! external copy tool with a small shell script that records each
//! invocation, so a filesystem change can be followed all the way to a
//! spawned process without depending on rsync or robocopy being installed.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use mirrorwatch_core::{RawRule, validate};
use mirrorwatch_engine::{ExecutorSettings, Orchestrator};

/// Shell script standing in for the copy tool: appends one line per run to
/// a marker file next to it.
fn fake_tool(temp: &TempDir, name: &str) -> (PathBuf, PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let marker = temp.path().join(format!("{name}.log"));
    let script = temp.path().join(format!("{name}.sh"));
    fs::write(
        &script,
        format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n", marker.display()),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    (script, marker)
}

fn invocations(marker: &Path) -> usize {
    fs::read_to_string(marker)
        .map(|content| content.lines().count())
        .unwrap_or(0)
}

fn wait_for_invocation(marker: &Path) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if invocations(marker) > 0 {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn a_write_under_the_source_reaches_the_tool() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("projects");
    fs::create_dir_all(&source).unwrap();
    let (script, marker) = fake_tool(&temp, "mirror");

    let rules = validate(&[RawRule::new(
        "Mirror",
        source.to_string_lossy(),
        temp.path().join("backup").to_string_lossy(),
    )]);

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(
        rules,
        &ExecutorSettings {
            retry: None,
            program: Some(script.to_string_lossy().into_owned()),
        },
    );
    assert_eq!(orchestrator.armed(), 1);

    fs::write(source.join("report.txt"), "quarterly numbers").unwrap();

    assert!(
        wait_for_invocation(&marker),
        "change never reached the external tool"
    );
    orchestrator.dispose();
}

#[test]
fn a_nested_write_triggers_through_the_recursive_watch() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("tree");
    let nested = source.join("deep").join("deeper");
    fs::create_dir_all(&nested).unwrap();
    let (script, marker) = fake_tool(&temp, "nested");

    let rules = validate(&[RawRule::new(
        "Copy",
        source.to_string_lossy(),
        temp.path().join("copies").to_string_lossy(),
    )]);

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(
        rules,
        &ExecutorSettings {
            retry: None,
            program: Some(script.to_string_lossy().into_owned()),
        },
    );

    fs::write(nested.join("leaf.txt"), "payload").unwrap();

    assert!(
        wait_for_invocation(&marker),
        "nested change never reached the external tool"
    );
    orchestrator.dispose();
}

#[test]
fn independent_rules_trigger_independently() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a");
    let b = temp.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    let (script, marker) = fake_tool(&temp, "rules");

    // Both rules share the override program; the recorded argument lists
    // tell the invocations apart by source path.
    let rules = validate(&[
        RawRule::new("Mirror", a.to_string_lossy(), temp.path().join("a-dst").to_string_lossy()),
        RawRule::new("Mirror", b.to_string_lossy(), temp.path().join("b-dst").to_string_lossy()),
    ]);

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(
        rules,
        &ExecutorSettings {
            retry: None,
            program: Some(script.to_string_lossy().into_owned()),
        },
    );
    assert_eq!(orchestrator.armed(), 2);

    fs::write(a.join("only-a.txt"), "a changed").unwrap();
    assert!(wait_for_invocation(&marker));

    let recorded = fs::read_to_string(&marker).unwrap();
    assert!(recorded.contains(&a.to_string_lossy().into_owned()));
    assert!(
        !recorded.contains(&b.to_string_lossy().into_owned()),
        "rule b never changed"
    );

    orchestrator.dispose();
}

#[test]
fn disposal_stops_further_triggering() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("stopped");
    fs::create_dir_all(&source).unwrap();
    let (script, marker) = fake_tool(&temp, "stopped");

    let rules = validate(&[RawRule::new(
        "Mirror",
        source.to_string_lossy(),
        temp.path().join("dst").to_string_lossy(),
    )]);

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(
        rules,
        &ExecutorSettings {
            retry: None,
            program: Some(script.to_string_lossy().into_owned()),
        },
    );
    orchestrator.dispose();

    fs::write(source.join("late.txt"), "after dispose").unwrap();
    std::thread::sleep(Duration::from_millis(500));
    assert_eq!(invocations(&marker), 0);
}
