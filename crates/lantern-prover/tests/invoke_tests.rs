#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use lantern_domain::{Assignment, FlagValue};
use lantern_prover::{run_prover, ProverConfig, ProverInvocation, ProverOracle, RawOutcome};
use lantern_search::{Oracle, Verdict};
use tempfile::TempDir;

/// Write an executable shell script standing in for the prover.
fn script_prover(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("fake-prover");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn config_for(program: PathBuf, timeout: Option<Duration>) -> ProverConfig {
    ProverConfig {
        executable: program,
        timeout,
        cores: 1,
        ram_gib: None,
        fixed_flags: vec![],
        passthrough: vec![],
    }
}

#[test]
fn test_completed_run_captures_both_streams() {
    let dir = TempDir::new().unwrap();
    let program = script_prover(&dir, "echo to-stdout\necho to-stderr >&2");
    let config = config_for(program, Some(Duration::from_secs(10)));
    let invocation =
        ProverInvocation::build(&config, std::path::Path::new("m.spthy"), None, &[]);

    match run_prover(&invocation, config.timeout).unwrap() {
        RawOutcome::Completed(output) => {
            assert!(output.contains("to-stdout"));
            assert!(output.contains("to-stderr"));
        }
        RawOutcome::TimedOut => panic!("expected completion"),
    }
}

#[test]
fn test_budget_expiry_reports_timeout() {
    let dir = TempDir::new().unwrap();
    let program = script_prover(&dir, "sleep 30");
    let config = config_for(program, Some(Duration::from_millis(200)));
    let invocation =
        ProverInvocation::build(&config, std::path::Path::new("m.spthy"), None, &[]);

    let started = std::time::Instant::now();
    match run_prover(&invocation, config.timeout).unwrap() {
        RawOutcome::TimedOut => {}
        RawOutcome::Completed(_) => panic!("expected timeout"),
    }
    // The sleeping group was killed, not waited out.
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_oracle_classifies_scripted_verdict() {
    let dir = TempDir::new().unwrap();
    let program = script_prover(
        &dir,
        r#"echo "  secrecy (all-traces): verified (9 steps)""#,
    );
    let config = config_for(program, Some(Duration::from_secs(10)));
    let mut oracle = ProverOracle::new(config, PathBuf::from("m.spthy"), "secrecy");

    let assignment = Assignment::new(vec![FlagValue::set("fast"), FlagValue::Unset]);
    let verdict = oracle.query(&assignment).unwrap();
    assert_eq!(verdict, Verdict::Verified { steps: 9 });
}

#[test]
fn test_oracle_maps_timeout_to_verdict() {
    let dir = TempDir::new().unwrap();
    let program = script_prover(&dir, "sleep 30");
    let config = config_for(program, Some(Duration::from_millis(200)));
    let mut oracle = ProverOracle::new(config, PathBuf::from("m.spthy"), "secrecy");

    let verdict = oracle.query(&Assignment::unset(1)).unwrap();
    assert_eq!(verdict, Verdict::Timeout);
}

#[test]
fn test_flags_reach_the_prover_command_line() {
    let dir = TempDir::new().unwrap();
    // The script proves whatever it is asked iff -D=magic is present.
    let program = script_prover(
        &dir,
        r#"case "$*" in
*-D=magic*) echo "  l (all-traces): verified (1 steps)" ;;
*) echo "  l (all-traces): falsified - found trace (2 steps)" ;;
esac"#,
    );
    let config = config_for(program, Some(Duration::from_secs(10)));
    let mut oracle = ProverOracle::new(config, PathBuf::from("m.spthy"), "l");

    let with_flag = Assignment::new(vec![FlagValue::set("magic")]);
    let without_flag = Assignment::unset(1);
    assert_eq!(
        oracle.query(&with_flag).unwrap(),
        Verdict::Verified { steps: 1 }
    );
    assert_eq!(
        oracle.query(&without_flag).unwrap(),
        Verdict::Falsified { steps: 2 }
    );
}
