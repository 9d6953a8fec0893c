//! # Exit Code Tests
//!
//! Runs the built `dfa` binary and checks the 0 / 1 / 2 exit code contract
//! across subcommands.

use std::path::Path;
use std::process::{Command, Output};

const PARITY: &str = r#"{
    "states": ["even", "odd"],
    "alphabet": ["0", "1"],
    "initial_state": "even",
    "final_states": ["odd"],
    "transitions": [
        {"from": "even", "symbol": "0", "to": "even"},
        {"from": "even", "symbol": "1", "to": "odd"},
        {"from": "odd", "symbol": "0", "to": "even"},
        {"from": "odd", "symbol": "1", "to": "odd"}
    ]
}"#;

fn dfa(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dfa"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("DFA_USER")
        .env_remove("DFA_OUTPUT")
        .env_remove("DFA_INPUT_SEPARATOR")
        .env("DFA_STORE_DIR", dir.join("store"))
        .output()
        .expect("failed to run dfa binary")
}

fn code(output: &Output) -> i32 {
    output.status.code().expect("terminated by signal")
}

#[test]
fn validate_and_simulate_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("parity.json"), PARITY).unwrap();
    std::fs::write(
        dir.path().join("broken.yaml"),
        "states: [s0]\nalphabet: [a]\ninitial_state: s9\n",
    )
    .unwrap();

    assert_eq!(code(&dfa(dir.path(), &["validate", "parity.json"])), 0);
    assert_eq!(code(&dfa(dir.path(), &["validate", "broken.yaml"])), 1);

    let accepted = dfa(dir.path(), &["simulate", "parity.json", "1", "0", "1"]);
    assert_eq!(code(&accepted), 0);
    let stdout = String::from_utf8_lossy(&accepted.stdout);
    assert!(stdout.contains("final state: odd"));
    assert!(stdout.contains("result: ACCEPTED"));

    assert_eq!(
        code(&dfa(dir.path(), &["simulate", "parity.json", "--input", "1,0"])),
        1
    );
}

#[test]
fn strict_refusal_keeps_json_output_parseable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sparse.yaml"),
        "states: [s0, s1]\nalphabet: [a]\ninitial_state: s0\ntransitions:\n  - { from: s0, symbol: a, to: s1 }\n",
    )
    .unwrap();

    let refused = dfa(
        dir.path(),
        &["simulate", "sparse.yaml", "a", "--strict", "--json"],
    );
    assert_eq!(code(&refused), 1);
    let report: serde_json::Value = serde_json::from_slice(&refused.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["diagnostics"][0]["kind"], "missing_transition");

    let put = Command::new(env!("CARGO_BIN_EXE_dfa"))
        .args(["store", "put", "sparse", "sparse.yaml", "--strict", "--user", "alice"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("DFA_STORE_DIR", dir.path().join("store"))
        .env("DFA_OUTPUT", "json")
        .output()
        .unwrap();
    assert_eq!(code(&put), 1);
    let report: serde_json::Value = serde_json::from_slice(&put.stdout).unwrap();
    assert_eq!(report["source"], "sparse.yaml");
}

#[test]
fn operational_errors_exit_two() {
    let dir = tempfile::tempdir().unwrap();

    assert_eq!(
        code(&dfa(dir.path(), &["simulate", "absent.json", "1"])),
        2
    );
    assert_eq!(code(&dfa(dir.path(), &["store", "list"])), 2);

    let config = dir.path().join("dfa.yaml");
    std::fs::write(&config, "unknown_setting: 1\n").unwrap();
    let config = config.display().to_string();
    assert_eq!(
        code(&dfa(dir.path(), &["--config", &config, "validate", "x.json"])),
        2
    );
}

#[test]
fn stored_definition_round_trip_through_cli() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("parity.json"), PARITY).unwrap();

    assert_eq!(
        code(&dfa(
            dir.path(),
            &["store", "put", "parity", "parity.json", "--user", "alice"]
        )),
        0
    );

    let run = dfa(
        dir.path(),
        &["simulate", "store:parity", "--input", "0,1", "--user", "alice", "--json"],
    );
    assert_eq!(code(&run), 0);
    let result: serde_json::Value = serde_json::from_slice(&run.stdout).unwrap();
    assert_eq!(result["final_state"], "odd");
    assert_eq!(result["accepted"], true);

    assert_eq!(
        code(&dfa(dir.path(), &["store", "get", "parity", "--user", "bob"])),
        1
    );
}
