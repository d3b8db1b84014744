use std::process::{Command, Output};

fn run_headless(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drift_sim"))
        .args(args)
        .env("RUST_LOG", "warn,drift_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--ticks", "120", "--seed", "7"]);

    // Check that the simulation exited successfully
    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);

    // Verify simulation complete message is present
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that drive statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_headless(&["--ticks", "120", "--seed", "7"]);

    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);

    for stat in [
        "Ticks: 120",
        "Distance:",
        "Max speed:",
        "On road:",
        "Boundary bounces:",
        "Obstacle bounces:",
        "Nitro ticks:",
    ] {
        assert!(stderr.contains(stat), "Missing '{}' statistic", stat);
    }
}

/// Test that the perspective view and highway layout run with the map printed
#[test]
fn test_perspective_highway_run() {
    let output = run_headless(&[
        "--ticks",
        "90",
        "--seed",
        "3",
        "--layout",
        "highway",
        "--view",
        "perspective",
        "--ai-mode",
        "simple",
        "--map",
    ]);

    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="));
    assert!(stdout.contains("=== World Map ==="));
    assert!(stdout.contains('P'));
}

/// Test that bad options are rejected with an error
#[test]
fn test_invalid_difficulty_rejected() {
    let output = run_headless(&["--ticks", "10", "--difficulty", "2.5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("difficulty"), "stderr: {}", stderr);
}
