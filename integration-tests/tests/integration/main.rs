// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests
//!
//! These tests run `testpane-dup`, a copy of the `testpane` binary, against `floor-suite-dup`, a
//! copy of the `floor-suite` binary. Using copies means that running the tests with
//! `cargo run -p testpane` doesn't ask cargo to replace a binary that is currently running, which
//! is forbidden on Windows.
//!
//! Each test gets its own temporary root with a `.config/testpane.toml` pointing at the suite.

use indoc::indoc;
use pretty_assertions::assert_eq;
use testpane_metadata::TestpaneExitCode;

mod executor;
mod fixtures;

use fixtures::*;

#[test]
fn test_run_all_pass() {
    let root = floor_suite_root(&[]);

    let output = testpane_in(&root).args(["run", "0", "2", "4", "1.5"]).output();

    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            Tests complete!
            Tests passed:  4/4
            Tests failed:  0/4
            Tests skipped: 0/4

            test_my_floor[0]
              Result: PASSED

            test_my_floor[2]
              Result: PASSED

            test_my_floor[4]
              Result: PASSED

            test_my_floor[1.5]
              Result: PASSED
        "}
    );
}

#[test]
fn test_run_negative_fraction_fails() {
    let root = floor_suite_root(&[]);

    // floor-suite exits with status 1 here. The report is still read and shown.
    let output = testpane_in(&root)
        .args(["run", "-1.5"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            Tests complete!
            Tests passed:  0/1
            Tests failed:  1/1
            Tests skipped: 0/1

            test_my_floor[-1.5]
              Result: FAILED
              | AssertionError: my_floor failed for input -1.5
              | assert -1 == -2
        "}
    );
    assert!(
        output.stderr_as_str().contains("error: test run failed"),
        "{output}"
    );
}

#[test]
fn test_run_without_values_uses_defaults() {
    let root = floor_suite_root(&[]);

    let output = testpane_in(&root).arg("run").output();

    let stdout = output.stdout_as_str();
    assert!(stdout.contains("Tests passed:  4/4"), "{output}");
    let names: Vec<_> = stdout
        .lines()
        .filter(|line| line.starts_with("test_my_floor"))
        .collect();
    assert_eq!(
        names,
        [
            "test_my_floor[0]",
            "test_my_floor[2]",
            "test_my_floor[4]",
            "test_my_floor[1.5]"
        ]
    );
}

#[test]
fn test_run_invalid_value_is_a_failed_test() {
    let root = floor_suite_root(&[]);

    let output = testpane_in(&root)
        .args(["run", "3", "abc"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    let stdout = output.stdout_as_str();
    assert!(stdout.contains("Tests passed:  1/2"), "{output}");
    assert!(
        stdout.contains(indoc! {"
            test_my_floor[abc]
              Result: FAILED
              | ValueError: could not convert string to float: 'abc'
        "}),
        "{output}"
    );
}

#[test]
fn test_run_with_builtin_cases() {
    let root = floor_suite_root(&["--builtin"]);

    let output = testpane_in(&root)
        .args(["run", "1"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TEST_RUN_FAILED),
        "{output}"
    );
    let stdout = output.stdout_as_str();
    for line in [
        "Tests passed:  2/5",
        "Tests failed:  2/5",
        "Tests skipped: 1/5",
        "  | ValueError: cannot convert float NaN to integer",
    ] {
        assert!(stdout.contains(line), "missing {line:?}:\n{output}");
    }
}

#[test]
fn test_run_no_report_written() {
    let root = floor_suite_root(&["--emit", "nothing"]);

    let output = testpane_in(&root)
        .args(["run", "0", "2", "4", "1.5"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TESTS_FAILED_TO_RUN),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "Tests failed to run\n");
    assert!(
        output
            .stderr_as_str()
            .contains("test suite exited without writing a report"),
        "{output}"
    );
}

#[test]
fn test_run_empty_report() {
    let root = floor_suite_root(&["--emit", "empty"]);

    let output = testpane_in(&root)
        .args(["run", "0"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TESTS_FAILED_TO_RUN),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "Tests failed to run\n");
    assert!(
        output.stderr_as_str().contains("wrote an empty report"),
        "{output}"
    );
}

#[test]
fn test_run_malformed_report() {
    let root = floor_suite_root(&["--emit", "malformed"]);

    let output = testpane_in(&root)
        .args(["run", "0"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TESTS_FAILED_TO_RUN),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "Tests failed to run\n");
    assert!(
        output.stderr_as_str().contains("failed to parse report"),
        "{output}"
    );
}

#[test]
fn test_run_missing_suite_program() {
    let scratch = floor_suite_root(&[]);
    let missing = scratch.path().join("no-such-suite");
    let root = integration_tests::temp_root::TempRoot::new(&missing, &[]).unwrap();

    let output = testpane_in(&root)
        .args(["run", "0"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::TESTS_FAILED_TO_RUN),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "Tests failed to run\n");
    assert!(
        output.stderr_as_str().contains("failed to start"),
        "{output}"
    );
}

#[test]
fn test_invalid_config() {
    let root = integration_tests::temp_root::TempRoot::with_extra_config(
        floor_suite_bin(),
        &[],
        "default-values = [\"\", \" \"]",
    )
    .unwrap();

    let output = testpane_in(&root)
        .args(["run", "0"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::SETUP_ERROR),
        "{output}"
    );
    let stderr = output.stderr_as_str();
    assert!(stderr.contains("failed to parse testpane config"), "{output}");
    assert!(stderr.contains("suite.default-values"), "{output}");
    assert_eq!(output.stdout_as_str(), "");
}

#[test]
fn test_show_config() {
    let root = floor_suite_root(&["--builtin"]);

    let output = testpane_in(&root).arg("show-config").output();

    let stdout = output.stdout_as_str();
    assert!(
        stdout.starts_with(&format!("# resolved config for root `{}`\n", root.path())),
        "{output}"
    );
    for line in [
        "report-arg = \"--json={report}\"",
        "values-arg = \"--test-values\"",
        "input-slots = 5",
    ] {
        assert!(stdout.contains(line), "missing {line:?}:\n{output}");
    }
}

#[test]
fn test_explicit_config_file() {
    let suite_root = floor_suite_root(&[]);
    let empty_root = camino_tempfile::Builder::new()
        .prefix("testpane-empty-root-")
        .tempdir()
        .expect("temp dir created");

    // The empty root has no config of its own, so the suite can only come from the file.
    let output = testpane_in_dir(empty_root.path())
        .args(["--config-file", suite_root.config_path().as_str()])
        .args(["run", "0", "2"])
        .output();

    let stdout = output.stdout_as_str();
    assert!(stdout.contains("Tests passed:  2/2"), "{output}");
    assert!(stdout.contains("test_my_floor[2]"), "{output}");

    let output = testpane_in_dir(empty_root.path())
        .args(["--config-file", suite_root.config_path().as_str()])
        .arg("show-config")
        .output();
    assert!(
        output
            .stdout_as_str()
            .contains("values-arg = \"--test-values\""),
        "{output}"
    );
}

#[test]
fn test_missing_config_file() {
    let root = floor_suite_root(&[]);
    let missing = root.path().join("missing.toml");

    let output = testpane_in(&root)
        .args(["--config-file", missing.as_str()])
        .args(["run", "0"])
        .unchecked(true)
        .output();

    assert_eq!(
        output.exit_code(),
        Some(TestpaneExitCode::SETUP_ERROR),
        "{output}"
    );
    assert!(
        output
            .stderr_as_str()
            .contains(&format!("failed to parse testpane config at `{missing}`")),
        "{output}"
    );
    assert_eq!(output.stdout_as_str(), "");
}

#[test]
fn test_ui_requires_a_terminal() {
    let root = floor_suite_root(&[]);

    // Both the explicit subcommand and the default go through the same check.
    for args in [&["ui", "--value", "3"][..], &[][..]] {
        let output = testpane_in(&root).args(args.iter().copied()).unchecked(true).output();

        assert_eq!(
            output.exit_code(),
            Some(TestpaneExitCode::SETUP_ERROR),
            "{output}"
        );
        assert!(
            output
                .stderr_as_str()
                .contains("interactive mode requires stdin and stdout to be terminals"),
            "{output}"
        );
    }
}
