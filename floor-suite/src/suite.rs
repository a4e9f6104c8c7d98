// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FloorError, my_floor};
use testpane_metadata::{TestOutcome, TestReport, TestResult};
use thiserror::Error;

/// Inputs that [`my_floor`] handles correctly.
const PASS_INPUTS: &[f64] = &[0.5, 1.0, 0.0, 1.1, 2.3, 100000.0, 1e99];

/// Inputs including negative non-integers, which [`my_floor`] gets wrong.
const FAIL_INPUTS: &[f64] = &[0.0, 0.0, 1.0, 1.2, 1.9, -1.0, -1.5, -1.9, -2.0];

/// Inputs ending in NaN, which [`my_floor`] rejects.
const ERR_INPUTS: &[f64] = &[0.0, 0.0, f64::NAN];

/// Why a check of [`my_floor`] failed.
///
/// The `Display` output is the detail text written to the report.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CheckFailure {
    /// The value isn't a float.
    #[error("ValueError: could not convert string to float: '{value}'")]
    Parse {
        /// The value as given.
        value: String,
    },

    /// [`my_floor`] returned an error.
    #[error("{}: {error}", .error.kind())]
    Conversion {
        /// The error returned.
        error: FloorError,
    },

    /// [`my_floor`] disagreed with [`f64::floor`].
    #[error("AssertionError: my_floor failed for input {input:?}\nassert {actual} == {expected}")]
    Mismatch {
        /// The input.
        input: f64,
        /// What `my_floor` returned.
        actual: f64,
        /// What `floor` returned.
        expected: f64,
    },
}

/// Checks `my_floor` against `floor` for each input, stopping at the first failure.
pub fn check_inputs(inputs: &[f64]) -> Result<(), CheckFailure> {
    for &input in inputs {
        let actual = my_floor(input).map_err(|error| CheckFailure::Conversion { error })?;
        let expected = input.floor();
        if actual != expected {
            return Err(CheckFailure::Mismatch {
                input,
                actual,
                expected,
            });
        }
    }
    Ok(())
}

/// Parses `value` as a float, then checks `my_floor` against it.
///
/// Surrounding whitespace is ignored. `nan` and `inf` parse, and then fail the check.
pub fn check_value(value: &str) -> Result<(), CheckFailure> {
    let input = value
        .trim()
        .parse::<f64>()
        .map_err(|_| CheckFailure::Parse {
            value: value.to_owned(),
        })?;
    check_inputs(&[input])
}

/// Results for the fixed cases, in the order they are defined.
pub fn builtin_results() -> Vec<TestResult> {
    vec![
        to_result("test_my_floor_pass", check_inputs(PASS_INPUTS)),
        to_result("test_my_floor_fail", check_inputs(FAIL_INPUTS)),
        to_result("test_my_floor_err", check_inputs(ERR_INPUTS)),
        TestResult::new("test_my_floor_skip", TestOutcome::Skipped),
    ]
}

/// Runs one test per value, followed by the fixed cases if `builtin` is set.
pub fn run_suite(values: &[String], builtin: bool) -> TestReport {
    let mut tests: Vec<_> = values
        .iter()
        .map(|value| to_result(format!("test_my_floor[{value}]"), check_value(value)))
        .collect();
    if builtin {
        tests.extend(builtin_results());
    }
    TestReport::from_tests(tests)
}

fn to_result(name: impl Into<String>, result: Result<(), CheckFailure>) -> TestResult {
    match result {
        Ok(()) => TestResult::new(name, TestOutcome::Passed),
        Err(failure) => TestResult::new(name, TestOutcome::Failed).with_detail(failure.to_string()),
    }
}
