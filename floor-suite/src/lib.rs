// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A test suite over [`my_floor`], a floor function with a sign bug.
//!
//! The suite writes its results as a testpane JSON report, so it can stand in for a conventional
//! test-running tool. Each value passed with `--test-values` becomes one test that compares
//! [`my_floor`] against [`f64::floor`]: non-negative values pass, negative non-integers fail.

mod opts;
mod suite;

pub use opts::{EmitMode, SuiteExitCode, SuiteOpts};
pub use suite::{CheckFailure, builtin_results, check_inputs, check_value, run_suite};

use thiserror::Error;

/// Computes the floor of `x`.
///
/// This truncates toward zero, which is only correct for non-negative inputs: `my_floor(-1.5)`
/// is `-1.0`, not `-2.0`.
pub fn my_floor(x: f64) -> Result<f64, FloorError> {
    if x.is_nan() {
        Err(FloorError::NaN)
    } else if x.is_infinite() {
        Err(FloorError::Infinite)
    } else {
        Ok(x.trunc())
    }
}

/// An input that [`my_floor`] can't represent as a whole number.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum FloorError {
    /// The input was NaN.
    #[error("cannot convert float NaN to integer")]
    NaN,

    /// The input was infinite.
    #[error("cannot convert float infinity to integer")]
    Infinite,
}

impl FloorError {
    /// The exception-style name reported alongside this error.
    pub fn kind(self) -> &'static str {
        match self {
            Self::NaN => "ValueError",
            Self::Infinite => "OverflowError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.5, 0.0 ; "half")]
    #[test_case(2.3, 2.0 ; "positive fraction")]
    #[test_case(1e99, 1e99 ; "huge")]
    #[test_case(-1.0, -1.0 ; "negative integer")]
    #[test_case(-1.5, -1.0 ; "negative fraction truncates")]
    #[test_case(-1.9, -1.0 ; "negative fraction near integer")]
    fn truncates(x: f64, expected: f64) {
        assert_eq!(my_floor(x), Ok(expected));
    }

    #[test]
    fn non_finite() {
        assert_eq!(my_floor(f64::NAN), Err(FloorError::NaN));
        assert_eq!(my_floor(f64::NEG_INFINITY), Err(FloorError::Infinite));
        assert_eq!(FloorError::NaN.kind(), "ValueError");
        assert_eq!(
            FloorError::Infinite.to_string(),
            "cannot convert float infinity to integer"
        );
    }
}
