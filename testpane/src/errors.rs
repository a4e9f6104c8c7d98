// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use std::error::Error;
use testpane_metadata::TestpaneExitCode;
use testpane_runner::errors::{ConfigParseError, DisplayErrorChain, ExecutionError, UiError};
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// An error that is reported to the user with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine the current directory")]
    CurrentDirFailed {
        #[source]
        error: std::io::Error,
    },
    #[error("root directory is not valid UTF-8")]
    RootInvalidUtf8 {
        #[source]
        error: camino::FromPathBufError,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        error: ConfigParseError,
    },
    #[error("failed to serialize config")]
    ConfigSerializeError {
        #[source]
        error: toml::ser::Error,
    },
    #[error("failed to build async runtime")]
    RuntimeBuildError {
        #[source]
        error: std::io::Error,
    },
    #[error("interactive view error")]
    UiError {
        #[from]
        error: UiError,
    },
    #[error("tests failed to run")]
    TestsFailedToRun {
        #[source]
        error: ExecutionError,
    },
    #[error("test run failed")]
    TestRunFailed,
    #[error("error writing output")]
    WriteOutputError {
        #[source]
        error: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::RootInvalidUtf8 { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigSerializeError { .. }
            | Self::RuntimeBuildError { .. } => TestpaneExitCode::SETUP_ERROR,
            Self::UiError { error } => match error {
                UiError::Draw { .. } => TestpaneExitCode::WRITE_OUTPUT_ERROR,
                _ => TestpaneExitCode::SETUP_ERROR,
            },
            Self::TestsFailedToRun { .. } => TestpaneExitCode::TESTS_FAILED_TO_RUN,
            Self::TestRunFailed => TestpaneExitCode::TEST_RUN_FAILED,
            Self::WriteOutputError { .. } => TestpaneExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::CurrentDirFailed { error } => {
                error!("could not determine the current directory");
                Some(error as &dyn Error)
            }
            Self::RootInvalidUtf8 { error } => {
                error!(
                    "root directory `{}` is not valid UTF-8",
                    error.as_path().display().style(styles.bold)
                );
                None
            }
            Self::ConfigParseError { error } => {
                error!("{}", DisplayErrorChain::new(error));
                None
            }
            Self::ConfigSerializeError { error } => {
                error!("failed to serialize config");
                Some(error as &dyn Error)
            }
            Self::RuntimeBuildError { error } => {
                error!("failed to build async runtime");
                Some(error as &dyn Error)
            }
            Self::UiError { error } => {
                error!("{}", DisplayErrorChain::new(error));
                None
            }
            Self::TestsFailedToRun { error } => {
                error!("tests failed to run: {}", DisplayErrorChain::new(error));
                if let Some(stderr) = error.stderr() {
                    error!(
                        target: NO_HEADING_TARGET,
                        "{}",
                        "--- test suite stderr ---".style(styles.dimmed)
                    );
                    error!(target: NO_HEADING_TARGET, "{stderr}");
                }
                None
            }
            Self::TestRunFailed => {
                error!("test run failed");
                None
            }
            Self::WriteOutputError { error } => {
                error!("error writing output");
                Some(error as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
