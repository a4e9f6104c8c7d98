// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by testpane.

use camino::{Utf8Path, Utf8PathBuf};
use std::{error::Error, fmt, process::ExitStatus};
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse testpane config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
///
/// Returned by [`ConfigParseError::kind`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<config::ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<config::ConfigError>),

    /// A value was read but is not usable.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// The dotted key of the value.
        key: &'static str,

        /// Why the value was rejected.
        reason: String,
    },
}

/// An error that prevented a test run from producing a usable report.
///
/// Every variant means the same thing to a user: the tests failed to run. The variants exist so
/// that logs and the command line can say why.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// The temporary directory for the report could not be created.
    #[error("failed to create a temporary directory for the report")]
    ArtifactCreate {
        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The test suite could not be started.
    #[error("failed to start `{program}`")]
    Spawn {
        /// The program that was run.
        program: String,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The test suite exited without writing a report.
    #[error("test suite exited without writing a report to `{path}` ({exit_status})")]
    ReportMissing {
        /// Where the report was expected.
        path: Utf8PathBuf,

        /// How the suite exited.
        exit_status: ExitStatus,

        /// The last lines of the suite's standard error.
        stderr: String,
    },

    /// The test suite wrote an empty report.
    #[error("test suite wrote an empty report to `{path}` ({exit_status})")]
    ReportEmpty {
        /// Where the report was written.
        path: Utf8PathBuf,

        /// How the suite exited.
        exit_status: ExitStatus,

        /// The last lines of the suite's standard error.
        stderr: String,
    },

    /// The report could not be read.
    #[error("failed to read report at `{path}`")]
    ReportRead {
        /// Where the report was written.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The report is not a valid report document.
    #[error("failed to parse report at `{path}`")]
    ReportParse {
        /// Where the report was written.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },

    /// The task running the test suite panicked or was cancelled.
    #[error("test run task did not complete")]
    TaskFailed {
        /// The underlying error.
        #[source]
        error: tokio::task::JoinError,
    },
}

impl ExecutionError {
    /// Returns the tail of the suite's standard error, if the suite ran and this error carries it.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::ReportMissing { stderr, .. } | Self::ReportEmpty { stderr, .. } => {
                (!stderr.is_empty()).then_some(stderr.as_str())
            }
            Self::ArtifactCreate { .. }
            | Self::Spawn { .. }
            | Self::ReportRead { .. }
            | Self::ReportParse { .. }
            | Self::TaskFailed { .. } => None,
        }
    }
}

/// An error that occurred while running the interactive view.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UiError {
    /// Standard input or output is not a terminal.
    #[error("interactive mode requires stdin and stdout to be terminals")]
    NotATerminal,

    /// The terminal could not be switched into interactive mode.
    #[error("failed to set up the terminal")]
    TerminalSetup {
        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// Drawing a frame failed.
    #[error("failed to draw to the terminal")]
    Draw {
        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The terminal could not be restored after leaving the view.
    #[error("failed to leave interactive mode")]
    TerminalRestore {
        /// The underlying error.
        #[source]
        error: TerminalRestoreError,
    },
}

/// An error that occurred while restoring the terminal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TerminalRestoreError {
    /// The guard's mutex was poisoned.
    #[error("mutex was poisoned while restoring terminal state")]
    Poisoned,

    /// The terminal state could not be restored.
    #[error("failed to restore terminal state")]
    Restore(#[source] std::io::Error),
}

/// Displays an error along with its chain of sources.
///
/// ```text
/// failed to parse testpane config at `.config/testpane.toml`
///   caused by: invalid value for `suite.command`: must name a program
/// ```
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        while let Some(error) = source {
            write!(f, "\n  caused by: {error}")?;
            source = error.source();
        }

        Ok(())
    }
}
