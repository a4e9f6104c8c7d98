// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::env::set_env_vars;
use camino::Utf8PathBuf;
use std::{
    borrow::Cow,
    fmt,
    process::{Command, ExitStatus, Stdio},
};

/// A builder for a `testpane` invocation.
#[derive(Clone, Debug)]
pub struct TestpaneCli {
    bin: Utf8PathBuf,
    args: Vec<String>,
    unchecked: bool,
}

impl TestpaneCli {
    /// Creates a new invocation of `bin`, which should be `testpane-dup`.
    ///
    /// Only integration tests know where `testpane-dup` was built, through
    /// `env!("CARGO_BIN_EXE_testpane-dup")`.
    pub fn new(bin: impl Into<Utf8PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            args: Vec::new(),
            unchecked: false,
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(&mut self, arg: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(arg.into_iter().map(Into::into));
        self
    }

    /// If true, a non-zero exit status is not treated as a failure.
    pub fn unchecked(&mut self, unchecked: bool) -> &mut Self {
        self.unchecked = unchecked;
        self
    }

    /// Runs the command with stdin closed, and returns its output.
    pub fn output(&self) -> TestpaneOutput {
        let mut command = Command::new(&self.bin);
        command.args(&self.args).stdin(Stdio::null());
        set_env_vars(&mut command);
        let output = command.output().expect("failed to execute");

        let ret = TestpaneOutput {
            command,
            exit_status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        };

        if !self.unchecked && !output.status.success() {
            panic!("command failed:\n\n{ret}");
        }

        ret
    }
}

/// The output of a `testpane` invocation.
pub struct TestpaneOutput {
    pub command: Command,
    pub exit_status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl TestpaneOutput {
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }

    pub fn stdout_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

impl fmt::Display for TestpaneOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command: {:?}\nexit code: {:?}\n\
                   --- stdout ---\n{}\n\n--- stderr ---\n{}\n\n",
            self.command,
            self.exit_status.code(),
            String::from_utf8_lossy(&self.stdout),
            String::from_utf8_lossy(&self.stderr)
        )
    }
}

// Make Debug output the same as Display output, so `.unwrap()` and `.expect()` are nicer.
impl fmt::Debug for TestpaneOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
