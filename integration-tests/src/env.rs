// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::process::Command;

/// Environment variables that change testpane's output, and are removed for tests.
const REMOVED_VARS: &[&str] = &["TESTPANE_LOG", "TESTPANE_VERBOSE", "TESTPANE"];

/// Sets up the environment for a testpane invocation under test.
pub fn set_env_vars(command: &mut Command) {
    // Ensure that ANSI color codes don't interfere with the output.
    command.env("CARGO_TERM_COLOR", "never");
    for var in REMOVED_VARS {
        command.env_remove(var);
    }
}
