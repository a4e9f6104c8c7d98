// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `testpane` failures.
///
/// `testpane` invocations may fail for a variety of reasons. This structure documents the exit
/// codes that may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum TestpaneExitCode {}

impl TestpaneExitCode {
    /// No errors occurred and every test in the report passed or was skipped.
    pub const OK: i32 = 0;

    /// The report was read, and one or more tests in it failed.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// The test suite could not produce a usable report.
    ///
    /// This covers the suite failing to start, exiting without writing a report, and writing a
    /// report that is empty or malformed.
    pub const TESTS_FAILED_TO_RUN: i32 = 102;

    /// A user issue happened while setting up a testpane invocation, for example an invalid
    /// config file, or an interactive session started without a terminal.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
