// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the JSON reports read by
//! [testpane](https://crates.io/crates/testpane), and the exit codes its
//! command-line interface documents.
//!
//! Test-running tools that want to be driven by testpane write a
//! [`ReportDocument`] to the path testpane hands them.

mod exit_codes;
#[cfg(feature = "proptest1")]
mod proptest_helpers;
mod report;

pub use exit_codes::*;
pub use report::*;
