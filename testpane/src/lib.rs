// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run a test suite against a set of values, and view the results side by side.
//!
//! This crate is the `testpane` command-line tool. The core logic lives in
//! [`testpane-runner`](testpane_runner).

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
