// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [testpane](https://crates.io/crates/testpane): run a test suite against
//! a set of values, read back its JSON report, and show the result.
//!
//! For the report format, see [`testpane-metadata`](testpane_metadata).

pub mod config;
pub mod display;
pub mod errors;
pub mod executor;
pub mod form;
pub mod input;
pub mod session;
pub mod ui;
pub mod values;
pub mod view;
