// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by testpane's integration tests.

pub mod env;
pub mod temp_root;
pub mod testpane_cli;
