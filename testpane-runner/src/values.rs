// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The values a test run is performed against.

use std::fmt;

/// The values passed to the test suite in one run.
///
/// Built fresh for every run from whatever the user entered. Blank entries are discarded; if
/// nothing is left, the configured default values are used instead. Values are never validated
/// here: a value that doesn't parse as a number is forwarded as-is, and shows up as a failing
/// test.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputSet {
    values: Vec<String>,
    source: InputSource,
}

impl InputSet {
    /// Builds an input set from user entries, falling back to `defaults`.
    pub fn from_entries<I, S>(entries: I, defaults: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = entries
            .into_iter()
            .map(Into::into)
            .filter(|entry| !entry.trim().is_empty())
            .collect();

        if values.is_empty() {
            Self {
                values: defaults
                    .iter()
                    .filter(|value| !value.trim().is_empty())
                    .cloned()
                    .collect(),
                source: InputSource::Default,
            }
        } else {
            Self {
                values,
                source: InputSource::User,
            }
        }
    }

    /// Returns the values, in the order they were entered.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns where the values came from.
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no values.
    ///
    /// This can only happen if the defaults were blank as well.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for InputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.values.join(", "))?;
        if self.source == InputSource::Default {
            write!(f, " (defaults)")?;
        }
        Ok(())
    }
}

/// Where the values in an [`InputSet`] came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputSource {
    /// The user entered at least one non-blank value.
    User,

    /// Every entry was blank, so the defaults were used.
    Default,
}
