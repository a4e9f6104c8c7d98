// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The input slots shown in the interactive view.

/// A fixed number of text slots, one of which has focus.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputForm {
    entries: Vec<String>,
    focus: usize,
}

impl InputForm {
    /// The maximum number of characters in a slot.
    pub const MAX_ENTRY_CHARS: usize = 32;

    /// Creates a form with `slots` empty slots, focused on the first one.
    ///
    /// A form always has at least one slot.
    pub fn new(slots: usize) -> Self {
        Self {
            entries: vec![String::new(); slots.max(1)],
            focus: 0,
        }
    }

    /// Fills slots in order from `values`, ignoring values beyond the last slot.
    ///
    /// Values longer than [`MAX_ENTRY_CHARS`](Self::MAX_ENTRY_CHARS) are cut short.
    pub fn prefill<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (entry, value) in self.entries.iter_mut().zip(values) {
            *entry = value
                .as_ref()
                .chars()
                .filter(|c| !c.is_control())
                .take(Self::MAX_ENTRY_CHARS)
                .collect();
        }
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a form has at least one slot.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the current entries, in slot order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the index of the focused slot.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns the label for the slot at `index`.
    pub fn label(index: usize) -> String {
        format!("Test value {}:", index + 1)
    }

    /// Appends a character to the focused slot.
    ///
    /// Returns false if the character was rejected, either because it is a control character or
    /// because the slot is full.
    pub fn insert(&mut self, c: char) -> bool {
        let entry = &mut self.entries[self.focus];
        if c.is_control() || entry.chars().count() >= Self::MAX_ENTRY_CHARS {
            return false;
        }
        entry.push(c);
        true
    }

    /// Removes the last character of the focused slot.
    pub fn backspace(&mut self) {
        self.entries[self.focus].pop();
    }

    /// Empties the focused slot.
    pub fn clear_field(&mut self) {
        self.entries[self.focus].clear();
    }

    /// Moves focus to the next slot, wrapping around.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.entries.len();
    }

    /// Moves focus to the previous slot, wrapping around.
    pub fn focus_prev(&mut self) {
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(self.entries.len() - 1);
    }
}
