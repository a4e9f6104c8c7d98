// Copyright (c) The testpane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal input handling for the interactive view.
//!
//! Key presses are mapped to [`UiEvent`]s by [`UiEvent::from_key`], which is a pure function. The
//! [`InputHandler`] reads events from the terminal, and the [`TerminalGuard`] puts the terminal
//! into raw mode on the alternate screen for as long as it is alive.

use crate::errors::{DisplayErrorChain, TerminalRestoreError, UiError};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use futures::StreamExt;
use std::{
    io::{self, IsTerminal},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{debug, warn};

/// An event the interactive view responds to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UiEvent {
    /// Type a character into the focused slot.
    Insert(char),

    /// Delete the last character of the focused slot.
    Backspace,

    /// Empty the focused slot.
    ClearField,

    /// Focus the next slot.
    FocusNext,

    /// Focus the previous slot.
    FocusPrev,

    /// Run the tests.
    Run,

    /// Scroll the detail pane up by a page.
    ScrollUp,

    /// Scroll the detail pane down by a page.
    ScrollDown,

    /// Leave the interactive view.
    Quit,

    /// The terminal was resized.
    Resize {
        /// The new number of columns.
        width: u16,

        /// The new number of rows.
        height: u16,
    },
}

impl UiEvent {
    /// Maps a key event to a UI event.
    ///
    /// Only presses count: releases and repeats reported by some terminals are ignored.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let event = match key.code {
            KeyCode::Char('c') if control => Self::Quit,
            KeyCode::Char('u') if control => Self::ClearField,
            KeyCode::Char(c)
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() && !c.is_control() =>
            {
                Self::Insert(c)
            }
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Tab | KeyCode::Down => Self::FocusNext,
            KeyCode::BackTab | KeyCode::Up => Self::FocusPrev,
            KeyCode::Enter | KeyCode::F(5) => Self::Run,
            KeyCode::PageUp => Self::ScrollUp,
            KeyCode::PageDown => Self::ScrollDown,
            KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(event)
    }
}

/// Returns true if both standard input and standard output are terminals.
pub fn is_interactive_terminal() -> bool {
    if !io::stdin().is_terminal() {
        debug!("stdin is not a terminal => is_interactive_terminal() is false");
        return false;
    }
    if !io::stdout().is_terminal() {
        debug!("stdout is not a terminal => is_interactive_terminal() is false");
        return false;
    }
    true
}

static ALTERNATE_SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Returns true while a [`TerminalGuard`] has the terminal on the alternate screen.
///
/// Anything written to stderr in that time lands on top of the interactive view, so log writers
/// check this and drop their output.
pub fn is_alternate_screen_active() -> bool {
    ALTERNATE_SCREEN_ACTIVE.load(Ordering::Acquire)
}

/// Reads [`UiEvent`]s from the terminal.
#[derive(Debug)]
pub struct InputHandler {
    stream: EventStream,
}

impl InputHandler {
    /// Creates a new handler reading from the terminal.
    pub fn new() -> Self {
        Self {
            stream: EventStream::new(),
        }
    }

    /// Receives an event from the input, or None if the input is closed and there are no more
    /// events.
    ///
    /// This is a cancel-safe operation.
    pub async fn recv(&mut self) -> Option<UiEvent> {
        loop {
            let next = self.stream.next().await?;
            // No await points past here, so dropping this future loses nothing.
            match next {
                Ok(Event::Key(key)) => {
                    if let Some(event) = UiEvent::from_key(key) {
                        return Some(event);
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    return Some(UiEvent::Resize { width, height });
                }
                Ok(event) => {
                    debug!("unhandled event: {:?}", event);
                }
                Err(error) => {
                    debug!("failed to read input event: {}", error);
                }
            }
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the terminal in raw mode on the alternate screen.
///
/// The original terminal state is restored when the guard is dropped, and also from a panic hook,
/// so that a panic with `panic = "abort"` doesn't leave the terminal unusable.
#[derive(Debug)]
pub struct TerminalGuard {
    imp: GuardImpl,
}

impl TerminalGuard {
    /// Switches the terminal into interactive mode.
    pub fn new() -> Result<Self, UiError> {
        debug!("entering raw mode on the alternate screen");
        terminal::enable_raw_mode().map_err(|error| UiError::TerminalSetup { error })?;
        if let Err(error) = execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            if let Err(error) = terminal::disable_raw_mode() {
                warn!("failed to disable raw mode: {}", error);
            }
            return Err(UiError::TerminalSetup { error });
        }
        ALTERNATE_SCREEN_ACTIVE.store(true, Ordering::Release);

        // At this point, the new terminal state is committed. Install a
        // panic hook to restore the original state.
        let imp = GuardImpl {
            active: Arc::new(Mutex::new(true)),
        };
        let imp2 = imp.clone();
        let panic_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            // Ignore errors to avoid double-panicking.
            if let Err(error) = imp2.restore() {
                eprintln!(
                    "failed to restore terminal state: {}",
                    DisplayErrorChain::new(error)
                );
            }
            panic_hook(info);
        }));

        Ok(Self { imp })
    }

    /// Restores the original terminal state. Only the first call has any effect.
    pub fn restore(&self) -> Result<(), TerminalRestoreError> {
        self.imp.restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = self.imp.restore() {
            eprintln!(
                "failed to restore terminal state: {}",
                DisplayErrorChain::new(error)
            );
        }
    }
}

#[derive(Clone, Debug)]
struct GuardImpl {
    // `Arc<Mutex<_>>` for coordination between the drop handler and the panic
    // hook. True while the terminal still needs restoring.
    active: Arc<Mutex<bool>>,
}

impl GuardImpl {
    fn restore(&self) -> Result<(), TerminalRestoreError> {
        // Do not panic here, in case a panic happened while the mutex was
        // locked.
        let mut active = self
            .active
            .lock()
            .map_err(|_| TerminalRestoreError::Poisoned)?;
        if !*active {
            return Ok(());
        }
        *active = false;

        let screen = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let raw = terminal::disable_raw_mode();
        ALTERNATE_SCREEN_ACTIVE.store(false, Ordering::Release);
        screen.and(raw).map_err(TerminalRestoreError::Restore)
    }
}
