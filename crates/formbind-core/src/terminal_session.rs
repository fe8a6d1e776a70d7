#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] enters raw mode on construction and restores the
//! terminal on drop, including during panic unwinding. Every mode it turns
//! on is pushed onto a stack as soon as it succeeds; drop shows the cursor
//! and then pops the stack, so only what was actually enabled is undone,
//! newest first:
//!
//! 1. Focus events
//! 2. Bracketed paste
//! 3. Alternate screen
//! 4. Raw mode
//!
//! # Usage
//!
//! ```no_run
//! use formbind_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     alternate_screen: true,
//!     ..Default::default()
//! })?;
//! // Terminal is restored when `session` drops.
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};

use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::event::Event;

/// Which terminal modes a session turns on. All default to `false`.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Use the alternate screen buffer, preserving the user's scrollback.
    pub alternate_screen: bool,
    /// Deliver pasted text as one [`Event::Paste`] instead of key presses.
    pub bracketed_paste: bool,
    /// Report focus gained / lost as [`Event::Focus`].
    pub focus_events: bool,
}

impl SessionOptions {
    /// Modes to enable, in order. Raw mode always comes first.
    fn modes(&self) -> Vec<Mode> {
        let optional = [
            (self.alternate_screen, Mode::AlternateScreen),
            (self.bracketed_paste, Mode::BracketedPaste),
            (self.focus_events, Mode::FocusEvents),
        ];
        std::iter::once(Mode::Raw)
            .chain(optional.into_iter().filter_map(|(on, mode)| on.then_some(mode)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Raw,
    AlternateScreen,
    BracketedPaste,
    FocusEvents,
}

impl Mode {
    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => terminal::enable_raw_mode(),
            Self::AlternateScreen => execute!(out, terminal::EnterAlternateScreen),
            Self::BracketedPaste => execute!(out, event::EnableBracketedPaste),
            Self::FocusEvents => execute!(out, event::EnableFocusChange),
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => terminal::disable_raw_mode(),
            Self::AlternateScreen => execute!(out, terminal::LeaveAlternateScreen),
            Self::BracketedPaste => execute!(out, event::DisableBracketedPaste),
            Self::FocusEvents => execute!(out, event::DisableFocusChange),
        }
    }
}

/// Owns raw mode for as long as it lives. Only one should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    active: Vec<Mode>,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested modes.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or any requested mode cannot be enabled.
    /// Modes enabled before the failure are undone when the partially built
    /// session drops.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        let modes = options.modes();
        let mut session = Self {
            options,
            active: Vec::with_capacity(modes.len()),
        };
        let mut stdout = io::stdout();
        for mode in modes {
            mode.enable(&mut stdout)?;
            session.active.push(mode);
        }
        Ok(session)
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Block until the next event that maps into [`Event`].
    pub fn read_event(&self) -> io::Result<Event> {
        loop {
            if let Some(ev) = Event::from_crossterm(event::read()?) {
                return Ok(ev);
            }
        }
    }

    /// Replace the screen contents with `lines`, one per row from the top.
    pub fn present<S: AsRef<str>>(&self, lines: &[S]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(stdout, cursor::MoveTo(0, row), style::Print(line.as_ref()))?;
        }
        stdout.flush()
    }

    /// Place the visible cursor at `(x, y)`.
    pub fn show_cursor_at(&self, x: u16, y: u16) -> io::Result<()> {
        execute!(io::stdout(), cursor::MoveTo(x, y), cursor::Show)
    }

    pub fn hide_cursor(&self) -> io::Result<()> {
        execute!(io::stdout(), cursor::Hide)
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        // Best effort.
        let _ = execute!(stdout, cursor::Show);
        while let Some(mode) = self.active.pop() {
            let _ = mode.disable(&mut stdout);
        }
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_enable_raw_mode_only() {
        assert_eq!(SessionOptions::default().modes(), vec![Mode::Raw]);
    }

    #[test]
    fn modes_enable_in_fixed_order() {
        let options = SessionOptions {
            alternate_screen: true,
            bracketed_paste: true,
            focus_events: true,
        };
        assert_eq!(
            options.modes(),
            vec![
                Mode::Raw,
                Mode::AlternateScreen,
                Mode::BracketedPaste,
                Mode::FocusEvents
            ]
        );
    }

    #[test]
    fn skipped_modes_are_not_requested() {
        let options = SessionOptions {
            bracketed_paste: true,
            ..Default::default()
        };
        assert_eq!(options.modes(), vec![Mode::Raw, Mode::BracketedPaste]);
    }

    // Entering raw mode would interfere with the test runner's terminal;
    // the session itself is exercised by the demo binary.
}
