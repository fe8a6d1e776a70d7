#![forbid(unsafe_code)]

//! Backend-neutral input events.
//!
//! Components never see backend types. With the `crossterm` feature,
//! [`Event::from_crossterm`] converts terminal events into this model; the
//! conversion drops events that formbind has no use for (mouse motion,
//! unsupported keys) by returning `None`.

use bitflags::bitflags;

/// An input event delivered to the component tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// Pasted text (bracketed paste).
    Paste(String),
    /// The terminal was resized to `width` x `height` cells.
    Resize { width: u16, height: u16 },
    /// Terminal focus changed. `true` when focus was gained.
    Focus(bool),
}

/// A key press, repeat, or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is `Ctrl` + `c` (case-insensitive).
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
            && matches!(self.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
    }

    /// Press and repeat events act; release events are informational.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        const SUPER = 1 << 3;
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod crossterm_compat {
    use super::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
    use crossterm::event as ct;

    impl Event {
        /// Convert a crossterm event. Returns `None` for events with no
        /// counterpart in this model.
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => KeyEvent::from_crossterm(key).map(Event::Key),
                ct::Event::Paste(text) => Some(Event::Paste(text)),
                ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
                ct::Event::FocusGained => Some(Event::Focus(true)),
                ct::Event::FocusLost => Some(Event::Focus(false)),
                ct::Event::Mouse(_) => None,
            }
        }
    }

    impl KeyEvent {
        #[must_use]
        pub fn from_crossterm(key: ct::KeyEvent) -> Option<Self> {
            let code = match key.code {
                ct::KeyCode::Char(c) => KeyCode::Char(c),
                ct::KeyCode::Enter => KeyCode::Enter,
                ct::KeyCode::Esc => KeyCode::Escape,
                ct::KeyCode::Backspace => KeyCode::Backspace,
                ct::KeyCode::Delete => KeyCode::Delete,
                ct::KeyCode::Tab => KeyCode::Tab,
                ct::KeyCode::BackTab => KeyCode::BackTab,
                ct::KeyCode::Up => KeyCode::Up,
                ct::KeyCode::Down => KeyCode::Down,
                ct::KeyCode::Left => KeyCode::Left,
                ct::KeyCode::Right => KeyCode::Right,
                ct::KeyCode::Home => KeyCode::Home,
                ct::KeyCode::End => KeyCode::End,
                _ => return None,
            };
            let kind = match key.kind {
                ct::KeyEventKind::Press => KeyEventKind::Press,
                ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                ct::KeyEventKind::Release => KeyEventKind::Release,
            };
            Some(KeyEvent {
                code,
                modifiers: Modifiers::from_crossterm(key.modifiers),
                kind,
            })
        }
    }

    impl Modifiers {
        #[must_use]
        pub fn from_crossterm(mods: ct::KeyModifiers) -> Self {
            let mut out = Modifiers::NONE;
            if mods.contains(ct::KeyModifiers::SHIFT) {
                out |= Modifiers::SHIFT;
            }
            if mods.contains(ct::KeyModifiers::ALT) {
                out |= Modifiers::ALT;
            }
            if mods.contains(ct::KeyModifiers::CONTROL) {
                out |= Modifiers::CTRL;
            }
            if mods.contains(ct::KeyModifiers::SUPER) {
                out |= Modifiers::SUPER;
            }
            out
        }
    }

}
