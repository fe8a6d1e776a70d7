#![forbid(unsafe_code)]

//! User edits of a controlled field.
//!
//! A controlled field never mutates its own text. An edit is instead
//! applied to the field's *current* text to produce a candidate, and the
//! candidate is handed to the owner, which decides what the field shows
//! next.

use formbind_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::bounded::{ParsedInput, parse_leading_int};

/// One user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Type a character at the end.
    Insert(char),
    /// Paste text at the end.
    InsertStr(String),
    /// Delete the last grapheme.
    Backspace,
    /// Empty the field.
    Clear,
    /// Step a numeric field up by one.
    Increment,
    /// Step a numeric field down by one.
    Decrement,
    /// Replace the text outright.
    Replace(String),
}

impl FieldEdit {
    /// Map an input event to an edit, if it is one.
    ///
    /// Plain and shifted characters insert; `Ctrl-U` clears; Backspace
    /// deletes; Up/Down step. Key releases and other chords are not edits.
    #[must_use]
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Paste(text) => Some(Self::InsertStr(single_line(text))),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if !key.is_actionable() {
            return None;
        }
        if key.is_ctrl('u') {
            return Some(Self::Clear);
        }
        if key
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(c) if !c.is_control() => Some(Self::Insert(c)),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Up => Some(Self::Increment),
            KeyCode::Down => Some(Self::Decrement),
            _ => None,
        }
    }

    /// Candidate text for a free-text field. Steps leave text unchanged.
    #[must_use]
    pub fn apply(&self, current: &str) -> String {
        match self {
            Self::Insert(c) => {
                let mut next = current.to_owned();
                next.push(*c);
                next
            }
            Self::InsertStr(s) => format!("{current}{s}"),
            Self::Backspace => {
                let cut = current
                    .grapheme_indices(true)
                    .next_back()
                    .map_or(0, |(i, _)| i);
                current[..cut].to_owned()
            }
            Self::Clear => String::new(),
            Self::Increment | Self::Decrement => current.to_owned(),
            Self::Replace(s) => s.clone(),
        }
    }

    /// Candidate text for a numeric field.
    ///
    /// Same as [`apply`](Self::apply), except steps add or subtract one
    /// from the leading integer (saturating). Text without a leading
    /// integer is left unchanged by a step.
    #[must_use]
    pub fn apply_numeric(&self, current: &str) -> String {
        let step = match self {
            Self::Increment => 1,
            Self::Decrement => -1,
            other => return other.apply(current),
        };
        match parse_leading_int(current) {
            ParsedInput::Number(n) => n.saturating_add(step).to_string(),
            ParsedInput::Overflow(_) | ParsedInput::NotANumber => current.to_owned(),
        }
    }
}

/// Pasted text as it may enter a one-line field: line breaks and tabs
/// become spaces, other control characters (including ESC) are dropped.
fn single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' | '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
