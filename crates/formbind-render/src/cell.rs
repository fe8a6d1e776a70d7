#![forbid(unsafe_code)]

//! A single terminal cell.

/// What a cell displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Nothing drawn; renders as a space.
    #[default]
    Empty,
    /// A grapheme cluster occupying `width` columns starting here.
    Grapheme { text: String, width: u8 },
    /// Trailing column of a wide grapheme drawn in the cell to the left.
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub content: CellContent,
}

impl Cell {
    #[must_use]
    pub fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Grapheme {
                text: c.to_string(),
                width: 1,
            },
        }
    }

    #[must_use]
    pub fn from_grapheme(text: &str, width: u8) -> Self {
        Self {
            content: CellContent::Grapheme {
                text: text.to_owned(),
                width,
            },
        }
    }

    #[must_use]
    pub const fn continuation() -> Self {
        Self {
            content: CellContent::Continuation,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// The single `char` in this cell, if it holds exactly one.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match &self.content {
            CellContent::Grapheme { text, .. } => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Columns this cell's content spans. Continuations span zero.
    #[must_use]
    pub fn width(&self) -> u8 {
        match &self.content {
            CellContent::Empty => 1,
            CellContent::Grapheme { width, .. } => *width,
            CellContent::Continuation => 0,
        }
    }
}
