#![forbid(unsafe_code)]

//! Fixed-size cell grid.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height` at all times.
//! 2. A wide grapheme at `(x, y)` is always followed by a
//!    [`CellContent::Continuation`] at `(x + 1, y)`; overwriting either half
//!    clears the other.
//! 3. Writes outside the buffer are ignored.

use formbind_core::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, CellContent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// An empty buffer of `width` x `height` cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle at the origin.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell, keeping wide graphemes and their continuations paired.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let width = cell.width();
        if width > 1 && x.saturating_add(1) >= self.width {
            // No room for the trailing half.
            return;
        }

        self.clear_pair_at(x, y);
        self.cells[idx] = cell;
        if width > 1 {
            self.clear_pair_at(x + 1, y);
            if let Some(next) = self.index(x + 1, y) {
                self.cells[next] = Cell::continuation();
            }
        }
    }

    fn clear_pair_at(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        match self.cells[idx].content {
            CellContent::Continuation if x > 0 => {
                if let Some(prev) = self.index(x - 1, y) {
                    self.cells[prev] = Cell::default();
                }
            }
            CellContent::Grapheme { width, .. } if width > 1 => {
                if let Some(next) = self.index(x + 1, y) {
                    self.cells[next] = Cell::default();
                }
            }
            _ => {}
        }
        self.cells[idx] = Cell::default();
    }

    /// Draw `text` starting at `(x, y)`, stopping before `max_x`.
    ///
    /// Returns the column after the last drawn grapheme. Zero-width and
    /// control graphemes are skipped; a wide grapheme that would straddle
    /// `max_x` ends the draw.
    pub fn set_string(&mut self, mut x: u16, y: u16, text: &str, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in text.graphemes(true) {
            if x >= max_x {
                break;
            }
            // Control characters would reach the terminal as commands.
            if grapheme.chars().any(char::is_control) {
                continue;
            }
            let w = UnicodeWidthStr::width(grapheme);
            if w == 0 {
                continue;
            }
            let w = u16::try_from(w).unwrap_or(u16::MAX);
            if x.saturating_add(w) > max_x {
                break;
            }
            let cell = match grapheme.chars().next() {
                Some(c) if w == 1 && grapheme.chars().count() == 1 => Cell::from_char(c),
                _ => Cell::from_grapheme(grapheme, u8::try_from(w).unwrap_or(u8::MAX)),
            };
            self.set(x, y, cell);
            x = x.saturating_add(w);
        }
        x
    }

    /// Reset every cell inside `area` to empty.
    pub fn clear_area(&mut self, area: Rect) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                if let Some(idx) = self.index(x, y) {
                    self.cells[idx] = Cell::default();
                }
            }
        }
    }

    /// One string per row, full width. Empty cells render as spaces.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let mut line = String::with_capacity(usize::from(self.width));
                for x in 0..self.width {
                    match &self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)]
                        .content
                    {
                        CellContent::Empty => line.push(' '),
                        CellContent::Grapheme { text, .. } => line.push_str(text),
                        CellContent::Continuation => {}
                    }
                }
                line
            })
            .collect()
    }

    /// Rows joined by `\n`, with trailing whitespace trimmed from each row.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.to_lines()
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
