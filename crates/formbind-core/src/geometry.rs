#![forbid(unsafe_code)]

//! Rectangles and edge insets in terminal cell coordinates.

/// A rectangle in cell coordinates. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Shrink the rectangle by the given insets, saturating at zero size.
    #[must_use]
    pub fn inner(&self, sides: Sides) -> Rect {
        let x = self.x.saturating_add(sides.left);
        let y = self.y.saturating_add(sides.top);
        let width = self
            .width
            .saturating_sub(sides.left)
            .saturating_sub(sides.right);
        let height = self
            .height
            .saturating_sub(sides.top)
            .saturating_sub(sides.bottom);
        Rect::new(x, y, width, height)
    }

    /// The single row at `offset` from the top, or `None` if outside.
    #[must_use]
    pub fn row(&self, offset: u16) -> Option<Rect> {
        if offset >= self.height {
            return None;
        }
        Some(Rect::new(self.x, self.y + offset, self.width, 1))
    }

    /// Split off the top `rows` rows. Returns `(top, rest)`.
    #[must_use]
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, rows);
        let rest = Rect::new(self.x, self.y + rows, self.width, self.height - rows);
        (top, rest)
    }
}

/// Insets for each edge of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    #[must_use]
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every edge.
    #[must_use]
    pub const fn all(value: u16) -> Self {
        Self::new(value, value, value, value)
    }

    /// Vertical and horizontal insets.
    #[must_use]
    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<u16> for Sides {
    fn from(value: u16) -> Self {
        Self::all(value)
    }
}

impl From<(u16, u16)> for Sides {
    fn from((vertical, horizontal): (u16, u16)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}
