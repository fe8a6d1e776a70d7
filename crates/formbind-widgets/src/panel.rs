#![forbid(unsafe_code)]

//! Panel widget: border + optional title + inner padding + child content.

use bitflags::bitflags;
use formbind_core::geometry::{Rect, Sides};
use formbind_render::buffer::Buffer;
use formbind_render::cell::Cell;

use crate::Widget;

bitflags! {
    /// Which edges of a panel get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Borders: u8 {
        const NONE = 0;
        const TOP = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

/// Line-drawing style for borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Square,
    Rounded,
    /// `+`, `-` and `|` only, for terminals without box-drawing glyphs.
    Ascii,
}

/// Glyphs for each border position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderSet {
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        ..Self::SQUARE
    };
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

impl BorderType {
    #[must_use]
    pub const fn to_border_set(self) -> BorderSet {
        match self {
            Self::Square => BorderSet::SQUARE,
            Self::Rounded => BorderSet::ROUNDED,
            Self::Ascii => BorderSet::ASCII,
        }
    }
}

/// A bordered container that renders a child widget inside an inner padded area.
#[derive(Debug, Clone)]
pub struct Panel<'a, W> {
    child: W,
    borders: Borders,
    border_type: BorderType,
    title: Option<&'a str>,
    padding: Sides,
}

impl<'a, W> Panel<'a, W> {
    pub fn new(child: W) -> Self {
        Self {
            child,
            borders: Borders::ALL,
            border_type: BorderType::Square,
            title: None,
            padding: Sides::default(),
        }
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Title drawn over the top border, after the corner.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn padding(mut self, padding: impl Into<Sides>) -> Self {
        self.padding = padding.into();
        self
    }

    /// The area left for the child after borders and padding.
    pub fn inner(&self, area: Rect) -> Rect {
        let edge = |flag: Borders| u16::from(self.borders.contains(flag));
        let bordered = Sides::new(
            edge(Borders::TOP),
            edge(Borders::RIGHT),
            edge(Borders::BOTTOM),
            edge(Borders::LEFT),
        );
        area.inner(bordered).inner(self.padding)
    }

    fn draw_borders(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let set = self.border_type.to_border_set();
        let (left, right) = (area.x, area.right() - 1);
        let (top, bottom) = (area.y, area.bottom() - 1);

        if self.borders.contains(Borders::TOP) {
            for x in left..=right {
                buf.set(x, top, Cell::from_char(set.horizontal));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in left..=right {
                buf.set(x, bottom, Cell::from_char(set.horizontal));
            }
        }
        if self.borders.contains(Borders::LEFT) {
            for y in top..=bottom {
                buf.set(left, y, Cell::from_char(set.vertical));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in top..=bottom {
                buf.set(right, y, Cell::from_char(set.vertical));
            }
        }

        let corners = [
            (Borders::TOP | Borders::LEFT, left, top, set.top_left),
            (Borders::TOP | Borders::RIGHT, right, top, set.top_right),
            (Borders::BOTTOM | Borders::LEFT, left, bottom, set.bottom_left),
            (Borders::BOTTOM | Borders::RIGHT, right, bottom, set.bottom_right),
        ];
        for (needed, x, y, glyph) in corners {
            if self.borders.contains(needed) {
                buf.set(x, y, Cell::from_char(glyph));
            }
        }
    }

    fn draw_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title else {
            return;
        };
        if area.width < 3 {
            return;
        }
        let start = area.x + u16::from(self.borders.contains(Borders::LEFT));
        let end = area.right() - u16::from(self.borders.contains(Borders::RIGHT));
        buf.set_string(start, area.y, title, end);
    }
}

impl<W: Widget> Widget for Panel<'_, W> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        buf.clear_area(area);
        self.draw_borders(area, buf);
        self.draw_title(area, buf);
        let inner = self.inner(area);
        if !inner.is_empty() {
            self.child.render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fill(char);

    impl Widget for Fill {
        fn render(&self, area: Rect, buf: &mut Buffer) {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    buf.set(x, y, Cell::from_char(self.0));
                }
            }
        }
    }

    #[test]
    fn square_panel_with_title() {
        let mut buf = Buffer::new(8, 3);
        Panel::new(Fill('.')).title("Hi").render(buf.area(), &mut buf);
        assert_eq!(buf.to_text(), "┌Hi────┐\n│......│\n└──────┘");
    }

    #[test]
    fn ascii_panel_with_padding() {
        let mut buf = Buffer::new(6, 4);
        Panel::new(Fill('x'))
            .border_type(BorderType::Ascii)
            .padding(Sides::symmetric(0, 1))
            .render(buf.area(), &mut buf);
        assert_eq!(buf.to_text(), "+----+\n| xx |\n| xx |\n+----+");
    }

    #[test]
    fn rounded_corners() {
        let mut buf = Buffer::new(3, 2);
        Panel::new(Fill('x'))
            .border_type(BorderType::Rounded)
            .render(buf.area(), &mut buf);
        assert_eq!(buf.to_text(), "╭─╮\n╰─╯");
    }

    #[test]
    fn no_borders_gives_child_everything() {
        let panel = Panel::new(Fill('x')).borders(Borders::NONE);
        assert_eq!(panel.inner(Rect::new(1, 1, 4, 2)), Rect::new(1, 1, 4, 2));
    }

    #[test]
    fn title_clipped_inside_borders() {
        let mut buf = Buffer::new(5, 2);
        Panel::new(Fill(' ')).title("Long title").render(buf.area(), &mut buf);
        assert_eq!(buf.to_lines()[0], "┌Lon┐");
    }

    #[test]
    fn zero_area_is_noop() {
        let mut buf = Buffer::new(2, 2);
        Panel::new(Fill('x')).render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf.to_text(), "\n");
    }
}
