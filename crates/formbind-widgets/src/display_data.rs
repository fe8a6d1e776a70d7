#![forbid(unsafe_code)]

//! Read-only display of data owned elsewhere.

use formbind_core::geometry::Rect;
use formbind_render::buffer::Buffer;

use crate::{Widget, draw_line};

/// Renders each line it is given, indented to align with field text.
pub struct DisplayData<'a> {
    lines: Vec<&'a str>,
}

impl<'a> DisplayData<'a> {
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
        }
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

impl Widget for DisplayData<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        for (offset, line) in (0u16..).zip(&self.lines) {
            let Some(row) = area.row(offset) else {
                break;
            };
            draw_line(buf, row, &format!("  {line}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_indented_lines() {
        let data = DisplayData::new("You typed: hi\nsecond");
        let mut buf = Buffer::new(20, 3);
        data.render(buf.area(), &mut buf);
        assert_eq!(buf.to_text(), "  You typed: hi\n  second\n");
        assert_eq!(data.height(), 2);
    }

    #[test]
    fn clipped_to_area_height() {
        let data = DisplayData::new("a\nb\nc");
        let mut buf = Buffer::new(5, 2);
        data.render(buf.area(), &mut buf);
        assert_eq!(buf.to_text(), "  a\n  b");
    }
}
