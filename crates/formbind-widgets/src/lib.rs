#![forbid(unsafe_code)]

//! Controlled form components for formbind.
//!
//! A *controlled* field never keeps its own text: what it displays is
//! derived from state owned by a parent, and user edits go back to that
//! parent as callbacks. The parent decides whether the edit is committed.
//!
//! - [`bounded::BoundedNumberField`] owns an integer plus a validation
//!   message and gates every update through a closed range check.
//! - [`number_form::NumberForm`], [`form::Form`] and
//!   [`display_data::DisplayData`] are presentational: they render props
//!   and forward edits.
//! - [`parent::Parent`] owns all state and wires the children together.

pub mod bounded;
pub mod display_data;
pub mod edit;
pub mod form;
pub mod messages;
pub mod number_form;
pub mod panel;
pub mod parent;

pub use bounded::{BoundedNumberField, FieldState, NumericRange, Outcome};
pub use display_data::DisplayData;
pub use edit::FieldEdit;
pub use form::Form;
pub use messages::Messages;
pub use number_form::NumberForm;
pub use panel::Panel;
pub use parent::{EventResult, Focus, Parent};

use formbind_core::geometry::Rect;
use formbind_render::buffer::Buffer;

/// A renderable component.
///
/// Widgets draw themselves into `buf`, clipped to `area`.
pub trait Widget {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        (**self).render(area, buf);
    }
}

/// Renders nothing. Useful as the child of a [`Panel`] drawn only for its
/// frame.
impl Widget for () {
    fn render(&self, _area: Rect, _buf: &mut Buffer) {}
}

/// Draw one line of text on the first row of `area`, clipped to its width.
///
/// Returns the column after the last drawn grapheme.
pub(crate) fn draw_line(buf: &mut Buffer, area: Rect, text: &str) -> u16 {
    if area.is_empty() {
        return area.x;
    }
    buf.set_string(area.x, area.y, text, area.right())
}

/// Focus marker drawn in front of a field label.
pub(crate) fn focus_marker(focused: bool) -> &'static str {
    if focused { "> " } else { "  " }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_line_clips_to_area() {
        let mut buf = Buffer::new(10, 2);
        let end = draw_line(&mut buf, Rect::new(2, 1, 3, 1), "abcdef");
        assert_eq!(end, 5);
        assert_eq!(buf.to_text(), "\n  abc");
    }

    #[test]
    fn draw_line_empty_area_draws_nothing() {
        let mut buf = Buffer::new(4, 1);
        let end = draw_line(&mut buf, Rect::new(1, 0, 0, 1), "abc");
        assert_eq!(end, 1);
        assert_eq!(buf.to_text(), "");
    }

    #[test]
    fn focus_marker_width_is_stable() {
        assert_eq!(focus_marker(true).len(), focus_marker(false).len());
    }
}
