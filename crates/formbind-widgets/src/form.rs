#![forbid(unsafe_code)]

//! Presentational view of an unvalidated controlled text field.

use formbind_core::geometry::Rect;
use formbind_render::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

use crate::edit::FieldEdit;
use crate::{Widget, draw_line, focus_marker};

/// A single-row `label: text` field. The text comes from the owner; edits
/// go back through `on_change` as the full next text.
pub struct Form<'a> {
    label: &'a str,
    text: &'a str,
    focused: bool,
    on_change: Option<&'a dyn Fn(String)>,
}

impl<'a> Form<'a> {
    #[must_use]
    pub fn new(label: &'a str, text: &'a str) -> Self {
        Self {
            label,
            text,
            focused: false,
            on_change: None,
        }
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn on_change(mut self, callback: &'a dyn Fn(String)) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// Forward `edit` to `on_change` if it changes the text.
    ///
    /// Returns `true` if the callback was invoked.
    pub fn handle_edit(&self, edit: &FieldEdit) -> bool {
        let Some(on_change) = self.on_change else {
            return false;
        };
        let next = edit.apply(self.text);
        if next == self.text {
            return false;
        }
        on_change(next);
        true
    }

    fn prefix(&self) -> String {
        format!("{}{}: ", focus_marker(self.focused), self.label)
    }

    #[must_use]
    pub fn cursor_x(&self, area: Rect) -> u16 {
        let width = self.prefix().width() + self.text.width();
        area.x
            .saturating_add(u16::try_from(width).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1))
    }
}

impl Widget for Form<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if let Some(row) = area.row(0) {
            draw_line(buf, row, &format!("{}{}", self.prefix(), self.text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn renders_label_and_text() {
        let mut buf = Buffer::new(16, 1);
        Form::new("Name", "Ada").focused(true).render(buf.area(), &mut buf);
        assert_eq!(buf.to_text(), "> Name: Ada");
    }

    #[test]
    fn forwards_next_text() {
        let seen = RefCell::new(None);
        let record = |next: String| *seen.borrow_mut() = Some(next);
        let form = Form::new("Name", "Ad").on_change(&record);
        assert!(form.handle_edit(&FieldEdit::Insert('a')));
        assert_eq!(seen.borrow().as_deref(), Some("Ada"));
    }

    #[test]
    fn unchanged_text_is_not_forwarded() {
        let calls = RefCell::new(0);
        let count = |_: String| *calls.borrow_mut() += 1;
        let form = Form::new("Name", "").on_change(&count);
        assert!(!form.handle_edit(&FieldEdit::Backspace));
        assert!(!form.handle_edit(&FieldEdit::Increment));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn cursor_accounts_for_wide_text() {
        let form = Form::new("N", "日本");
        // "  N: " (5) + "日本" (4)
        assert_eq!(form.cursor_x(Rect::new(0, 0, 20, 1)), 9);
    }
}
