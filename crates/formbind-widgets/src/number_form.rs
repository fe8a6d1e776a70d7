#![forbid(unsafe_code)]

//! Presentational view of a bounded numeric field.
//!
//! `NumberForm` holds no state. It renders the props it was built with and
//! turns edits into candidate text for its `on_change` callback; the owner
//! validates the candidate and rebuilds the form from the result.

use formbind_core::geometry::Rect;
use formbind_render::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

use crate::bounded::FieldSnapshot;
use crate::edit::FieldEdit;
use crate::{Widget, draw_line, focus_marker};

/// Row 0: `label: value`. Row 1, only when rejected: the message.
pub struct NumberForm<'a> {
    label: &'a str,
    value: i64,
    message: Option<&'a str>,
    focused: bool,
    on_change: Option<&'a dyn Fn(&str)>,
}

impl<'a> NumberForm<'a> {
    #[must_use]
    pub fn new(label: &'a str, value: i64) -> Self {
        Self {
            label,
            value,
            message: None,
            focused: false,
            on_change: None,
        }
    }

    /// Props taken from a field snapshot.
    #[must_use]
    pub fn from_snapshot(label: &'a str, snapshot: &'a FieldSnapshot) -> Self {
        Self::new(label, snapshot.value).message(snapshot.message.as_deref())
    }

    #[must_use]
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Receives the candidate raw text for every edit.
    #[must_use]
    pub fn on_change(mut self, callback: &'a dyn Fn(&str)) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// The controlled text: always the committed value.
    #[must_use]
    pub fn text(&self) -> String {
        self.value.to_string()
    }

    /// Forward `edit` to `on_change`. Returns `false` if there is no
    /// callback to forward to.
    pub fn handle_edit(&self, edit: &FieldEdit) -> bool {
        let Some(on_change) = self.on_change else {
            return false;
        };
        on_change(&edit.apply_numeric(&self.text()));
        true
    }

    /// Rows this form occupies.
    #[must_use]
    pub fn height(&self) -> u16 {
        1 + u16::from(self.message.is_some())
    }

    fn prefix(&self) -> String {
        format!("{}{}: ", focus_marker(self.focused), self.label)
    }

    /// Column just past the value text, where a text cursor belongs.
    #[must_use]
    pub fn cursor_x(&self, area: Rect) -> u16 {
        let width = self.prefix().width() + self.text().width();
        area.x
            .saturating_add(u16::try_from(width).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1))
    }
}

impl Widget for NumberForm<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if let Some(row) = area.row(0) {
            draw_line(buf, row, &format!("{}{}", self.prefix(), self.value));
        }
        if let (Some(message), Some(row)) = (self.message, area.row(1)) {
            draw_line(buf, row, &format!("  {message}"));
        }
    }
}
