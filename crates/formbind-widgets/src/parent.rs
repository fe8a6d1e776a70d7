#![forbid(unsafe_code)]

//! The owning component.
//!
//! `Parent` holds every piece of state in the tree: the free-text cell and
//! the bounded numeric field. On each render it builds the presentational
//! children from immutable snapshots, and on each edit it rebuilds the
//! focused child with a callback that writes back into its own state. The
//! children never hold state across calls.
//!
//! Layout inside the bordered panel:
//!
//! ```text
//! ┌Title─────────────────┐
//! │ > Name: text         │  Form
//! │   You typed: text    │  DisplayData
//! │                      │
//! │   Number (0-5): 3    │  NumberForm
//! │   9 is not a valid.. │  (message row, when rejected)
//! └──────────────────────┘
//!  hint line
//! ```

use std::cell::Cell;
use std::rc::Rc;

use formbind_core::event::{Event, KeyCode};
use formbind_core::geometry::Rect;
use formbind_render::buffer::Buffer;
use formbind_runtime::reactive::{Observable, Subscriptions};

use crate::bounded::{BoundedNumberField, NumericRange};
use crate::display_data::DisplayData;
use crate::edit::FieldEdit;
use crate::form::Form;
use crate::messages::{Messages, keys};
use crate::number_form::NumberForm;
use crate::panel::Panel;
use crate::{Widget, draw_line};

/// Which child receives edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    Number,
}

impl Focus {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Text => Self::Number,
            Self::Number => Self::Text,
        }
    }

    /// With two fields, previous and next coincide.
    #[must_use]
    pub const fn prev(self) -> Self {
        self.next()
    }
}

/// What the parent did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not an event this tree handles.
    Ignored,
    /// Handled; state may have changed.
    Consumed,
    /// The user asked to leave.
    Quit,
}

/// Screen regions for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLayout {
    pub panel: Rect,
    pub form: Rect,
    pub display: Rect,
    pub number: Rect,
    pub hint: Option<Rect>,
}

pub struct Parent {
    text: Observable<String>,
    number: BoundedNumberField,
    focus: Focus,
    messages: Messages,
    dirty: Rc<Cell<bool>>,
    _subscriptions: Subscriptions,
}

impl Default for Parent {
    fn default() -> Self {
        Self::new(NumericRange::DEFAULT, Messages::default())
    }
}

impl std::fmt::Debug for Parent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parent")
            .field("text", &self.text.get())
            .field("number", &self.number.snapshot())
            .field("focus", &self.focus)
            .finish()
    }
}

impl Parent {
    #[must_use]
    pub fn new(range: NumericRange, messages: Messages) -> Self {
        let text = Observable::new(String::new());
        let number = BoundedNumberField::with_messages(range, messages.clone());
        let dirty = Rc::new(Cell::new(true));

        let mut subscriptions = Subscriptions::new();
        let mark = Rc::clone(&dirty);
        subscriptions.watch(&text, move |_| mark.set(true));
        let mark = Rc::clone(&dirty);
        subscriptions.keep(number.subscribe(move |_| mark.set(true)));
        let mark = Rc::clone(&dirty);
        subscriptions.keep(messages.locale().subscribe(move |_| mark.set(true)));

        Self {
            text,
            number,
            focus: Focus::default(),
            messages,
            dirty,
            _subscriptions: subscriptions,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.text.get()
    }

    #[must_use]
    pub fn number(&self) -> &BoundedNumberField {
        &self.number
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            tracing::trace!(from = ?self.focus, to = ?focus, "focus changed");
            self.focus = focus;
            self.dirty.set(true);
        }
    }

    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Whether anything changed since the last call. Clears the flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Key(key) if !key.is_actionable() => EventResult::Ignored,
            Event::Key(key) if key.code == KeyCode::Escape || key.is_ctrl('c') => {
                EventResult::Quit
            }
            Event::Key(key) if key.code == KeyCode::Tab => {
                self.set_focus(self.focus.next());
                EventResult::Consumed
            }
            Event::Key(key) if key.code == KeyCode::BackTab => {
                self.set_focus(self.focus.prev());
                EventResult::Consumed
            }
            Event::Resize { .. } => {
                self.dirty.set(true);
                EventResult::Consumed
            }
            _ => match FieldEdit::from_event(event) {
                Some(edit) => {
                    self.dispatch_edit(&edit);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
        }
    }

    /// Route `edit` to the focused child, wired back to this parent's state.
    pub fn dispatch_edit(&self, edit: &FieldEdit) {
        match self.focus {
            Focus::Text => {
                let label = self.messages.text(keys::TEXT_LABEL, &[]);
                let current = self.text.get();
                let set_text = |next: String| {
                    self.text.set(next);
                };
                Form::new(&label, &current)
                    .on_change(&set_text)
                    .handle_edit(edit);
            }
            Focus::Number => {
                let label = self.number_label();
                let snapshot = self.number.snapshot();
                let attempt = |raw: &str| {
                    self.number.attempt_update(raw);
                };
                NumberForm::from_snapshot(&label, &snapshot)
                    .on_change(&attempt)
                    .handle_edit(edit);
            }
        }
    }

    fn number_label(&self) -> String {
        let range = self.number.range();
        let (min, max) = (range.min().to_string(), range.max().to_string());
        self.messages.text(
            keys::NUMBER_LABEL,
            &[("min", min.as_str()), ("max", max.as_str())],
        )
    }

    /// Regions used by [`render`](Widget::render) for `area`.
    #[must_use]
    pub fn layout(&self, area: Rect) -> ParentLayout {
        let (panel, hint) = if area.height >= 2 {
            let (panel, hint) = area.split_top(area.height - 1);
            (panel, Some(hint))
        } else {
            (area, None)
        };
        let inner = Panel::new(()).padding((0, 1)).inner(panel);
        let (form, rest) = inner.split_top(1);
        let (display, rest) = rest.split_top(1);
        let (_gap, number) = rest.split_top(1);
        ParentLayout {
            panel,
            form,
            display,
            number,
            hint,
        }
    }

    /// Where the terminal cursor belongs: the end of the focused field.
    #[must_use]
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let layout = self.layout(area);
        let row = match self.focus {
            Focus::Text => layout.form,
            Focus::Number => layout.number,
        };
        if row.is_empty() {
            return None;
        }
        let x = match self.focus {
            Focus::Text => {
                let label = self.messages.text(keys::TEXT_LABEL, &[]);
                let text = self.text.get();
                Form::new(&label, &text).focused(true).cursor_x(row)
            }
            Focus::Number => {
                let label = self.number_label();
                NumberForm::new(&label, self.number.value())
                    .focused(true)
                    .cursor_x(row)
            }
        };
        Some((x, row.y))
    }
}

impl Widget for Parent {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(area);
        let title = self.messages.text(keys::TITLE, &[]);
        Panel::new(())
            .title(&title)
            .padding((0, 1))
            .render(layout.panel, buf);

        let text = self.text.get();
        let text_label = self.messages.text(keys::TEXT_LABEL, &[]);
        Form::new(&text_label, &text)
            .focused(self.focus == Focus::Text)
            .render(layout.form, buf);

        let typed = self.messages.text(keys::DISPLAY_DATA, &[("text", text.as_str())]);
        DisplayData::new(&typed).render(layout.display, buf);

        let snapshot = self.number.snapshot();
        let number_label = self.number_label();
        NumberForm::from_snapshot(&number_label, &snapshot)
            .focused(self.focus == Focus::Number)
            .render(layout.number, buf);

        if let Some(hint) = layout.hint {
            let hint_text = self.messages.text(keys::HINT, &[]);
            draw_line(buf, hint, &format!(" {hint_text}"));
        }
    }
}
