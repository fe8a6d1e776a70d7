#![forbid(unsafe_code)]

//! Test harness for formbind components.
//!
//! - [`render_to_text`] renders any widget into a fresh buffer and returns
//!   its trimmed text; [`buffer_to_text`] does the same for an existing
//!   buffer. Compare with [`assert_buffer_text!`].
//! - [`KeyScript`] turns a compact string like `"ab<Tab>9<Down>"` into
//!   input events, and [`drive`] feeds them to a [`Parent`].
//! - [`init_test_tracing`] installs a test-writer subscriber once.

use std::sync::Once;

use formbind_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use formbind_render::buffer::Buffer;
use formbind_widgets::{EventResult, Parent, Widget};

/// A buffer's rows with trailing whitespace trimmed, joined by `\n`.
#[must_use]
pub fn buffer_to_text(buf: &Buffer) -> String {
    buf.to_text()
}

/// Render `widget` into a `width` x `height` buffer.
pub fn render_to_buffer<W: Widget + ?Sized>(widget: &W, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    widget.render(buf.area(), &mut buf);
    buf
}

/// Render `widget` and return the buffer's trimmed text.
pub fn render_to_text<W: Widget + ?Sized>(widget: &W, width: u16, height: u16) -> String {
    buffer_to_text(&render_to_buffer(widget, width, height))
}

/// Assert that a buffer's trimmed text equals the given lines.
///
/// Trailing empty rows may be omitted from the expected lines.
///
/// ```
/// use formbind_harness::assert_buffer_text;
/// use formbind_render::buffer::Buffer;
///
/// let mut buf = Buffer::new(6, 2);
/// buf.set_string(0, 0, "hi", 6);
/// assert_buffer_text!(buf, ["hi"]);
/// ```
#[macro_export]
macro_rules! assert_buffer_text {
    ($buf:expr, [$($line:expr),* $(,)?]) => {{
        let actual = $crate::buffer_to_text(&$buf);
        let expected: ::std::vec::Vec<&str> = ::std::vec![$($line),*];
        let actual_lines: ::std::vec::Vec<&str> = actual.split('\n').collect();
        let trimmed = {
            let mut end = actual_lines.len();
            while end > expected.len() && actual_lines[end - 1].is_empty() {
                end -= 1;
            }
            &actual_lines[..end]
        };
        if trimmed != expected.as_slice() {
            panic!(
                "buffer text mismatch\n--- expected ---\n{}\n--- actual ---\n{}\n",
                expected.join("\n"),
                actual
            );
        }
    }};
}

/// A sequence of input events written as text.
///
/// Plain characters become key presses. Named keys go in angle brackets:
/// `<Tab>`, `<BackTab>`, `<Enter>`, `<Esc>`, `<Bs>`, `<Up>`, `<Down>`,
/// `<Left>`, `<Right>`, `<C-x>` (Ctrl + x). `<<` is a literal `<`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScript {
    events: Vec<Event>,
}

/// A script that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub token: String,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key token <{}>", self.token)
    }
}

impl std::error::Error for ScriptError {}

impl KeyScript {
    /// # Errors
    ///
    /// Returns [`ScriptError`] for an unknown or unterminated `<...>` token.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut events = Vec::new();
        let mut chars = script.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '<' {
                events.push(Event::Key(KeyEvent::new(KeyCode::Char(c))));
                continue;
            }
            if chars.peek() == Some(&'<') {
                chars.next();
                events.push(Event::Key(KeyEvent::new(KeyCode::Char('<'))));
                continue;
            }
            let mut token = String::new();
            let mut closed = false;
            for t in chars.by_ref() {
                if t == '>' {
                    closed = true;
                    break;
                }
                token.push(t);
            }
            if !closed {
                return Err(ScriptError { token });
            }
            events.push(Event::Key(parse_token(&token)?));
        }
        Ok(Self { events })
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

fn parse_token(token: &str) -> Result<KeyEvent, ScriptError> {
    let code = match token {
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Escape,
        "Bs" => KeyCode::Backspace,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        _ => {
            let mut rest = token.strip_prefix("C-").unwrap_or_default().chars();
            return match (rest.next(), rest.next()) {
                (Some(c), None) => {
                    Ok(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
                }
                _ => Err(ScriptError {
                    token: token.to_owned(),
                }),
            };
        }
    };
    Ok(KeyEvent::new(code))
}

/// Feed every event in `script` to `parent`, stopping after a quit.
///
/// # Panics
///
/// Panics if `script` does not parse; scripts are test fixtures.
pub fn drive(parent: &mut Parent, script: &str) -> Vec<EventResult> {
    let script = KeyScript::parse(script).unwrap_or_else(|e| panic!("bad key script: {e}"));
    let mut results = Vec::with_capacity(script.events().len());
    for event in script.events() {
        let result = parent.handle_event(event);
        tracing::trace!(?event, ?result, "scripted event");
        results.push(result);
        if result == EventResult::Quit {
            break;
        }
    }
    results
}

static TRACING: Once = Once::new();

/// Route `tracing` output to the test writer. Safe to call repeatedly.
///
/// The filter comes from `RUST_LOG`, defaulting to `debug`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
