#![forbid(unsafe_code)]

//! Demo run modes.

use std::io::{self, BufRead, Write};

use formbind_core::terminal_session::{SessionOptions, TerminalSession};
use formbind_render::buffer::Buffer;
use formbind_widgets::bounded::{BoundedNumberField, FieldSnapshot, Outcome};
use formbind_widgets::{EventResult, Messages, Parent, Widget};
use serde::Serialize;

use crate::config::DemoConfig;

/// Run the full-screen form until the user quits.
///
/// # Errors
///
/// Returns any terminal I/O error. The terminal is restored either way.
pub fn run_interactive(config: &DemoConfig) -> io::Result<()> {
    let mut parent = build_parent(config);
    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        bracketed_paste: true,
        ..Default::default()
    })?;
    tracing::info!(range = %config.range, locale = %config.locale, "interactive session started");

    loop {
        if parent.take_dirty() {
            draw(&session, &parent)?;
        }
        let event = session.read_event()?;
        if parent.handle_event(&event) == EventResult::Quit {
            break;
        }
    }

    tracing::info!(
        text = %parent.text(),
        value = parent.number().value(),
        "interactive session finished"
    );
    Ok(())
}

fn build_parent(config: &DemoConfig) -> Parent {
    Parent::new(config.range, Messages::for_locale(&config.locale))
}

fn draw(session: &TerminalSession, parent: &Parent) -> io::Result<()> {
    let (width, height) = session.size()?;
    let mut buf = Buffer::new(width, height);
    parent.render(buf.area(), &mut buf);
    session.present(&buf.to_lines())?;
    match parent.cursor_position(buf.area()) {
        Some((x, y)) => session.show_cursor_at(x, y),
        None => session.hide_cursor(),
    }
}

/// One JSON line of headless output.
#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    accepted: bool,
    #[serde(flatten)]
    field: &'a FieldSnapshot,
}

/// Feed each line of `input` to a bounded field and report on `out`.
/// Lines that are not valid UTF-8 are decoded lossily.
///
/// One status line is written up front, then one per input line:
///
/// ```text
/// value=0
/// accepted value=3
/// rejected value=3 message="9 is not a valid number!"
/// ```
///
/// With `config.json`, the status line is skipped and each input produces
/// one object: `{"input":"9","accepted":false,"value":3,"message":..,"range":..}`.
///
/// # Errors
///
/// Returns any error reading `input` or writing `out`.
pub fn run_headless<R: BufRead, W: Write>(
    config: &DemoConfig,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    let field =
        BoundedNumberField::with_messages(config.range, Messages::for_locale(&config.locale));
    tracing::info!(range = %config.range, json = config.json, "headless session started");
    if !config.json {
        writeln!(out, "value={}", field.value())?;
    }

    let mut attempts = 0u64;
    let mut raw = Vec::new();
    while input.read_until(b'\n', &mut raw)? > 0 {
        let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        // Undecodable bytes are just another unparseable attempt.
        let line = String::from_utf8_lossy(bytes).into_owned();
        raw.clear();
        attempts += 1;
        let outcome = field.attempt_update(&line);
        if config.json {
            let snapshot = field.snapshot();
            let report = Report {
                input: &line,
                accepted: outcome.is_accepted(),
                field: &snapshot,
            };
            serde_json::to_writer(&mut out, &report)?;
            writeln!(out)?;
            continue;
        }
        match outcome {
            Outcome::Accepted(n) => writeln!(out, "accepted value={n}")?,
            Outcome::Rejected(message) => {
                writeln!(out, "rejected value={} message={message:?}", field.value())?;
            }
        }
    }
    out.flush()?;

    tracing::info!(attempts, value = field.value(), "headless session finished");
    Ok(())
}
