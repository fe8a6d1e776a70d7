#![forbid(unsafe_code)]

//! Full-frame renders of the component tree.

use formbind_core::event::Event;
use formbind_harness::{
    assert_buffer_text, drive, init_test_tracing, render_to_buffer, render_to_text,
};
use formbind_widgets::{
    BoundedNumberField, DisplayData, EventResult, Focus, Form, NumberForm, NumericRange, Parent,
};

#[test]
fn parent_initial_frame() {
    init_test_tracing();
    let parent = Parent::default();
    let buf = render_to_buffer(&parent, 40, 8);
    assert_buffer_text!(
        buf,
        [
            "┌Controlled components─────────────────┐",
            "│ > Name:                              │",
            "│   You typed:                         │",
            "│                                      │",
            "│   Number (0-5): 0                    │",
            "│                                      │",
            "└──────────────────────────────────────┘",
            " Tab: switch field  Up/Down: step  Esc:",
        ]
    );
}

#[test]
fn parent_frame_after_rejected_number() {
    init_test_tracing();
    let mut parent = Parent::default();
    let results = drive(&mut parent, "Ada<Tab>3");
    assert!(results.iter().all(|r| *r == EventResult::Consumed));
    assert_eq!(parent.focus(), Focus::Number);
    assert!(!parent.number().attempt_update("9").is_accepted());

    let buf = render_to_buffer(&parent, 40, 8);
    assert_buffer_text!(
        buf,
        [
            "┌Controlled components─────────────────┐",
            "│   Name: Ada                          │",
            "│   You typed: Ada                     │",
            "│                                      │",
            "│ > Number (0-5): 3                    │",
            "│   9 is not a valid number!           │",
            "└──────────────────────────────────────┘",
            " Tab: switch field  Up/Down: step  Esc:",
        ]
    );
}

#[test]
fn accepted_update_clears_message_row() {
    let mut parent = Parent::default();
    drive(&mut parent, "<Tab>9");
    assert_eq!(
        parent.number().message().as_deref(),
        Some("9 is not a valid number!")
    );
    drive(&mut parent, "<Up>");
    assert_eq!(parent.number().value(), 1);
    let text = render_to_text(&parent, 40, 8);
    let rows: Vec<&str> = text.split('\n').collect();
    assert_eq!(rows[4], "│ > Number (0-5): 1                    │");
    assert_eq!(rows[5], "│                                      │");
}

#[test]
fn display_data_mirrors_text_cell() {
    let mut parent = Parent::default();
    drive(&mut parent, "hello<Bs><Bs>p");
    assert_eq!(parent.text(), "help");
    let text = render_to_text(&parent, 40, 8);
    assert!(text.contains("│ > Name: help"), "{text}");
    assert!(text.contains("│   You typed: help"), "{text}");
}

#[test]
fn tiny_area_does_not_panic() {
    let parent = Parent::default();
    for (w, h) in [(0, 0), (1, 1), (2, 2), (5, 3), (40, 1)] {
        let _ = render_to_text(&parent, w, h);
    }
}

#[test]
fn presentational_components_render_props() {
    let buf = render_to_buffer(&Form::new("Name", "Ada").focused(true), 20, 1);
    assert_buffer_text!(buf, ["> Name: Ada"]);

    let buf = render_to_buffer(&DisplayData::new("You typed: Ada"), 20, 1);
    assert_buffer_text!(buf, ["  You typed: Ada"]);

    let buf = render_to_buffer(
        &NumberForm::new("Number (0-5)", 4).message(Some("7 is not a valid number!")),
        30,
        2,
    );
    assert_buffer_text!(buf, ["  Number (0-5): 4", "  7 is not a valid number!"]);
}

#[test]
fn custom_range_appears_in_label() {
    let range = NumericRange::new(-3, 3).expect("valid range");
    let field = BoundedNumberField::new(range);
    assert_eq!(field.value(), 0);
    let parent = Parent::new(range, field.messages().clone());
    let text = render_to_text(&parent, 40, 8);
    assert!(text.contains("Number (-3-3): 0"), "{text}");
}

#[test]
fn pasted_escape_sequences_never_reach_the_frame() {
    let mut parent = Parent::default();
    parent.handle_event(&Event::Paste("a\nb\x1b[2Jc".into()));
    assert_eq!(parent.text(), "a b[2Jc");

    let buf = render_to_buffer(&parent, 40, 8);
    assert!(
        buf.to_lines()
            .iter()
            .all(|line| !line.chars().any(char::is_control)),
        "{:?}",
        buf.to_lines()
    );
    assert_eq!(buf.to_lines()[1], "│ > Name: a b[2Jc                      │");
    assert_eq!(buf.to_lines()[2], "│   You typed: a b[2Jc                 │");
}
