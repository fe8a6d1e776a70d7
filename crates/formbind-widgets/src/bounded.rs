#![forbid(unsafe_code)]

//! Bounded numeric field binding.
//!
//! [`BoundedNumberField`] owns two state cells: the committed integer and
//! an optional validation message. Raw text from the input side goes
//! through [`BoundedNumberField::attempt_update`], which either commits a
//! new value and clears the message, or leaves the value alone and sets the
//! message. Rejection is an ordinary outcome, not an error.
//!
//! # State machine
//!
//! ```text
//!            accepted                 rejected
//!   ┌────────────────────┐   ┌────────────────────┐
//!   ▼                    │   │                    ▼
//! Valid ───rejected───▶ Invalid ───accepted───▶ Valid
//! (message: None)      (message: Some(..))
//! ```
//!
//! # Invariants
//!
//! 1. `range().contains(value())` holds at all times.
//! 2. `message()` is `Some` exactly when the most recent attempt was
//!    rejected.
//! 3. An accepted attempt never sets the message; a rejected attempt never
//!    changes the value.
//! 4. Both cells are updated inside one [`BatchScope`], and subscribers
//!    registered through [`BoundedNumberField::subscribe`] run exactly once
//!    per attempt, after both cells hold their new values and before
//!    `attempt_update` returns.

use std::fmt;

use formbind_runtime::reactive::{BatchScope, Binding, Observable, Subscription};

use crate::edit::FieldEdit;
use crate::messages::Messages;

/// Closed integer range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NumericRange {
    min: i64,
    max: i64,
}

impl NumericRange {
    /// The range used when nothing else is configured: `[0, 5]`.
    pub const DEFAULT: Self = Self { min: 0, max: 5 };

    /// # Errors
    ///
    /// Returns [`RangeError`] if `min > max`.
    pub const fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> i64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Inclusive on both ends.
    #[must_use]
    pub const fn contains(&self, n: i64) -> bool {
        self.min <= n && n <= self.max
    }

    /// Starting value for a new field: zero, clamped into the range.
    #[must_use]
    pub const fn initial_value(&self) -> i64 {
        if 0 < self.min {
            self.min
        } else if 0 > self.max {
            self.max
        } else {
            0
        }
    }
}

impl Default for NumericRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A range whose lower bound exceeds its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid range: min {} is greater than max {}",
            self.min, self.max
        )
    }
}

impl std::error::Error for RangeError {}

/// What leading-integer parsing found in a piece of raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInput<'a> {
    /// A sign and digits that fit in an `i64`.
    Number(i64),
    /// A sign and digits too large for an `i64`; the token as written.
    Overflow(&'a str),
    /// No digits after optional whitespace and sign.
    NotANumber,
}

/// Parse the leading integer of `raw`, ignoring anything after it.
///
/// Leading whitespace is skipped and one `+` or `-` is accepted. Parsing
/// stops at the first non-digit, so `"3.7"` is 3 and `"4abc"` is 4.
///
/// ```
/// use formbind_widgets::bounded::{ParsedInput, parse_leading_int};
///
/// assert_eq!(parse_leading_int("  -12px"), ParsedInput::Number(-12));
/// assert_eq!(parse_leading_int("abc"), ParsedInput::NotANumber);
/// ```
#[must_use]
pub fn parse_leading_int(raw: &str) -> ParsedInput<'_> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digit_len = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digit_len == 0 {
        return ParsedInput::NotANumber;
    }
    let token = &trimmed[..sign_len + digit_len];
    match token.parse::<i64>() {
        Ok(n) => ParsedInput::Number(n),
        Err(_) => ParsedInput::Overflow(token),
    }
}

/// The textual form of a rejected input, as embedded in the message.
///
/// Numbers render in canonical decimal (`"+09"` → `"9"`), oversized tokens
/// as written, and text with no leading integer verbatim. Blank text has no
/// literal to show and renders as `NaN`.
fn rejected_literal(raw: &str, parsed: ParsedInput<'_>) -> String {
    match parsed {
        ParsedInput::Number(n) => n.to_string(),
        ParsedInput::Overflow(token) => token.to_owned(),
        ParsedInput::NotANumber if raw.trim().is_empty() => "NaN".to_owned(),
        ParsedInput::NotANumber => raw.trim().to_owned(),
    }
}

/// Result of one [`BoundedNumberField::attempt_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value was committed.
    Accepted(i64),
    /// The value was kept; the message explains why.
    Rejected(String),
}

impl Outcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The rejection message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(m) => Some(m),
        }
    }
}

/// Whether the last attempt was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldState {
    #[default]
    Valid,
    Invalid,
}

/// Immutable view of a field, passed to renderers and subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSnapshot {
    pub value: i64,
    pub message: Option<String>,
    pub range: NumericRange,
}

impl FieldSnapshot {
    #[must_use]
    pub fn state(&self) -> FieldState {
        if self.message.is_some() {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }
}

/// An integer state cell gated by a closed range, plus its validation
/// message.
///
/// Cloning shares the underlying cells.
#[derive(Clone, Debug)]
pub struct BoundedNumberField {
    value: Observable<i64>,
    message: Observable<Option<String>>,
    /// Bumped once per attempt so refreshes fire even when neither cell
    /// changes (e.g. the same rejection twice).
    attempts: Observable<u64>,
    range: NumericRange,
    messages: Messages,
}

impl Default for BoundedNumberField {
    fn default() -> Self {
        Self::new(NumericRange::DEFAULT)
    }
}

impl BoundedNumberField {
    /// A field in the Valid state at [`NumericRange::initial_value`].
    #[must_use]
    pub fn new(range: NumericRange) -> Self {
        Self::with_messages(range, Messages::default())
    }

    #[must_use]
    pub fn with_messages(range: NumericRange, messages: Messages) -> Self {
        Self {
            value: Observable::new(range.initial_value()),
            message: Observable::new(None),
            attempts: Observable::new(0),
            range,
            messages,
        }
    }

    /// Validate `raw` and commit it or record why not.
    pub fn attempt_update(&self, raw: &str) -> Outcome {
        let parsed = parse_leading_int(raw);
        let _batch = BatchScope::new();
        self.attempts.update(|n| *n = n.wrapping_add(1));

        match parsed {
            ParsedInput::Number(n) if self.range.contains(n) => {
                self.value.set(n);
                self.message.set(None);
                tracing::debug!(raw, value = n, "input accepted");
                Outcome::Accepted(n)
            }
            rejected => {
                let literal = rejected_literal(raw, rejected);
                let message = self.messages.invalid_number(&literal);
                self.message.set(Some(message.clone()));
                tracing::debug!(
                    raw,
                    kept = self.value.get(),
                    range = %self.range,
                    "input rejected"
                );
                Outcome::Rejected(message)
            }
        }
    }

    /// Apply a user edit to the field's displayed text and attempt the
    /// result.
    pub fn apply_edit(&self, edit: &FieldEdit) -> Outcome {
        let candidate = edit.apply_numeric(&self.display_text());
        self.attempt_update(&candidate)
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value.get()
    }

    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.message.get()
    }

    #[must_use]
    pub fn state(&self) -> FieldState {
        if self.message.with(Option::is_some) {
            FieldState::Invalid
        } else {
            FieldState::Valid
        }
    }

    #[must_use]
    pub const fn range(&self) -> NumericRange {
        self.range
    }

    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// The text a controlled input shows: always the committed value.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.value.get().to_string()
    }

    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            value: self.value.get(),
            message: self.message.get(),
            range: self.range,
        }
    }

    #[must_use]
    pub fn value_binding(&self) -> Binding<i64> {
        Binding::of(&self.value)
    }

    #[must_use]
    pub fn message_binding(&self) -> Binding<Option<String>> {
        Binding::of(&self.message)
    }

    /// Both cells as one read-only binding.
    #[must_use]
    pub fn snapshot_binding(&self) -> Binding<FieldSnapshot> {
        let range = self.range;
        Binding::combine(&self.value, &self.message, move |value, message| {
            FieldSnapshot {
                value: *value,
                message: message.clone(),
                range,
            }
        })
    }

    /// Call `callback` once after every attempt, with the resulting state.
    #[must_use = "dropping the Subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&FieldSnapshot) + 'static) -> Subscription {
        let field = self.clone();
        self.attempts.subscribe(move |_| callback(&field.snapshot()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[test]
    fn initial_state_is_valid_zero() {
        let field = BoundedNumberField::default();
        assert_eq!(field.value(), 0);
        assert_eq!(field.message(), None);
        assert_eq!(field.state(), FieldState::Valid);
        assert_eq!(field.display_text(), "0");
    }

    #[test]
    fn scenario_accept_reject_accept() {
        let field = BoundedNumberField::default();

        assert_eq!(field.attempt_update("3"), Outcome::Accepted(3));
        assert_eq!(field.value(), 3);
        assert_eq!(field.message(), None);

        let outcome = field.attempt_update("9");
        assert_eq!(outcome, Outcome::Rejected("9 is not a valid number!".into()));
        assert_eq!(field.value(), 3);
        assert_eq!(field.message().as_deref(), Some("9 is not a valid number!"));
        assert_eq!(field.state(), FieldState::Invalid);

        assert_eq!(field.attempt_update("2"), Outcome::Accepted(2));
        assert_eq!(field.value(), 2);
        assert_eq!(field.message(), None);
        assert_eq!(field.state(), FieldState::Valid);
    }

    #[test]
    fn boundaries() {
        let field = BoundedNumberField::default();
        assert!(field.attempt_update("0").is_accepted());
        assert!(field.attempt_update("5").is_accepted());
        assert!(!field.attempt_update("-1").is_accepted());
        assert!(!field.attempt_update("6").is_accepted());
        assert_eq!(field.value(), 5);
    }

    #[test]
    fn non_numeric_rejected_with_literal() {
        let field = BoundedNumberField::default();
        field.attempt_update("4");
        let outcome = field.attempt_update("abc");
        assert_eq!(outcome.message(), Some("abc is not a valid number!"));
        assert_eq!(field.value(), 4);
    }

    #[test]
    fn blank_input_reports_nan() {
        let field = BoundedNumberField::default();
        assert_eq!(
            field.attempt_update("  ").message(),
            Some("NaN is not a valid number!")
        );
    }

    #[test]
    fn trailing_garbage_ignored() {
        let field = BoundedNumberField::default();
        assert_eq!(field.attempt_update("3.9"), Outcome::Accepted(3));
        assert_eq!(field.attempt_update(" 4 apples"), Outcome::Accepted(4));
        assert_eq!(field.attempt_update("+2"), Outcome::Accepted(2));
    }

    #[test]
    fn rejected_value_is_canonical_decimal() {
        let field = BoundedNumberField::default();
        assert_eq!(
            field.attempt_update("+09xyz").message(),
            Some("9 is not a valid number!")
        );
    }

    #[test]
    fn overflow_is_rejected_with_token() {
        let field = BoundedNumberField::default();
        let outcome = field.attempt_update("99999999999999999999999 ");
        assert_eq!(
            outcome.message(),
            Some("99999999999999999999999 is not a valid number!")
        );
        assert_eq!(field.value(), 0);
    }

    #[test]
    fn parse_leading_int_cases() {
        assert_eq!(parse_leading_int("42"), ParsedInput::Number(42));
        assert_eq!(parse_leading_int("-0"), ParsedInput::Number(0));
        assert_eq!(parse_leading_int("\t7x"), ParsedInput::Number(7));
        assert_eq!(parse_leading_int("007"), ParsedInput::Number(7));
        assert_eq!(parse_leading_int("-"), ParsedInput::NotANumber);
        assert_eq!(parse_leading_int("+-1"), ParsedInput::NotANumber);
        assert_eq!(parse_leading_int(".5"), ParsedInput::NotANumber);
        assert_eq!(parse_leading_int(""), ParsedInput::NotANumber);
        assert_eq!(parse_leading_int("٣"), ParsedInput::NotANumber);
        assert_eq!(
            parse_leading_int("-9223372036854775809"),
            ParsedInput::Overflow("-9223372036854775809")
        );
        assert_eq!(
            parse_leading_int("-9223372036854775808"),
            ParsedInput::Number(i64::MIN)
        );
    }

    #[test]
    fn range_validation() {
        assert_eq!(
            NumericRange::new(3, 1),
            Err(RangeError { min: 3, max: 1 })
        );
        assert_eq!(
            RangeError { min: 3, max: 1 }.to_string(),
            "invalid range: min 3 is greater than max 1"
        );
        let single = NumericRange::new(2, 2).unwrap();
        assert!(single.contains(2));
        assert!(!single.contains(1));
    }

    #[test]
    fn initial_value_clamps_zero_into_range() {
        assert_eq!(NumericRange::new(3, 8).unwrap().initial_value(), 3);
        assert_eq!(NumericRange::new(-8, -3).unwrap().initial_value(), -3);
        assert_eq!(NumericRange::new(-2, 2).unwrap().initial_value(), 0);
        let field = BoundedNumberField::new(NumericRange::new(10, 20).unwrap());
        assert_eq!(field.value(), 10);
    }

    #[test]
    fn custom_range_bounds() {
        let field = BoundedNumberField::new(NumericRange::new(-3, 3).unwrap());
        assert!(field.attempt_update("-3").is_accepted());
        assert!(!field.attempt_update("-4").is_accepted());
        assert_eq!(field.value(), -3);
    }

    #[test]
    fn subscriber_runs_once_per_attempt_with_final_state() {
        let field = BoundedNumberField::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = field.subscribe(move |snap| s.borrow_mut().push(snap.clone()));

        field.attempt_update("3");
        field.attempt_update("9");
        field.attempt_update("9");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].value, 3);
        assert_eq!(seen[0].state(), FieldState::Valid);
        assert_eq!(seen[1].value, 3);
        assert_eq!(seen[1].message.as_deref(), Some("9 is not a valid number!"));
        assert_eq!(seen[2], seen[1]);
    }

    #[test]
    fn value_observers_never_see_stale_message() {
        let field = BoundedNumberField::default();
        field.attempt_update("9");
        let reader = field.clone();
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        let _sub = field
            .value
            .subscribe(move |v| *s.borrow_mut() = Some((*v, reader.message())));

        field.attempt_update("4");
        assert_eq!(*seen.borrow(), Some((4, None)));
    }

    #[test]
    fn bindings_reflect_state() {
        let field = BoundedNumberField::default();
        let value = field.value_binding();
        let message = field.message_binding();
        let snapshot = field.snapshot_binding();

        field.attempt_update("7");
        assert_eq!(value.get(), 0);
        assert!(message.get().is_some());
        assert_eq!(snapshot.get().state(), FieldState::Invalid);

        field.attempt_update("1");
        assert_eq!(value.get(), 1);
        assert_eq!(snapshot.get(), field.snapshot());
    }

    #[test]
    fn apply_edit_steps_and_rejects_at_bound() {
        let field = BoundedNumberField::default();
        field.attempt_update("4");
        assert_eq!(field.apply_edit(&FieldEdit::Increment), Outcome::Accepted(5));
        assert_eq!(
            field.apply_edit(&FieldEdit::Increment).message(),
            Some("6 is not a valid number!")
        );
        assert_eq!(field.apply_edit(&FieldEdit::Decrement), Outcome::Accepted(4));
    }

    #[test]
    fn apply_edit_insert_appends_to_display_text() {
        let field = BoundedNumberField::default();
        field.attempt_update("1");
        // "1" + "2" = "12", out of range.
        assert!(!field.apply_edit(&FieldEdit::Insert('2')).is_accepted());
        assert_eq!(field.value(), 1);
        // Replacing the text outright.
        assert_eq!(
            field.apply_edit(&FieldEdit::Replace("3".into())),
            Outcome::Accepted(3)
        );
    }

    #[test]
    fn localized_rejection_message() {
        let field = BoundedNumberField::with_messages(
            NumericRange::DEFAULT,
            Messages::for_locale("ru"),
        );
        assert_eq!(
            field.attempt_update("8").message(),
            Some("8 — недопустимое число!")
        );
    }

    #[test]
    #[traced_test]
    fn logs_transitions() {
        let field = BoundedNumberField::default();
        field.attempt_update("2");
        field.attempt_update("x");
        assert!(logs_contain("input accepted"));
        assert!(logs_contain("input rejected"));
    }

    proptest! {
        #[test]
        fn in_range_always_accepted(n in 0i64..=5) {
            let field = BoundedNumberField::default();
            prop_assert_eq!(field.attempt_update(&n.to_string()), Outcome::Accepted(n));
            prop_assert_eq!(field.value(), n);
            prop_assert_eq!(field.message(), None);
        }

        #[test]
        fn out_of_range_always_rejected(
            start in 0i64..=5,
            n in prop_oneof![i64::MIN..0i64, 6i64..=i64::MAX],
        ) {
            let field = BoundedNumberField::default();
            field.attempt_update(&start.to_string());
            let outcome = field.attempt_update(&n.to_string());
            prop_assert!(!outcome.is_accepted());
            prop_assert_eq!(field.value(), start);
            let message = field.message().unwrap_or_default();
            prop_assert!(message.contains(&n.to_string()));
            prop_assert_eq!(outcome.message(), Some(message.as_str()));
        }

        #[test]
        fn repeated_in_range_is_idempotent(n in 0i64..=5) {
            let field = BoundedNumberField::default();
            field.attempt_update("9");
            field.attempt_update(&n.to_string());
            field.attempt_update(&n.to_string());
            prop_assert_eq!(field.value(), n);
            prop_assert_eq!(field.message(), None);
        }

        #[test]
        fn value_always_in_range(inputs in proptest::collection::vec(".{0,6}", 0..20)) {
            let field = BoundedNumberField::default();
            for raw in &inputs {
                let outcome = field.attempt_update(raw);
                prop_assert!(field.range().contains(field.value()));
                prop_assert_eq!(outcome.is_accepted(), field.message().is_none());
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_serializes() {
        let field = BoundedNumberField::default();
        field.attempt_update("9");
        let json = serde_json::to_value(field.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": 0,
                "message": "9 is not a valid number!",
                "range": { "min": 0, "max": 5 },
            })
        );
        assert_eq!(serde_json::to_value(FieldState::Invalid).unwrap(), "invalid");
    }
}
