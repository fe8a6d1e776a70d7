#![forbid(unsafe_code)]

//! User-facing text for the form components.
//!
//! All strings go through a [`StringCatalog`] keyed by the constants in
//! [`keys`]. English is built in and is the last fallback, so every key
//! always resolves.

use std::rc::Rc;

use formbind_i18n::{LocaleStrings, StringCatalog};
use formbind_runtime::LocaleContext;

pub mod keys {
    pub const TITLE: &str = "form.title";
    pub const HINT: &str = "form.hint";
    pub const TEXT_LABEL: &str = "text.label";
    pub const DISPLAY_DATA: &str = "display.typed";
    pub const NUMBER_LABEL: &str = "number.label";
    pub const NUMBER_INVALID: &str = "number.invalid";
}

const EN: &[(&str, &str)] = &[
    (keys::TITLE, "Controlled components"),
    (keys::HINT, "Tab: switch field  Up/Down: step  Esc: quit"),
    (keys::TEXT_LABEL, "Name"),
    (keys::DISPLAY_DATA, "You typed: {text}"),
    (keys::NUMBER_LABEL, "Number ({min}-{max})"),
    (keys::NUMBER_INVALID, "{value} is not a valid number!"),
];

const RU: &[(&str, &str)] = &[
    (keys::TITLE, "Управляемые компоненты"),
    (keys::HINT, "Tab: поле  Up/Down: шаг  Esc: выход"),
    (keys::TEXT_LABEL, "Имя"),
    (keys::DISPLAY_DATA, "Вы ввели: {text}"),
    (keys::NUMBER_LABEL, "Число ({min}-{max})"),
    (keys::NUMBER_INVALID, "{value} — недопустимое число!"),
];

/// The catalog shipped with the widgets: `en` and `ru`, falling back to `en`.
#[must_use]
pub fn builtin_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();
    catalog.add_locale("en", EN.iter().copied().collect::<LocaleStrings>());
    catalog.add_locale("ru", RU.iter().copied().collect::<LocaleStrings>());
    catalog.set_fallback_chain(vec!["en".into()]);
    catalog
}

/// Catalog plus active locale, shared by every component of one tree.
#[derive(Clone, Debug)]
pub struct Messages {
    catalog: Rc<StringCatalog>,
    locale: LocaleContext,
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(builtin_catalog(), LocaleContext::default())
    }
}

impl Messages {
    #[must_use]
    pub fn new(catalog: StringCatalog, locale: LocaleContext) -> Self {
        Self {
            catalog: Rc::new(catalog),
            locale,
        }
    }

    /// Built-in catalog in the given locale.
    #[must_use]
    pub fn for_locale(locale: &str) -> Self {
        Self::new(builtin_catalog(), LocaleContext::new(locale))
    }

    #[must_use]
    pub fn locale(&self) -> &LocaleContext {
        &self.locale
    }

    /// Resolve `key` with `args`. Keys missing from every locale render
    /// as the key itself.
    #[must_use]
    pub fn text(&self, key: &str, args: &[(&str, &str)]) -> String {
        let locale = self.locale.current_locale();
        self.catalog.format(&locale, key, args).unwrap_or_else(|| {
            tracing::warn!(key, locale = %locale, "missing catalog entry");
            key.to_owned()
        })
    }

    /// The rejection message for a field, embedding the rejected value.
    #[must_use]
    pub fn invalid_number(&self, value: &str) -> String {
        self.text(keys::NUMBER_INVALID, &[("value", value)])
    }
}
