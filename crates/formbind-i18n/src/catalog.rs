#![forbid(unsafe_code)]

//! String catalog with locale fallback and interpolation.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: a lookup tries the requested locale,
//!    then its language subtag (`"en-US"` → `"en"`), then each chain entry
//!    once, returning `None` if nothing provides the key.
//!
//! 2. **Interpolation is single-pass**: `format()` replaces `{name}` tokens
//!    once; substituted values are never re-scanned.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | `None` / [`I18nError::MissingKey`] |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Bad interpolation arg | `{name}` but no `name` arg | Token left as-is |

use std::collections::HashMap;

/// Locale identifier (e.g., `"en"`, `"en-US"`, `"ru"`).
pub type Locale = String;

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A locale string was malformed.
    InvalidLocale(String),
    /// No locale in the chain provides the key.
    MissingKey { locale: String, key: String },
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocale(l) => write!(f, "invalid locale: {l}"),
            Self::MissingKey { locale, key } => {
                write!(f, "missing key '{key}' for locale '{locale}'")
            }
        }
    }
}

impl std::error::Error for I18nError {}

/// Check that `locale` looks like `xx` or `xx-YY` (letters and digits
/// separated by `-` or `_`).
pub fn validate_locale(locale: &str) -> Result<(), I18nError> {
    let ok = !locale.is_empty()
        && locale
            .split(['-', '_'])
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if ok {
        Ok(())
    } else {
        Err(I18nError::InvalidLocale(locale.to_owned()))
    }
}

/// Strings for a single locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

/// Central string catalog with locale fallback.
///
/// # Example
///
/// ```
/// use formbind_i18n::catalog::{LocaleStrings, StringCatalog};
///
/// let mut catalog = StringCatalog::new();
/// let mut en = LocaleStrings::new();
/// en.insert("invalid", "{value} is not a valid number!");
/// catalog.add_locale("en", en);
/// catalog.set_fallback_chain(vec!["en".into()]);
///
/// assert_eq!(
///     catalog.format("fr", "invalid", &[("value", "9")]),
///     Some("9 is not a valid number!".into())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<Locale, LocaleStrings>,
    fallback_chain: Vec<Locale>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the strings for a locale.
    pub fn add_locale(&mut self, locale: impl Into<Locale>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Locales tried, in order, after the requested one.
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain;
    }

    #[must_use]
    pub fn fallback_chain(&self) -> &[Locale] {
        &self.fallback_chain
    }

    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Loaded locales, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    fn candidates<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let language = locale.split(['-', '_']).next().filter(|l| *l != locale);
        std::iter::once(locale)
            .chain(language)
            .chain(self.fallback_chain.iter().map(String::as_str))
    }

    /// Look up `key`, walking the fallback chain.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.candidates(locale)
            .filter_map(|l| self.locales.get(l))
            .find_map(|strings| strings.get(key))
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn require(&self, locale: &str, key: &str) -> Result<&str, I18nError> {
        self.get(locale, key).ok_or_else(|| I18nError::MissingKey {
            locale: locale.to_owned(),
            key: key.to_owned(),
        })
    }

    /// Look up `key` and substitute `{name}` tokens from `args`.
    #[must_use]
    pub fn format(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(locale, key).map(|template| interpolate(template, args))
    }
}

/// Replace each `{name}` in `template` with the matching arg value.
///
/// Unknown names and unterminated braces are copied through unchanged.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
