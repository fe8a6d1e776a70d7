#![forbid(unsafe_code)]

//! Active locale, shared by the components of one application.
//!
//! The locale lives in an [`Observable`] so a change re-renders everything
//! that reads text through the catalog.

use crate::reactive::{Observable, Subscription};
pub use formbind_i18n::Locale;

/// Used when detection finds nothing usable.
pub const DEFAULT_LOCALE: &str = "en";

/// Environment variables consulted by [`detect_locale`], in priority order.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Clone, Debug)]
pub struct LocaleContext {
    current: Observable<Locale>,
}

impl LocaleContext {
    #[must_use]
    pub fn new(locale: impl Into<Locale>) -> Self {
        Self {
            current: Observable::new(normalize_locale(&locale.into())),
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> Locale {
        self.current.get()
    }

    /// Switch locale. Returns `true` if it changed.
    pub fn set_locale(&self, locale: impl Into<Locale>) -> bool {
        let locale = normalize_locale(&locale.into());
        let changed = self.current.set(locale);
        if changed {
            tracing::debug!(
                target: "formbind::locale",
                locale = %self.current.get(),
                "locale changed"
            );
        }
        changed
    }

    #[must_use = "dropping the Subscription immediately unsubscribes"]
    pub fn subscribe(&self, callback: impl Fn(&Locale) + 'static) -> Subscription {
        self.current.subscribe(callback)
    }

    /// Changes so far; useful for cache invalidation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.current.version()
    }
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

/// Pick a locale from environment-style lookups.
///
/// `lookup` is consulted for [`LOCALE_ENV_VARS`] in order; the first value
/// that is set and is not the POSIX locale wins.
pub fn detect_locale(lookup: impl Fn(&str) -> Option<String>) -> Locale {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|&key| lookup(key))
        .find(|raw| !is_posix_locale(raw))
        .map(|raw| normalize_locale(&raw))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_owned())
}

fn is_posix_locale(raw: &str) -> bool {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix")
}

/// `"en_US.UTF-8"` → `"en-US"`, `"C"` / `"POSIX"` / empty → `"en"`.
#[must_use]
pub fn normalize_locale(raw: &str) -> Locale {
    if is_posix_locale(raw) {
        return DEFAULT_LOCALE.to_owned();
    }
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    base.replace('_', "-")
}
