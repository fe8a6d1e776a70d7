#![forbid(unsafe_code)]

//! Runtime support for formbind: reactive state cells and the locale
//! context that components read their text through.

pub mod locale;
pub mod reactive;

pub use locale::{LocaleContext, detect_locale};
pub use reactive::{BatchScope, Binding, Observable, Subscription, Subscriptions};
