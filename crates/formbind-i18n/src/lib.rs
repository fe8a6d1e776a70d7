#![forbid(unsafe_code)]

//! String catalogs for formbind.
//!
//! Components look up user-facing text by key and locale; missing keys fall
//! back along a configurable locale chain.

pub mod catalog;

pub use catalog::{I18nError, Locale, LocaleStrings, StringCatalog};
