#![forbid(unsafe_code)]

//! Subscriber setup for the demo.
//!
//! The interactive UI owns the terminal, so its logs only go to a file, and
//! only when `FORMBIND_LOG_FILE` names one. Headless runs log to stderr
//! unless a file is given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const FILTER_ENV: &str = "FORMBIND_LOG";
pub const FILE_ENV: &str = "FORMBIND_LOG_FILE";
pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    pub fn select(headless: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(FILE_ENV).filter(|path| !path.trim().is_empty()) {
            Some(path) => Self::File(PathBuf::from(path)),
            None if headless => Self::Stderr,
            None => Self::Disabled,
        }
    }
}

/// Directives from `FORMBIND_LOG`, or [`DEFAULT_FILTER`] if unset or invalid.
pub fn filter(lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    lookup(FILTER_ENV)
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(headless: bool, lookup: impl Fn(&str) -> Option<String>) -> io::Result<LogTarget> {
    let target = LogTarget::select(headless, &lookup);
    let filter = filter(&lookup);
    let installed = match &target {
        LogTarget::Disabled => return Ok(target),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    if let Err(e) = installed {
        // Only fails when a subscriber is already set.
        tracing::debug!(error = %e, "subscriber already installed");
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn interactive_without_file_is_disabled() {
        assert_eq!(LogTarget::select(false, env(&[])), LogTarget::Disabled);
        assert_eq!(
            LogTarget::select(false, env(&[(FILE_ENV, "  ")])),
            LogTarget::Disabled
        );
    }

    #[test]
    fn headless_defaults_to_stderr() {
        assert_eq!(LogTarget::select(true, env(&[])), LogTarget::Stderr);
    }

    #[test]
    fn file_wins_in_both_modes() {
        let lookup = env(&[(FILE_ENV, "/tmp/formbind.log")]);
        let expected = LogTarget::File(PathBuf::from("/tmp/formbind.log"));
        assert_eq!(LogTarget::select(true, &lookup), expected);
        assert_eq!(LogTarget::select(false, &lookup), expected);
    }

    #[test]
    fn filter_falls_back_on_bad_directives() {
        assert_eq!(filter(env(&[])).to_string(), DEFAULT_FILTER);
        assert_eq!(
            filter(env(&[(FILTER_ENV, "formbind=debug")])).to_string(),
            "formbind=debug"
        );
        assert_eq!(
            filter(env(&[(FILTER_ENV, "formbind=loud")])).to_string(),
            DEFAULT_FILTER
        );
    }

    #[test]
    fn disabled_target_installs_nothing() {
        assert_eq!(init(false, env(&[])).unwrap(), LogTarget::Disabled);
    }
}
