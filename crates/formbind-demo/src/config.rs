#![forbid(unsafe_code)]

//! Demo configuration.
//!
//! Precedence, lowest first: built-in defaults, environment variables,
//! command-line flags. Flags and their `FORMBIND_*` variables are read by
//! clap; the system locale fallback goes through a lookup closure so tests
//! never touch the process environment.

use clap::Parser;
use formbind_i18n::I18nError;
use formbind_i18n::catalog::validate_locale;
use formbind_runtime::locale::{Locale, detect_locale, normalize_locale};
use formbind_widgets::bounded::{NumericRange, RangeError};

pub const MIN_ENV: &str = "FORMBIND_MIN";
pub const MAX_ENV: &str = "FORMBIND_MAX";
pub const LOCALE_ENV: &str = "FORMBIND_LOCALE";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "formbind-demo")]
#[command(about = "A parent-owned form with a bounded numeric field.")]
pub struct Cli {
    /// Read one input per stdin line instead of opening the terminal UI
    #[arg(long)]
    pub headless: bool,

    /// With --headless, print one JSON object per input line
    #[arg(long)]
    pub json: bool,

    /// Lower bound of the accepted range [default: 0]
    #[arg(long, value_name = "N", env = MIN_ENV, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Upper bound of the accepted range [default: 5]
    #[arg(long, value_name = "N", env = MAX_ENV, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Message locale, e.g. en or ru [default: from LC_ALL, LC_MESSAGES, LANG]
    #[arg(long, value_name = "TAG", env = LOCALE_ENV, value_parser = parse_locale)]
    pub locale: Option<Locale>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub range: NumericRange,
    pub headless: bool,
    /// Headless output as JSON lines.
    pub json: bool,
    pub locale: Locale,
}

/// `"en_GB.UTF-8"` → `"en-GB"`, rejecting tags that are not alphanumeric
/// subtags.
fn parse_locale(raw: &str) -> Result<Locale, I18nError> {
    let tag = normalize_locale(raw);
    validate_locale(&tag)?;
    Ok(tag)
}

impl Cli {
    /// Resolve parsed arguments into a configuration. `lookup` supplies the
    /// system locale variables when no locale was given.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] when the resolved `min` is greater than `max`.
    pub fn into_config(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<DemoConfig, RangeError> {
        let defaults = NumericRange::DEFAULT;
        let range = NumericRange::new(
            self.min.unwrap_or(defaults.min()),
            self.max.unwrap_or(defaults.max()),
        )?;
        let locale = self.locale.unwrap_or_else(|| detect_locale(lookup));
        Ok(DemoConfig {
            range,
            headless: self.headless,
            json: self.json,
            locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("formbind-demo").chain(args.iter().copied()))
    }

    fn run(args: &[&str]) -> DemoConfig {
        parse(args).unwrap().into_config(env(&[])).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = run(&[]);
        assert_eq!(config.range, NumericRange::DEFAULT);
        assert!(!config.headless);
        assert!(!config.json);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn flags() {
        let config = run(&[
            "--min",
            "1",
            "--max=3",
            "--locale",
            "en_GB.UTF-8",
            "--headless",
            "--json",
        ]);
        assert_eq!(config.range, NumericRange::new(1, 3).unwrap());
        assert_eq!(config.locale, "en-GB");
        assert!(config.headless);
        assert!(config.json);
    }

    #[test]
    fn range_flags_read_their_env_vars() {
        let cmd = Cli::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|v| v.to_str())
                .map(str::to_owned)
        };
        assert_eq!(env_of("min").as_deref(), Some(MIN_ENV));
        assert_eq!(env_of("max").as_deref(), Some(MAX_ENV));
        assert_eq!(env_of("locale").as_deref(), Some(LOCALE_ENV));
    }

    #[test]
    fn negative_flag_values() {
        let config = run(&["--min", "-5", "--max", "-1"]);
        assert_eq!(config.range, NumericRange::new(-5, -1).unwrap());
    }

    #[test]
    fn locale_falls_back_to_system() {
        let cli = parse(&[]).unwrap();
        let config = cli.clone().into_config(env(&[("LANG", "ru_RU.UTF-8")])).unwrap();
        assert_eq!(config.locale, "ru-RU");
        let config = cli.into_config(env(&[("LANG", "C")])).unwrap();
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn help_is_reported_by_clap() {
        let err = parse(&["--min", "1", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        let help = err.to_string();
        assert!(help.contains("--headless"), "{help}");
        assert!(help.contains("--locale <TAG>"), "{help}");
    }

    #[test]
    fn inverted_range_is_an_error() {
        let err = parse(&["--min", "4", "--max", "2"])
            .unwrap()
            .into_config(env(&[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid range: min 4 is greater than max 2");
    }

    #[test]
    fn bad_values() {
        assert_eq!(
            parse(&["--min", "two"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["--max"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            parse(&["--verbose"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        let err = parse(&["--locale", "en US"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("en US"), "{err}");
    }
}
