//! Environment-driven tuning for property suites.
//!
//! `NETREACH_PBT_CASES` overrides the number of cases per property and
//! `NETREACH_PBT_FORK` runs each case in a forked subprocess. Invalid values
//! are logged and ignored.

use std::env;

use proptest::test_runner::Config;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "NETREACH_PBT_CASES";
/// Environment variable toggling forked case execution.
pub const FORK_ENV_KEY: &str = "NETREACH_PBT_FORK";

/// Resolved property-suite settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestProfile {
    cases: u32,
    fork: bool,
}

impl ProptestProfile {
    /// Reads overrides from the environment, falling back to `default_cases`
    /// and no forking.
    ///
    /// # Examples
    /// ```
    /// use netreach_test_support::proptest_profile::ProptestProfile;
    ///
    /// let profile = ProptestProfile::from_env(32);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn from_env(default_cases: u32) -> Self {
        Self {
            cases: override_or(CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(FORK_ENV_KEY, false, parse_switch),
        }
    }

    /// Number of cases per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }

    /// Builds a proptest configuration from this profile.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            cases: self.cases,
            fork: self.fork,
            ..Config::default()
        }
    }
}

/// Shorthand for `ProptestProfile::from_env(default_cases).config()`.
#[must_use]
pub fn suite_config(default_cases: u32) -> Config {
    ProptestProfile::from_env(default_cases).config()
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring invalid property-suite override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&cases| cases > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" 12 ", Some(12))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("many", None)]
    fn case_overrides_must_be_positive(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }

    #[rstest]
    #[case("ON", Some(true))]
    #[case("1", Some(true))]
    #[case("no", Some(false))]
    #[case(" false ", Some(false))]
    #[case("sometimes", None)]
    #[case("", None)]
    fn fork_overrides_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_switch(raw), expected);
    }

    #[rstest]
    fn config_carries_profile_values() {
        let profile = ProptestProfile {
            cases: 7,
            fork: true,
        };
        let config = profile.config();
        assert_eq!(config.cases, 7);
        assert!(config.fork);
    }
}
