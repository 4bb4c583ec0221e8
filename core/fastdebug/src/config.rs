//! Inspector configuration.
//!
//! [`Config`] is a plain value owned by an [`Inspector`](crate::Inspector).
//! The process-wide copy used by [`fd!`](crate::fd) lives in a
//! [`SharedConfig`], created on first use from the defaults overlaid with the
//! `FASTDEBUG_*` environment variables.
//!
//! # Thread safety
//!
//! Each flag of the shared configuration is an independent relaxed atomic.
//! Concurrent reconfiguration from several threads is best-effort: a call may
//! observe a mix of old and new flags.

use std::{
    env,
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

/// Presentation and activation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// Whether calls print anything at all.
    pub enabled: bool,
    /// Print an empty line after every line of a report.
    pub nl: bool,
    /// Print an empty line after every report.
    pub end_nl: bool,
    /// Terminate the process after printing a report.
    pub exit: bool,
    /// Tint types and values with terminal colours.
    pub color: bool,
    /// Start every report with the location of the call.
    pub context: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            nl: false,
            end_nl: true,
            exit: false,
            color: true,
            context: false,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from the defaults, overlaid with whatever
    /// `lookup` returns for the `FASTDEBUG_*` keys.
    ///
    /// A non-empty `NO_COLOR` disables colour unless `FASTDEBUG_COLOR` says
    /// otherwise.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            config.color = false;
        }

        let settings = Settings {
            enabled: flag(&lookup, "FASTDEBUG_ENABLED"),
            nl: flag(&lookup, "FASTDEBUG_NL"),
            end_nl: flag(&lookup, "FASTDEBUG_END_NL"),
            exit: flag(&lookup, "FASTDEBUG_EXIT"),
            color: flag(&lookup, "FASTDEBUG_COLOR"),
            context: flag(&lookup, "FASTDEBUG_CONTEXT"),
        };
        settings.apply(&mut config);
        config
    }

    /// Returns the flags that apply to one call.
    #[must_use]
    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            nl: overrides.nl.unwrap_or(self.nl),
            end_nl: overrides.end_nl.unwrap_or(self.end_nl),
            exit: overrides.exit.unwrap_or(self.exit),
            ..self
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            log::warn!("ignoring {key}={value:?}: expected a boolean");
            None
        }
    }
}

/// A partial update for a [`Config`]; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Settings {
    /// See [`Config::enabled`].
    pub enabled: Option<bool>,
    /// See [`Config::nl`].
    pub nl: Option<bool>,
    /// See [`Config::end_nl`].
    pub end_nl: Option<bool>,
    /// See [`Config::exit`].
    pub exit: Option<bool>,
    /// See [`Config::color`].
    pub color: Option<bool>,
    /// See [`Config::context`].
    pub context: Option<bool>,
}

impl Settings {
    /// Writes every set field into `config`.
    pub fn apply(self, config: &mut Config) {
        let fields = [
            (self.enabled, &mut config.enabled),
            (self.nl, &mut config.nl),
            (self.end_nl, &mut config.end_nl),
            (self.exit, &mut config.exit),
            (self.color, &mut config.color),
            (self.context, &mut config.context),
        ];
        for (setting, slot) in fields {
            if let Some(value) = setting {
                *slot = value;
            }
        }
    }
}

/// Per-call presentation overrides, as passed after the `;` of
/// [`fd!`](crate::fd).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Overrides {
    /// Overrides [`Config::nl`].
    pub nl: Option<bool>,
    /// Overrides [`Config::end_nl`].
    pub end_nl: Option<bool>,
    /// Overrides [`Config::exit`].
    pub exit: Option<bool>,
}

/// The process-wide configuration read by [`fd!`](crate::fd).
#[derive(Debug)]
pub struct SharedConfig {
    enabled: AtomicBool,
    nl: AtomicBool,
    end_nl: AtomicBool,
    exit: AtomicBool,
    color: AtomicBool,
    context: AtomicBool,
}

impl SharedConfig {
    /// Creates a shared configuration holding `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            nl: AtomicBool::new(config.nl),
            end_nl: AtomicBool::new(config.end_nl),
            exit: AtomicBool::new(config.exit),
            color: AtomicBool::new(config.color),
            context: AtomicBool::new(config.context),
        }
    }

    /// Takes a snapshot of the current flags.
    pub fn load(&self) -> Config {
        Config {
            enabled: self.enabled.load(Ordering::Relaxed),
            nl: self.nl.load(Ordering::Relaxed),
            end_nl: self.end_nl.load(Ordering::Relaxed),
            exit: self.exit.load(Ordering::Relaxed),
            color: self.color.load(Ordering::Relaxed),
            context: self.context.load(Ordering::Relaxed),
        }
    }

    /// Replaces every flag.
    pub fn store(&self, config: Config) {
        self.enabled.store(config.enabled, Ordering::Relaxed);
        self.nl.store(config.nl, Ordering::Relaxed);
        self.end_nl.store(config.end_nl, Ordering::Relaxed);
        self.exit.store(config.exit, Ordering::Relaxed);
        self.color.store(config.color, Ordering::Relaxed);
        self.context.store(config.context, Ordering::Relaxed);
    }

    /// Applies a partial update.
    pub fn configure(&self, settings: Settings) {
        log::trace!("configuring fastdebug: {settings:?}");
        let mut config = self.load();
        settings.apply(&mut config);
        self.store(config);
    }

    /// Turns output on.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Turns output off.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Returns whether output is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// The process-wide configuration, initialised from the environment on first
/// access.
pub fn shared() -> &'static SharedConfig {
    static SHARED: OnceLock<SharedConfig> = OnceLock::new();
    SHARED.get_or_init(|| SharedConfig::new(Config::from_env()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_case::test_case;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |key| vars.get(key).map(ToString::to_string)
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.enabled);
        assert!(!config.nl);
        assert!(config.end_nl);
        assert!(!config.exit);
        assert_eq!(Config::from_lookup(|_| None), config);
    }

    #[test_case("1", Some(true))]
    #[test_case("TRUE", Some(true))]
    #[test_case(" on ", Some(true))]
    #[test_case("0", Some(false))]
    #[test_case("No", Some(false))]
    #[test_case("maybe", None)]
    fn parses_flags(raw: &str, expected: Option<bool>) {
        let vars = [("FASTDEBUG_NL", raw)];
        assert_eq!(flag(&lookup(&vars), "FASTDEBUG_NL"), expected);
    }

    #[test]
    fn environment_overlays_defaults() {
        let vars = [
            ("FASTDEBUG_ENABLED", "false"),
            ("FASTDEBUG_END_NL", "0"),
            ("FASTDEBUG_CONTEXT", "yes"),
            ("FASTDEBUG_EXIT", "garbage"),
        ];
        let config = Config::from_lookup(lookup(&vars));
        assert!(!config.enabled);
        assert!(!config.end_nl);
        assert!(config.context);
        assert!(!config.exit);
    }

    #[test]
    fn no_color_is_respected_unless_overridden() {
        assert!(!Config::from_lookup(lookup(&[("NO_COLOR", "1")])).color);
        assert!(Config::from_lookup(lookup(&[("NO_COLOR", "")])).color);
        assert!(
            Config::from_lookup(lookup(&[("NO_COLOR", "1"), ("FASTDEBUG_COLOR", "true")])).color
        );
    }

    #[test]
    fn overrides_only_touch_presentation() {
        let config = Config {
            enabled: false,
            ..Config::default()
        };
        let effective = config.with_overrides(Overrides {
            nl: Some(true),
            end_nl: Some(false),
            exit: None,
        });
        assert!(!effective.enabled);
        assert!(effective.nl);
        assert!(!effective.end_nl);
        assert!(!effective.exit);
    }

    #[test]
    fn shared_config_round_trips() {
        let shared = SharedConfig::default();
        shared.disable();
        assert!(!shared.is_enabled());
        shared.enable();
        assert!(shared.is_enabled());

        shared.configure(Settings {
            nl: Some(true),
            color: Some(false),
            ..Settings::default()
        });
        let config = shared.load();
        assert!(config.nl);
        assert!(!config.color);
        assert!(config.end_nl);

        shared.store(Config::default());
        assert_eq!(shared.load(), Config::default());
    }
}
