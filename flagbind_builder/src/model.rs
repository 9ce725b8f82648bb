use std::str::FromStr;
use std::time::Duration;

use crate::constant::*;
use crate::parser::ConfigError;

/// The policy used to select which commands fire after parsing.
/// A parser operates in exactly one mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Each flag carrying a command fires when its trigger matches the flag's final value.
    /// Any number of commands may fire, including none.
    OptionTriggered,
    /// The first positional token names exactly one sub-command to fire.
    /// A missing or unknown sub-command is a usage error.
    SubCommandSelected,
}

/// The condition, over a flag's final value, under which its command fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fires when a `bool` flag is `true`.
    True,
    /// Fires when a `bool` flag is `false`.
    False,
    /// Fires when a `String` flag is empty.
    Empty,
    /// Fires when a `String` flag is not empty.
    NotEmpty,
}

impl Trigger {
    /// The subject this trigger observes.
    pub fn subject(&self) -> Subject {
        match self {
            Trigger::True | Trigger::False => Subject::Switch,
            Trigger::Empty | Trigger::NotEmpty => Subject::Text,
        }
    }

    /// The trigger used when a command does not declare one.
    pub fn default_for(subject: Subject) -> Self {
        match subject {
            Subject::Switch => Trigger::True,
            Subject::Text => Trigger::NotEmpty,
        }
    }

    /// Check whether this trigger matches an observed value.
    pub fn matches(&self, observed: Observed) -> bool {
        matches!(
            (self, observed),
            (Trigger::True, Observed::Switch(true))
                | (Trigger::False, Observed::Switch(false))
                | (Trigger::Empty, Observed::Text { empty: true })
                | (Trigger::NotEmpty, Observed::Text { empty: false })
        )
    }
}

impl FromStr for Trigger {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "true" => Ok(Trigger::True),
            "false" => Ok(Trigger::False),
            "empty" => Ok(Trigger::Empty),
            "notempty" => Ok(Trigger::NotEmpty),
            _ => Err(ConfigError(format!(
                "invalid trigger '{value}' (expected one of: true, false, empty, notempty)."
            ))),
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::True => write!(f, "true"),
            Trigger::False => write!(f, "false"),
            Trigger::Empty => write!(f, "empty"),
            Trigger::NotEmpty => write!(f, "notempty"),
        }
    }
}

/// The kinds of flag value a trigger may observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// A `bool` flag.
    Switch,
    /// A `String` flag.
    Text,
}

/// A flag value, as seen by a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// The value of a `bool` flag.
    Switch(bool),
    /// Whether a `String` flag is empty.
    Text {
        /// `true` when the string is empty.
        empty: bool,
    },
}

/// The conversion settings shared by every flag of a parser.
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::Config;
///
/// let config = Config::new(",", ":").unwrap();
/// assert_eq!(config.item_separator(), ",");
/// assert!(Config::new(",", ",").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    item_separator: String,
    pair_separator: String,
    duration_fallback: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            item_separator: DEFAULT_ITEM_SEPARATOR.to_string(),
            pair_separator: DEFAULT_PAIR_SEPARATOR.to_string(),
            duration_fallback: Duration::ZERO,
        }
    }
}

impl Config {
    /// Create a config with the given item and pair separators.
    /// Both must be non-empty and distinct.
    pub fn new(
        item_separator: impl Into<String>,
        pair_separator: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            item_separator: item_separator.into(),
            pair_separator: pair_separator.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the value applied to `Duration` flags whose literal does not parse.
    pub fn with_duration_fallback(mut self, fallback: Duration) -> Self {
        self.duration_fallback = fallback;
        self
    }

    /// The separator between the items of a sequence or mapping.
    pub fn item_separator(&self) -> &str {
        &self.item_separator
    }

    /// The separator between the key and value of a mapping item.
    pub fn pair_separator(&self) -> &str {
        &self.pair_separator
    }

    /// The value applied to `Duration` flags whose literal does not parse.
    pub fn duration_fallback(&self) -> Duration {
        self.duration_fallback
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.item_separator.is_empty() {
            return Err(ConfigError("item separator must not be empty.".to_string()));
        }

        if self.pair_separator.is_empty() {
            return Err(ConfigError("pair separator must not be empty.".to_string()));
        }

        if self.item_separator == self.pair_separator {
            return Err(ConfigError(format!(
                "item separator and pair separator must differ (both are '{}').",
                self.item_separator
            )));
        }

        Ok(())
    }
}
