use std::rc::Rc;
use std::time::Duration;

use crate::constant::*;
use crate::model::{Config, DispatchMode};
use crate::parser::{terminal_width, ConfigError, ConsoleInterface, GeneralParser, UserInterface};

/// The command line parser builder.
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::{DispatchMode, FlagParser, Record, Schema};
///
/// #[derive(Default)]
/// struct Empty {}
///
/// impl Record for Empty {
///     fn schema() -> Schema<Self> {
///         Schema::new()
///     }
/// }
///
/// let mut parser = FlagParser::new("program", DispatchMode::OptionTriggered)
///     // Configure with FlagParser::about, FlagParser::item_separator, etc.
///     .build();
/// parser.parse_tokens(&mut Empty::default(), &[]).unwrap();
/// ```
#[derive(Debug)]
pub struct FlagParser {
    program: String,
    about: Option<String>,
    mode: DispatchMode,
    item_separator: String,
    pair_separator: String,
    duration_fallback: Duration,
}

impl FlagParser {
    /// Create a command line parser, dispatching commands under `mode`.
    pub fn new(program: impl Into<String>, mode: DispatchMode) -> Self {
        Self {
            program: program.into(),
            about: None,
            mode,
            item_separator: DEFAULT_ITEM_SEPARATOR.to_string(),
            pair_separator: DEFAULT_PAIR_SEPARATOR.to_string(),
            duration_fallback: Duration::ZERO,
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final about message will apply.
    ///
    /// An about message documents the command line parser in full sentence/paragraph format.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Set the separator between the items of sequence and mapping flags (default `@`).
    ///
    /// ### Example
    /// ```
    /// # use flagbind_builder as flagbind;
    /// use flagbind::{DispatchMode, Flag, FlagParser, Record, Schema};
    ///
    /// #[derive(Default)]
    /// struct Tagged {
    ///     tags: Vec<String>,
    /// }
    ///
    /// impl Record for Tagged {
    ///     fn schema() -> Schema<Self> {
    ///         Schema::new().flag(Flag::new("tags", |r: &mut Tagged| &mut r.tags))
    ///     }
    /// }
    ///
    /// let mut tagged = Tagged::default();
    /// let mut parser = FlagParser::new("program", DispatchMode::OptionTriggered)
    ///     .item_separator(",")
    ///     .build();
    /// parser.parse_tokens(&mut tagged, &["-tags", "a,b"]).unwrap();
    ///
    /// assert_eq!(tagged.tags, vec!["a".to_string(), "b".to_string()]);
    /// ```
    pub fn item_separator(mut self, separator: impl Into<String>) -> Self {
        self.item_separator = separator.into();
        self
    }

    /// Set the separator between the key and value of mapping flags (default `=`).
    pub fn pair_separator(mut self, separator: impl Into<String>) -> Self {
        self.pair_separator = separator.into();
        self
    }

    /// Set the value applied to `Duration` flags whose literal does not parse (default zero).
    pub fn duration_fallback(mut self, fallback: Duration) -> Self {
        self.duration_fallback = fallback;
        self
    }

    /// Adopt the separators and fallback of `config`.
    pub fn config(self, config: &Config) -> Self {
        self.item_separator(config.item_separator())
            .pair_separator(config.pair_separator())
            .duration_fallback(config.duration_fallback())
    }

    pub(crate) fn build_with_interface(
        self,
        terminal_width: Option<usize>,
        user_interface: Rc<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        let config = Config::new(self.item_separator, self.pair_separator)?
            .with_duration_fallback(self.duration_fallback);

        Ok(GeneralParser::new(
            self.program,
            self.about,
            self.mode,
            config,
            terminal_width,
            user_interface,
        ))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: equal item and pair separators).
    ///
    /// Errors in the flags and commands of a record are reported when parsing, since they belong to the record type.
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(terminal_width(), Rc::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: equal item and pair separators).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
