use std::env;
use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{FlagEntry, SchemaParts};
use crate::constant::*;
use crate::dispatch::Dispatcher;
use crate::model::{Config, DispatchMode};
use crate::parser::interface::UserInterface;
use crate::parser::printer::{FlagUsage, Printer, SubCommandUsage};
use crate::parser::{BindError, FlagNames, FlagSet};
use crate::prelude::Record;

/// The configured command line parser.
/// Built via [`crate::FlagParser::build`].
///
/// A parser binds the command line once.
/// Subsequent parses are no-ops, producing an idle [`Dispatcher`].
pub struct GeneralParser {
    program: String,
    about: Option<String>,
    mode: DispatchMode,
    config: Config,
    terminal_width: Option<usize>,
    parsed: bool,
    user_interface: Rc<dyn UserInterface>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("program", &self.program)
            .field("mode", &self.mode)
            .field("config", &self.config)
            .field("parsed", &self.parsed)
            .finish()
    }
}

impl GeneralParser {
    pub(crate) fn new(
        program: String,
        about: Option<String>,
        mode: DispatchMode,
        config: Config,
        terminal_width: Option<usize>,
        user_interface: Rc<dyn UserInterface>,
    ) -> Self {
        Self {
            program,
            about,
            mode,
            config,
            terminal_width,
            parsed: false,
            user_interface,
        }
    }

    /// The dispatch mode of this parser.
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Whether this parser has already parsed.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Bind the input tokens onto `record`, producing the [`Dispatcher`] of its commands.
    ///
    /// Each flag's field is bound in three steps:
    /// 1. The default literal, if declared.
    /// 2. The provider, if declared.
    /// 3. The command line literals.
    ///
    /// Every default is applied before any provider runs, so providers observe the defaults of the whole record.
    ///
    /// In [`DispatchMode::SubCommandSelected`] mode the first token names the sub-command, and the flags follow it.
    ///
    /// On error, the parser prints the error followed by the usage, except for [`BindError::Help`] which prints the usage alone.
    ///
    /// ### Example
    /// ```
    /// # use flagbind_builder as flagbind;
    /// use flagbind::{DispatchMode, Flag, FlagParser, Record, Schema};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     verbose: bool,
    ///     count: u32,
    ///     args: Vec<String>,
    /// }
    ///
    /// impl Record for Settings {
    ///     fn schema() -> Schema<Self> {
    ///         Schema::new()
    ///             .flag(Flag::new("verbose", |r: &mut Settings| &mut r.verbose).short("v"))
    ///             .flag(Flag::new("count", |r: &mut Settings| &mut r.count).default("1"))
    ///             .residual(|r: &mut Settings| &mut r.args)
    ///     }
    /// }
    ///
    /// let mut settings = Settings::default();
    /// let mut parser = FlagParser::new("program", DispatchMode::OptionTriggered).build();
    /// parser
    ///     .parse_tokens(&mut settings, &["-v", "--count=3", "a", "b"])
    ///     .unwrap();
    ///
    /// assert!(settings.verbose);
    /// assert_eq!(settings.count, 3);
    /// assert_eq!(settings.args, vec!["a".to_string(), "b".to_string()]);
    /// ```
    pub fn parse_tokens<R: Record>(
        &mut self,
        record: &mut R,
        tokens: &[&str],
    ) -> Result<Dispatcher<R>, BindError> {
        if self.parsed {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Parser '{}' has already parsed, skipping.", self.program);
            }
            return Ok(Dispatcher::idle());
        }

        self.parsed = true;
        let result = self.bind(record, tokens);

        if let Err(error @ BindError::Config(_)) = &result {
            self.user_interface.print_error(error);
        }

        result
    }

    fn bind<R: Record>(
        &self,
        record: &mut R,
        tokens: &[&str],
    ) -> Result<Dispatcher<R>, BindError> {
        self.config.validate()?;
        let SchemaParts {
            flags,
            commands,
            residual,
        } = R::schema().consume()?;
        let names: Vec<FlagNames> = flags.iter().map(|flag| flag.names.clone()).collect();
        let flag_set = FlagSet::new(&names)?;
        let mut binders = Vec::with_capacity(flags.len());
        let mut usages = Vec::with_capacity(flags.len());

        for FlagEntry {
            names,
            usage,
            mut binder,
        } in flags
        {
            binder.configure(&self.config);
            binder.apply_default(record);
            binders.push(binder);
            usages.push((names, usage));
        }

        for binder in binders.iter_mut() {
            binder.apply_provider(record);
        }

        let commands: Vec<_> = commands
            .into_iter()
            .filter(|command| command.mode() == self.mode)
            .collect();
        let printer = Printer::new(
            self.program.clone(),
            self.about.clone(),
            self.mode,
            commands
                .iter()
                .map(|command| {
                    SubCommandUsage::new(command.name().to_string(), command.usage().to_string())
                })
                .collect(),
            usages
                .into_iter()
                .zip(binders.iter())
                .map(|((FlagNames { name, short }, usage), binder)| {
                    FlagUsage::new(
                        name,
                        short,
                        usage,
                        binder.current().to_string(),
                        binder.is_bool_flag(),
                    )
                })
                .collect(),
            self.terminal_width,
        );

        let (active, remaining) = match self.mode {
            DispatchMode::OptionTriggered => (None, tokens),
            DispatchMode::SubCommandSelected => match tokens.split_first() {
                Some((first, remaining))
                    if !first.is_empty() && !first.starts_with(FLAG_PREFIX) =>
                {
                    (Some(first.to_string()), remaining)
                }
                _ => {
                    let error = BindError::Usage(format!(
                        "expected {SUB_COMMAND_META} as the first argument."
                    ));
                    self.user_interface.print_error(&error);
                    printer.print_help(&*self.user_interface);
                    return Err(error);
                }
            },
        };

        let residual_tokens = match flag_set.parse(record, &mut binders, remaining) {
            Ok(residual_tokens) => residual_tokens,
            Err(BindError::Help) => {
                printer.print_help(&*self.user_interface);
                return Err(BindError::Help);
            }
            Err(error) => {
                self.user_interface.print_error(&error);
                printer.print_help(&*self.user_interface);
                return Err(error);
            }
        };

        if !residual_tokens.is_empty() {
            match residual {
                Some(accessor) => *accessor(record) = residual_tokens,
                None => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Discarding residual tokens {residual_tokens:?}.");
                    }
                }
            }
        }

        Ok(match active {
            None => Dispatcher::option_triggered(commands),
            Some(active) => Dispatcher::sub_command_selected(
                active,
                commands,
                printer,
                self.user_interface.clone(),
            ),
        })
    }

    /// Bind the command line of this process onto `record`.
    ///
    /// On error, exits with the error's [`BindError::exit_code`] (via [`std::process::exit`]).
    pub fn parse<R: Record>(&mut self, record: &mut R) -> Dispatcher<R> {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            record,
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(dispatcher) => dispatcher,
            Err(error) => std::process::exit(error.exit_code()),
        }
    }

    /// Bind the command line of this process onto `record`, then run its commands.
    ///
    /// On error, exits with the error's [`BindError::exit_code`] (via [`std::process::exit`]).
    pub fn parse_and_run_command<R: Record>(&mut self, record: &mut R) -> usize {
        let dispatcher = self.parse(record);

        match dispatcher.run(record) {
            Ok(fired) => fired,
            Err(error) => std::process::exit(error.exit_code()),
        }
    }
}
