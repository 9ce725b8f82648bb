use crate::api::annotation::{parse_command_annotation, parse_flag_annotation};
use crate::api::{AnonymousBinder, Binder, Command, Selector};
use crate::constant::*;
use crate::model::{DispatchMode, Trigger};
use crate::parser::{ConfigError, FlagNames};
use crate::value::Bindable;

/// A flag binding the field `T` of the record `R`.
///
/// The field is reached through `accessor`, a non-capturing closure (or function) from the record to the field.
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::Flag;
///
/// struct Record {
///     age: u8,
/// }
///
/// let flag = Flag::new("age", |r: &mut Record| &mut r.age)
///     .short("a")
///     .default("23")
///     .usage("How old, in years.");
/// ```
pub struct Flag<R, T> {
    name: String,
    accessor: fn(&mut R) -> &mut T,
    short: Option<String>,
    default: Option<String>,
    usage: Option<String>,
    provider: Option<Box<dyn Fn(&R) -> T>>,
    command: Option<FlagCommand<R>>,
    trigger: Option<Trigger>,
    deferred_error: Option<ConfigError>,
}

struct FlagCommand<R> {
    method: Option<String>,
    handler: Box<dyn FnMut(&mut R)>,
}

impl<R, T> Flag<R, T> {
    /// Create a flag named `name`.
    pub fn new(name: impl Into<String>, accessor: fn(&mut R) -> &mut T) -> Self {
        Self {
            name: name.into(),
            accessor,
            short: None,
            default: None,
            usage: None,
            provider: None,
            command: None,
            trigger: None,
            deferred_error: None,
        }
    }

    /// Create a flag from the compact annotation `name[,default[,usage]]`.
    /// Each component is trimmed, and an empty component is treated as absent.
    ///
    /// ### Example
    /// ```
    /// # use flagbind_builder as flagbind;
    /// use flagbind::{Flag, FlagParser, DispatchMode, Record, Schema};
    ///
    /// #[derive(Default)]
    /// struct Person {
    ///     age: u8,
    /// }
    ///
    /// impl Record for Person {
    ///     fn schema() -> Schema<Self> {
    ///         Schema::new().flag(Flag::annotated("age, 23, How old, in years.", |r: &mut Person| &mut r.age))
    ///     }
    /// }
    ///
    /// let mut person = Person::default();
    /// let mut parser = FlagParser::new("program", DispatchMode::OptionTriggered).build();
    /// parser.parse_tokens(&mut person, &[]).unwrap();
    /// assert_eq!(person.age, 23);
    /// ```
    pub fn annotated(annotation: &str, accessor: fn(&mut R) -> &mut T) -> Self {
        let annotation = parse_flag_annotation(annotation);
        let mut flag = Self::new(annotation.name, accessor);
        flag.default = annotation.default;
        flag.usage = annotation.usage;
        flag
    }

    /// Set the short alias of this flag.
    /// If repeated, only the final alias will apply.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short.replace(short.into());
        self
    }

    /// Set the default literal, converted before the command line is parsed.
    /// A default that does not convert leaves the field at its type's `Default`.
    /// If repeated, only the final default will apply.
    pub fn default(mut self, literal: impl Into<String>) -> Self {
        self.default.replace(literal.into());
        self
    }

    /// Document the usage of this flag.
    /// If repeated, only the final usage will apply.
    pub fn usage(mut self, description: impl Into<String>) -> Self {
        self.usage.replace(description.into());
        self
    }

    /// Compute the field's value from the record, overriding the default literal.
    /// The command line still overrides the provided value.
    pub fn provider(mut self, provider: impl Fn(&R) -> T + 'static) -> Self {
        self.provider.replace(Box::new(provider));
        self
    }

    /// Attach a command to this flag, fired in [`crate::DispatchMode::OptionTriggered`] mode.
    /// Only `bool` and `String` flags may carry a command.
    ///
    /// The handler is identified as `<method>_command`, where an empty `method` defaults to the flag name.
    /// The trigger defaults to [`Trigger::True`] for `bool` and [`Trigger::NotEmpty`] for `String`.
    pub fn command(
        mut self,
        method: impl Into<String>,
        handler: impl FnMut(&mut R) + 'static,
    ) -> Self {
        let method: String = method.into();
        self.command.replace(FlagCommand {
            method: Some(method).filter(|method| !method.is_empty()),
            handler: Box::new(handler),
        });
        self
    }

    /// Attach a command from the annotation `method[,trigger]`.
    /// Both components are trimmed and optional.
    pub fn command_annotated(
        mut self,
        annotation: &str,
        handler: impl FnMut(&mut R) + 'static,
    ) -> Self {
        match parse_command_annotation(annotation) {
            Ok(annotation) => {
                if let Some(trigger) = annotation.trigger {
                    self.trigger.replace(trigger);
                }

                self.command(annotation.method.unwrap_or_default(), handler)
            }
            Err(error) => {
                self.deferred_error.replace(ConfigError(format!(
                    "flag '{FLAG_PREFIX}{}' has an invalid command: {}",
                    self.name, error.0
                )));
                self
            }
        }
    }

    /// Set the trigger of this flag's command.
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger.replace(trigger);
        self
    }
}

/// A sub-command, fired in [`crate::DispatchMode::SubCommandSelected`] mode when the first positional token equals its name.
pub struct SubCommand<R> {
    name: String,
    handler_name: String,
    usage: Option<String>,
    handler: Box<dyn FnMut(&mut R)>,
}

impl<R> SubCommand<R> {
    /// Create a sub-command named `name`, identifying its handler by `handler_name`.
    pub fn new(
        name: impl Into<String>,
        handler_name: impl Into<String>,
        handler: impl FnMut(&mut R) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            handler_name: handler_name.into(),
            usage: None,
            handler: Box::new(handler),
        }
    }

    /// Document the usage of this sub-command.
    /// If repeated, only the final usage will apply.
    pub fn usage(mut self, description: impl Into<String>) -> Self {
        self.usage.replace(description.into());
        self
    }
}

pub(crate) struct FlagEntry<R> {
    pub(crate) names: FlagNames,
    pub(crate) usage: String,
    pub(crate) binder: Box<dyn AnonymousBinder<R>>,
}

/// The registration of a record's flags and commands, in declaration order.
///
/// This is typically generated by `#[derive(FlagRecord)]`, but may also be written out by hand.
pub struct Schema<R> {
    flags: Vec<FlagEntry<R>>,
    commands: Vec<Command<R>>,
    residual: Option<fn(&mut R) -> &mut Vec<String>>,
    deferred_error: Option<ConfigError>,
}

impl<R: 'static> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static> Schema<R> {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self {
            flags: Vec::default(),
            commands: Vec::default(),
            residual: None,
            deferred_error: None,
        }
    }

    /// Register a flag.
    pub fn flag<T: Bindable + 'static>(mut self, flag: Flag<R, T>) -> Self {
        let Flag {
            name,
            accessor,
            short,
            default,
            usage,
            provider,
            command,
            trigger,
            deferred_error,
        } = flag;

        if let Some(error) = deferred_error {
            self.deferred_error.replace(error);
        }

        let usage = usage.unwrap_or_default();

        match (command, T::subject()) {
            (Some(FlagCommand { method, handler }), Some(subject)) => {
                let trigger = trigger.unwrap_or_else(|| Trigger::default_for(subject));

                if trigger.subject() == subject {
                    let handler_name = format!(
                        "{}{COMMAND_SUFFIX}",
                        method.unwrap_or_else(|| name.clone())
                    );
                    let selector = Selector::OptionTriggered {
                        trigger,
                        probe: Box::new(move |record: &mut R| accessor(record).observe()),
                    };
                    self.commands.push(Command::new(
                        name.clone(),
                        handler_name,
                        usage.clone(),
                        selector,
                        handler,
                    ));
                } else {
                    self.deferred_error.replace(ConfigError(format!(
                        "flag '{FLAG_PREFIX}{name}' of type {} cannot trigger on '{trigger}'.",
                        T::kind()
                    )));
                }
            }
            (Some(_), None) => {
                self.deferred_error.replace(ConfigError(format!(
                    "flag '{FLAG_PREFIX}{name}' of type {} cannot carry a command (only bool and String may).",
                    T::kind()
                )));
            }
            (None, _) => {
                if let Some(trigger) = trigger {
                    self.deferred_error.replace(ConfigError(format!(
                        "flag '{FLAG_PREFIX}{name}' has trigger '{trigger}' without a command."
                    )));
                }
            }
        }

        self.flags.push(FlagEntry {
            names: FlagNames { name, short },
            usage,
            binder: Box::new(Binder::new(accessor, default, provider)),
        });
        self
    }

    /// Register a sub-command.
    pub fn sub_command(mut self, sub_command: SubCommand<R>) -> Self {
        let SubCommand {
            name,
            handler_name,
            usage,
            handler,
        } = sub_command;

        if name.is_empty() || name.starts_with(FLAG_PREFIX) {
            self.deferred_error.replace(ConfigError(format!(
                "sub-command '{name}' must be non-empty and must not begin with '{FLAG_PREFIX}'."
            )));
        } else if self.commands.iter().any(|command| {
            command.mode() == DispatchMode::SubCommandSelected && command.name() == name
        }) {
            self.deferred_error
                .replace(ConfigError(format!("sub-command '{name}' redefined.")));
        } else {
            self.commands.push(Command::new(
                name,
                handler_name,
                usage.unwrap_or_default(),
                Selector::SubCommandSelected,
                handler,
            ));
        }

        self
    }

    /// Register the field receiving the residual tokens: those left after the flags.
    /// The field is only written when there are residual tokens.
    pub fn residual(mut self, accessor: fn(&mut R) -> &mut Vec<String>) -> Self {
        self.residual.replace(accessor);
        self
    }

    pub(crate) fn consume(self) -> Result<SchemaParts<R>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        Ok(SchemaParts {
            flags: self.flags,
            commands: self.commands,
            residual: self.residual,
        })
    }
}

pub(crate) struct SchemaParts<R> {
    pub(crate) flags: Vec<FlagEntry<R>>,
    pub(crate) commands: Vec<Command<R>>,
    pub(crate) residual: Option<fn(&mut R) -> &mut Vec<String>>,
}

impl<R> std::fmt::Debug for SchemaParts<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaParts")
            .field("flags", &self.flags.len())
            .field("commands", &self.commands.len())
            .field("residual", &self.residual.is_some())
            .finish()
    }
}
