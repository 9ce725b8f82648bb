use std::rc::Rc;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::Command;
use crate::model::DispatchMode;
use crate::parser::{BindError, Printer, UserInterface};

enum DispatchState<R> {
    Idle,
    OptionTriggered {
        commands: Vec<Command<R>>,
    },
    SubCommandSelected {
        active: String,
        commands: Vec<Command<R>>,
        printer: Printer,
        user_interface: Rc<dyn UserInterface>,
    },
}

/// The commands of a parsed record, ready to run against it.
///
/// Produced by [`crate::GeneralParser::parse_tokens`].
/// A parser that has already parsed produces an idle dispatcher, which runs nothing.
pub struct Dispatcher<R> {
    state: DispatchState<R>,
}

impl<R> std::fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mode", &self.mode())
            .field("active", &self.active())
            .field("commands", &self.commands())
            .finish()
    }
}

impl<R> Dispatcher<R> {
    pub(crate) fn idle() -> Self {
        Self {
            state: DispatchState::Idle,
        }
    }

    pub(crate) fn option_triggered(commands: Vec<Command<R>>) -> Self {
        Self {
            state: DispatchState::OptionTriggered { commands },
        }
    }

    pub(crate) fn sub_command_selected(
        active: String,
        commands: Vec<Command<R>>,
        printer: Printer,
        user_interface: Rc<dyn UserInterface>,
    ) -> Self {
        Self {
            state: DispatchState::SubCommandSelected {
                active,
                commands,
                printer,
                user_interface,
            },
        }
    }

    /// The dispatch mode, or `None` when idle.
    pub fn mode(&self) -> Option<DispatchMode> {
        match &self.state {
            DispatchState::Idle => None,
            DispatchState::OptionTriggered { .. } => Some(DispatchMode::OptionTriggered),
            DispatchState::SubCommandSelected { .. } => Some(DispatchMode::SubCommandSelected),
        }
    }

    /// The sub-command named on the command line.
    pub fn active(&self) -> Option<&str> {
        match &self.state {
            DispatchState::SubCommandSelected { active, .. } => Some(active.as_str()),
            _ => None,
        }
    }

    /// The commands eligible in this dispatch mode, in declaration order.
    pub fn commands(&self) -> &[Command<R>] {
        match &self.state {
            DispatchState::Idle => &[],
            DispatchState::OptionTriggered { commands }
            | DispatchState::SubCommandSelected { commands, .. } => commands.as_slice(),
        }
    }

    /// Run the selected commands against `record`, returning how many handlers fired.
    ///
    /// In [`DispatchMode::OptionTriggered`] mode, every command whose trigger matches fires, in declaration order.
    /// Each trigger is evaluated just before its command would fire, so it observes the effects of earlier handlers.
    ///
    /// In [`DispatchMode::SubCommandSelected`] mode, the command named by the first positional token fires.
    /// An unknown name prints the error followed by the usage, and fails with [`BindError::Usage`].
    pub fn run(self, record: &mut R) -> Result<usize, BindError> {
        match self.state {
            DispatchState::Idle => Ok(0),
            DispatchState::OptionTriggered { commands } => {
                let mut fired = 0;

                for mut command in commands {
                    if command.triggered(record) {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!(
                                "Firing '{}' for flag '{}'.",
                                command.handler_name(),
                                command.name()
                            );
                        }
                        command.invoke(record);
                        fired += 1;
                    }
                }

                Ok(fired)
            }
            DispatchState::SubCommandSelected {
                active,
                commands,
                printer,
                user_interface,
            } => match commands.into_iter().find(|command| command.name() == active) {
                Some(mut command) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Firing '{}' for sub-command '{active}'.", command.handler_name());
                    }
                    command.invoke(record);
                    Ok(1)
                }
                None => {
                    let error = BindError::Usage(format!("Unknown sub-command '{active}'."));
                    user_interface.print_error(&error);
                    printer.print_help(&*user_interface);
                    Err(error)
                }
            },
        }
    }
}
