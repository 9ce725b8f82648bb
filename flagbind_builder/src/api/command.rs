use crate::model::{DispatchMode, Observed, Trigger};

/// How a [`Command`] is selected for dispatch.
pub enum Selector<R> {
    /// Selected when `trigger` matches the value `probe` observes on the record.
    OptionTriggered {
        /// The condition to match.
        trigger: Trigger,
        /// Reads the current value of the flag from the record.
        probe: Box<dyn Fn(&mut R) -> Option<Observed>>,
    },
    /// Selected when the first positional token equals the command name.
    SubCommandSelected,
}

/// A dispatchable command, built during registration and consumed by the [`crate::Dispatcher`].
pub struct Command<R> {
    name: String,
    handler_name: String,
    usage: String,
    selector: Selector<R>,
    handler: Box<dyn FnMut(&mut R)>,
}

impl<R> std::fmt::Debug for Command<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("handler_name", &self.handler_name)
            .field("mode", &self.mode())
            .field("trigger", &self.trigger())
            .finish()
    }
}

impl<R> Command<R> {
    pub(crate) fn new(
        name: String,
        handler_name: String,
        usage: String,
        selector: Selector<R>,
        handler: Box<dyn FnMut(&mut R)>,
    ) -> Self {
        Self {
            name,
            handler_name,
            usage,
            selector,
            handler,
        }
    }

    /// The flag name (option mode) or sub-command name (sub-command mode).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identifier of the handler, for display.
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// The usage text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The dispatch mode under which this command is eligible.
    pub fn mode(&self) -> DispatchMode {
        match self.selector {
            Selector::OptionTriggered { .. } => DispatchMode::OptionTriggered,
            Selector::SubCommandSelected => DispatchMode::SubCommandSelected,
        }
    }

    /// The trigger of an option-triggered command.
    pub fn trigger(&self) -> Option<Trigger> {
        match &self.selector {
            Selector::OptionTriggered { trigger, .. } => Some(*trigger),
            Selector::SubCommandSelected => None,
        }
    }

    /// Whether the trigger matches the record's current value.
    /// Sub-command selected commands never match here.
    pub(crate) fn triggered(&self, record: &mut R) -> bool {
        match &self.selector {
            Selector::OptionTriggered { trigger, probe } => {
                probe(record).map_or(false, |observed| trigger.matches(observed))
            }
            Selector::SubCommandSelected => false,
        }
    }

    pub(crate) fn invoke(&mut self, record: &mut R) {
        (self.handler)(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Record {
        verbose: bool,
        calls: u32,
    }

    fn verbose(trigger: Trigger) -> Command<Record> {
        Command::new(
            "verbose".to_string(),
            "verbose_command".to_string(),
            "be loud".to_string(),
            Selector::OptionTriggered {
                trigger,
                probe: Box::new(|r: &mut Record| Some(Observed::Switch(r.verbose))),
            },
            Box::new(|r: &mut Record| r.calls += 1),
        )
    }

    #[test]
    fn accessors() {
        let command = verbose(Trigger::False);
        assert_eq!(command.name(), "verbose");
        assert_eq!(command.handler_name(), "verbose_command");
        assert_eq!(command.usage(), "be loud");
        assert_eq!(command.mode(), DispatchMode::OptionTriggered);
        assert_eq!(command.trigger(), Some(Trigger::False));
    }

    #[test]
    fn triggered() {
        let mut record = Record::default();
        let on_true = verbose(Trigger::True);
        let on_false = verbose(Trigger::False);

        assert!(!on_true.triggered(&mut record));
        assert!(on_false.triggered(&mut record));

        record.verbose = true;
        assert!(on_true.triggered(&mut record));
        assert!(!on_false.triggered(&mut record));
    }

    #[test]
    fn invoke() {
        let mut record = Record::default();
        let mut command = verbose(Trigger::True);

        command.invoke(&mut record);
        command.invoke(&mut record);

        assert_eq!(record.calls, 2);
    }

    #[test]
    fn sub_command() {
        let mut record = Record::default();
        let command: Command<Record> = Command::new(
            "show".to_string(),
            "show_command".to_string(),
            String::default(),
            Selector::SubCommandSelected,
            Box::new(|_: &mut Record| {}),
        );

        assert_eq!(command.mode(), DispatchMode::SubCommandSelected);
        assert_eq!(command.trigger(), None);
        assert!(!command.triggered(&mut record));
    }
}
