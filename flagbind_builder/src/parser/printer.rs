use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::model::DispatchMode;
use crate::parser::interface::UserInterface;
use crate::parser::Columns;

#[derive(Debug, Clone)]
pub(crate) struct FlagUsage {
    name: String,
    short: Option<String>,
    usage: String,
    default: String,
    switch: bool,
}

impl FlagUsage {
    pub(crate) fn new(
        name: String,
        short: Option<String>,
        usage: String,
        default: String,
        switch: bool,
    ) -> Self {
        Self {
            name,
            short,
            usage,
            default,
            switch,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SubCommandUsage {
    name: String,
    usage: String,
}

impl SubCommandUsage {
    pub(crate) fn new(name: String, usage: String) -> Self {
        Self { name, usage }
    }
}

pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    mode: DispatchMode,
    sub_commands: Vec<SubCommandUsage>,
    flags: Vec<FlagUsage>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

pub(crate) fn terminal_width() -> Option<usize> {
    if let Some((Width(terminal_width), _)) = terminal_size() {
        Some(terminal_width as usize)
    } else {
        None
    }
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(
            "program".to_string(),
            None,
            DispatchMode::OptionTriggered,
            Vec::default(),
            Vec::default(),
            None,
        )
    }

    pub(crate) fn new(
        program: String,
        about: Option<String>,
        mode: DispatchMode,
        sub_commands: Vec<SubCommandUsage>,
        mut flags: Vec<FlagUsage>,
        terminal_width: Option<usize>,
    ) -> Self {
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            program,
            about,
            mode,
            sub_commands,
            flags,
            terminal_width,
        }
    }

    /// The lines of the usage message.
    pub(crate) fn render(&self) -> Vec<String> {
        let help_flags = format!("{FLAG_PREFIX}{HELP_SHORT}, {FLAG_PREFIX}{HELP_NAME}");
        let mut summary = vec![format!("[{FLAG_PREFIX}{HELP_SHORT}]")];
        let mut left_column_width = help_flags.chars().count();
        let mut middle_column_width = HELP_MESSAGE.len() + MAIN_INDENT;
        // (sort key, left column, middle column)
        let mut rows: Vec<(&str, String, String)> = Vec::default();

        for FlagUsage {
            name,
            short,
            usage,
            default,
            switch,
        } in &self.flags
        {
            let meta = if *switch {
                String::default()
            } else {
                format!(" {}", name.to_ascii_uppercase().replace('-', "_"))
            };
            let description = if default.is_empty() {
                usage.clone()
            } else {
                annotate(usage, format!("(default {default})"))
            };
            rows.push((name.as_str(), format!("{FLAG_PREFIX}{name}{meta}"), description));

            match short {
                Some(s) => {
                    summary.push(format!("[{FLAG_PREFIX}{s}{meta}]"));
                    rows.push((
                        s.as_str(),
                        format!("{FLAG_PREFIX}{s}{meta}"),
                        annotate(usage, format!("(same as {FLAG_PREFIX}{name})")),
                    ));
                }
                None => {
                    summary.push(format!("[{FLAG_PREFIX}{name}{meta}]"));
                }
            }
        }

        rows.sort_by(|a, b| a.0.cmp(b.0));

        for (_, left, middle) in &rows {
            left_column_width = std::cmp::max(left_column_width, left.chars().count());
            middle_column_width =
                std::cmp::max(middle_column_width, middle.chars().count() + MAIN_INDENT);
        }

        let sub_commands: &[SubCommandUsage] = match self.mode {
            DispatchMode::SubCommandSelected => &self.sub_commands,
            DispatchMode::OptionTriggered => &[],
        };

        for SubCommandUsage { name, usage } in sub_commands {
            left_column_width = std::cmp::max(left_column_width, name.chars().count());
            middle_column_width =
                std::cmp::max(middle_column_width, usage.chars().count() + MAIN_INDENT);
        }

        let columns = Columns::fit(
            MAIN_INDENT,
            left_column_width,
            PADDING_WIDTH,
            middle_column_width,
            self.terminal_width,
        );

        let mut lines = Vec::default();

        match self.mode {
            DispatchMode::OptionTriggered => lines.push(format!(
                "usage: {p} {s}",
                p = self.program,
                s = summary.join(" ")
            )),
            DispatchMode::SubCommandSelected => lines.push(format!(
                "usage: {p} {SUB_COMMAND_META} {s}",
                p = self.program,
                s = summary.join(" ")
            )),
        }

        if let Some(about) = &self.about {
            lines.push(String::default());
            lines.push(about.clone());
        }

        if !sub_commands.is_empty() {
            lines.push(String::default());
            lines.push("sub-commands:".to_string());

            for SubCommandUsage { name, usage } in sub_commands {
                lines.extend(columns.row(name, usage));
            }
        }

        lines.push(String::default());
        lines.push("options:".to_string());
        lines.extend(columns.row(&help_flags, HELP_MESSAGE));

        for (_, left, middle) in &rows {
            lines.extend(columns.row(left, middle));
        }

        lines
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.render() {
            user_interface.print(line);
        }
    }
}

fn annotate(usage: &str, note: String) -> String {
    if usage.is_empty() {
        note
    } else {
        format!("{usage} {note}")
    }
}
