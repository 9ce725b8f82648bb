use std::cmp::{max, min};

use crate::parser::BindError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Descriptions wrap at no fewer than 17 characters: three words of average length 5.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;
// The share of the terminal the usage rows may fill.
const TERMINAL_SHARE: f64 = 0.95;

/// The layout of a usage row: an indented left column (a flag or sub-command), a gap, then the wrapped description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Columns {
    indent: usize,
    left: usize,
    gap: usize,
    text: usize,
}

impl Columns {
    fn new(indent: usize, left: usize, gap: usize, middle: usize) -> Self {
        Self {
            indent,
            left,
            gap,
            // The description always has room for a character and its hyphen.
            text: max(middle.saturating_sub(indent), 2),
        }
    }

    /// Lay out rows whose left column is `left` wide and whose widest description, indent included, is `middle` wide.
    pub(crate) fn fit(
        indent: usize,
        left: usize,
        gap: usize,
        middle: usize,
        terminal_width: Option<usize>,
    ) -> Self {
        let occupied = left + gap;
        let middle = match terminal_width {
            None => min(middle, MINIMUM_MIDDLE_WIDTH),
            Some(total) => {
                let preferred = max(middle, MINIMUM_MIDDLE_WIDTH);
                let target = (total as f64 * TERMINAL_SHARE) as usize;

                if preferred + occupied <= target {
                    preferred
                } else if occupied < total {
                    max(total - occupied, MINIMUM_MIDDLE_WIDTH)
                } else {
                    MINIMUM_MIDDLE_WIDTH
                }
            }
        };
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Usage columns: left {left}, gap {gap}, middle {middle} (terminal {terminal_width:?}).");
        }

        Self::new(indent, left, gap, middle)
    }

    /// Render one row, continuing the description on aligned lines as needed.
    pub(crate) fn row(&self, left: &str, description: &str) -> Vec<String> {
        let indent = " ".repeat(self.indent);
        let lines = wrap(description, self.text);

        if lines.is_empty() {
            return vec![format!("{indent}{left}")];
        }

        let gap = " ".repeat(self.gap);
        lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let label = if i == 0 { left } else { "" };
                format!("{indent}{label:width$}{gap}{text}", width = self.left)
            })
            .collect()
    }
}

// Greedy word wrap, measured in characters.
// A word longer than a line is broken over several, each break marked by a hyphen.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut line = String::default();

    for word in text.split(' ').filter(|word| !word.is_empty()) {
        let length = word.chars().count();

        if !line.is_empty() {
            if line.chars().count() + 1 + length <= width {
                line.push(' ');
                line.push_str(word);
                continue;
            }

            lines.push(std::mem::take(&mut line));
        }

        let mut rest: Vec<char> = word.chars().collect();

        while rest.len() > width {
            let tail = rest.split_off(width - 1);
            let mut piece: String = rest.iter().collect();
            piece.push('-');
            lines.push(piece);
            rest = tail;
        }

        line.extend(rest);
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: &BindError);
}

// Usage and errors both belong on standard error.
#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error(&self, error: &BindError) {
        eprintln!("{error}");
    }
}
