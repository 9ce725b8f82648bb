pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: &str = "h";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
pub(crate) const FLAG_PREFIX: char = '-';
pub(crate) const DEFAULT_ITEM_SEPARATOR: &str = "@";
pub(crate) const DEFAULT_PAIR_SEPARATOR: &str = "=";
pub(crate) const COMMAND_SUFFIX: &str = "_command";
pub(crate) const SUB_COMMAND_META: &str = "SUB_COMMAND";
