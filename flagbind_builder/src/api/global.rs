use std::env;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::FlagParser;
use crate::dispatch::Dispatcher;
use crate::model::{Config, DispatchMode};
use crate::parser::{terminal_width, BindError, ConfigError, ConsoleInterface, UserInterface};
use crate::prelude::Record;

static DEFAULT_CONFIG: OnceCell<Config> = OnceCell::new();
static DEFAULT_PARSED: AtomicBool = AtomicBool::new(false);

/// Configure the process-wide default parser.
/// May be called at most once, and only before the first parse.
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::Config;
///
/// flagbind::configure(Config::new(",", ":").unwrap()).unwrap();
/// assert!(flagbind::configure(Config::default()).is_err());
/// ```
pub fn configure(config: Config) -> Result<(), ConfigError> {
    DEFAULT_CONFIG
        .set(config)
        .map_err(|_| ConfigError("the default parser is already configured.".to_string()))
}

fn program() -> String {
    env::args()
        .next()
        .as_deref()
        .and_then(|path| Path::new(path).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_string())
}

fn default_tokens<R: Record>(
    record: &mut R,
    tokens: &[&str],
    user_interface: Rc<dyn UserInterface>,
) -> Result<Dispatcher<R>, BindError> {
    if DEFAULT_PARSED.swap(true, Ordering::SeqCst) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("The default parser has already parsed, skipping.");
        }
        return Ok(Dispatcher::idle());
    }

    let config = DEFAULT_CONFIG.get_or_init(Config::default);
    let mut parser = FlagParser::new(program(), DispatchMode::OptionTriggered)
        .config(config)
        .build_with_interface(terminal_width(), user_interface)?;
    parser.parse_tokens(record, tokens)
}

/// Bind `tokens` onto `record` with the process-wide default parser, in [`DispatchMode::OptionTriggered`] mode.
///
/// The default parser parses once per process.
/// Subsequent calls, including those of [`parse`] and [`parse_and_run_command`], are no-ops producing an idle [`Dispatcher`].
pub fn parse_tokens<R: Record>(
    record: &mut R,
    tokens: &[&str],
) -> Result<Dispatcher<R>, BindError> {
    default_tokens(record, tokens, Rc::new(ConsoleInterface::default()))
}

/// Bind the command line of this process onto `record` with the process-wide default parser.
///
/// On error, exits with the error's [`BindError::exit_code`] (via [`std::process::exit`]).
pub fn parse<R: Record>(record: &mut R) -> Dispatcher<R> {
    let command_input: Vec<String> = env::args().skip(1).collect();
    let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

    match parse_tokens(record, tokens.as_slice()) {
        Ok(dispatcher) => dispatcher,
        Err(error) => std::process::exit(error.exit_code()),
    }
}

/// Bind the command line of this process onto `record` with the process-wide default parser, then run its commands.
///
/// On error, exits with the error's [`BindError::exit_code`] (via [`std::process::exit`]).
pub fn parse_and_run_command<R: Record>(record: &mut R) -> usize {
    let dispatcher = parse(record);

    match dispatcher.run(record) {
        Ok(fired) => fired,
        Err(error) => std::process::exit(error.exit_code()),
    }
}
