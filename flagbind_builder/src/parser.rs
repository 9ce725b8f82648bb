use thiserror::Error;

mod flagset;
mod interface;
mod middleware;
mod printer;

pub(crate) use flagset::*;
pub(crate) use interface::*;
pub use middleware::GeneralParser;
pub(crate) use printer::*;

/// An error in the configuration of flags, commands or separators.
/// These are programming errors, independent of the command line input.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// An error in the command line input.
#[derive(Debug, Error)]
#[error("Parse error: {0}")]
pub struct ParseError(pub(crate) String);

/// The ways binding a record to the command line may stop short of dispatch.
#[derive(Debug, Error)]
pub enum BindError {
    /// The flags, commands or separators are misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The command line input is invalid.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The command line does not select a valid sub-command.
    #[error("Usage error: {0}")]
    Usage(String),
    /// The help flag was given; usage has been printed.
    #[error("Help requested.")]
    Help,
}

impl BindError {
    /// The process exit code corresponding to this error: `0` for help, otherwise `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            BindError::Help => 0,
            _ => 1,
        }
    }
}
