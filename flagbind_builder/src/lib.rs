//! Builder module for `flagbind`.
//! See [documentation root](https://docs.rs/flagbind/latest/flagbind/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod dispatch;
mod model;
mod parser;
pub mod prelude;
mod value;

pub use api::*;
pub use dispatch::Dispatcher;
pub use model::*;
pub use parser::{BindError, ConfigError, GeneralParser, ParseError};
pub use prelude::Record;
pub use value::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
