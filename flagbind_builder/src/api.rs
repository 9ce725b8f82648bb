mod annotation;
mod binder;
mod command;
mod core;
mod global;
mod schema;

pub(crate) use binder::*;
pub use command::*;
pub use core::*;
pub use global::*;
pub(crate) use schema::{FlagEntry, SchemaParts};
pub use schema::{Flag, Schema, SubCommand};
