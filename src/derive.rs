//! Derive Api for `flagbind` records.
//!
//! ### Getting Started
//! Instrument a struct with `#[derive(FlagRecord)]` to implement [`crate::Record`] from its fields.
//! Only fields annotated as a flag or sub-command take part, plus the residual `args: Vec<String>`.
//!
//! ```no_run
#![doc = include_str!("../demos/option_commands.rs")]
//! ```
//!
//! ### Field Configuration
//! Flags are declared with `#[flagbind(..)]`, in either the compact or the expanded form:
//! * `#[flagbind("name,default,usage")]`, where each component is trimmed and the trailing ones may be omitted.
//! * `#[flagbind(flag = "name", default = "..", usage = "..")]`.
//!
//! The forms may not be mixed on one field.
//! The following attributes may be added to a flag:
//! * `short = "s"` registers the alias `-s`.
//! * `provider` computes the value with the method `fn <field>_default(&self) -> T`, after every default has been applied.
//! `provider = "method"` names the method instead.
//! * `command` fires the method `fn <field>_command(&mut self)` in [`crate::DispatchMode::OptionTriggered`] mode.
//! `command = "method,trigger"` fires `<method>_command` instead, when the [`crate::Trigger`] (`true`, `false`, `empty` or `notempty`) holds.
//! Only `bool` and `String` fields may carry a command.
//!
//! Sub-commands are declared with `#[flagbind(sub_command = "name", usage = "..")]`.
//! The method `fn <field>_command(&mut self)` fires in [`crate::DispatchMode::SubCommandSelected`] mode when the first token is `name`.
//!
//! Invalid annotations are compile errors.
pub use flagbind_derive::*;
