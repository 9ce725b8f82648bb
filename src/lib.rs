//! `flagbind` binds command line flags onto the fields of a struct, and dispatches commands from them.
//!
//! A *record* is a flat struct whose fields are declared as flags.
//! Parsing converts each flag's text into the field's type, in three layers:
//! * The flag's default literal.
//! * The flag's provider: a method computing the value from the record.
//! * The command line.
//!
//! Supported field types are `bool`, `String`, the integers, `f32`/`f64`, [`std::time::Duration`], `Vec<T>` and `HashMap<K, V>`/`BTreeMap<K, V>` of those atoms.
//! Sequence items are separated by `@`, and mapping keys from values by `=` (both configurable).
//!
//! After parsing, a [`Dispatcher`] runs the record's *commands* under one of two [`DispatchMode`]s:
//! * [`DispatchMode::OptionTriggered`]: every `bool`/`String` flag carrying a command fires it when its [`Trigger`] holds, in declaration order.
//! * [`DispatchMode::SubCommandSelected`]: the first token of the command line names the single sub-command to run.
//!
//! # Usage
//! Via the [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/option_commands.rs")]
//! ```
//!
//! ```console
//! $ option_commands -h
//! usage: option_commands [-h] [-addr ADDR] [-age AGE] [-header HEADER] [-n NAME] [-salary SALARY] [-show_detail] [-show_list] [-sleep SLEEP]
//! ...
//!
//! $ option_commands -show_list -addr home@work
//! show list: ["home", "work"]
//! ```
//!
//! The same program may be built by hand, by implementing [`Record`] over a [`Schema`]:
//! ```no_run
#![doc = include_str!("../demos/builder.rs")]
//! ```
//!
//! # Sub-commands
//! ```no_run
#![doc = include_str!("../demos/sub_commands.rs")]
//! ```
//!
//! ```console
//! $ store list -limit 2 apple banana cherry
//! apple
//! banana
//!
//! $ store -limit 2
//! Usage error: expected SUB_COMMAND as the first argument.
//! usage: store SUB_COMMAND [-h] [-l LIMIT] [-verbose]
//! ...
//! ```
//!
//! # Default parser
//! [`parse`] and [`parse_and_run_command`] use a process-wide parser, which parses at most once.
//! Its separators are set by calling [`configure`] beforehand.
pub mod derive;
pub use flagbind_builder::*;
