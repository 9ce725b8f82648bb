//! Traits which, typically, may be imported without concern: `use flagbind::prelude::*`.

use crate::api::Schema;
pub use crate::value::{Bindable, Element};

/// A record whose fields bind to command line flags.
///
/// Implemented by `#[derive(FlagRecord)]`, or by hand.
pub trait Record: Sized + 'static {
    /// The flags and commands of this record, in declaration order.
    fn schema() -> Schema<Self>;
}
