use thiserror::Error;

mod atom;
mod bindable;
mod composite;
mod duration;
mod kind;

pub use atom::parse_atom;
pub use bindable::{Bindable, Element};
pub use composite::parse_value;
pub use duration::parse_duration;
pub use kind::*;

/// The ways a literal can fail to convert into a field kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The literal is not valid syntax for the kind.
    #[error("'{literal}' cannot convert to {kind}.")]
    MalformedLiteral {
        /// The offending literal.
        literal: String,
        /// The target kind.
        kind: String,
    },
    /// The literal is well formed but does not fit the width of the kind.
    #[error("'{literal}' is out of range for {kind}.")]
    OutOfRange {
        /// The offending literal.
        literal: String,
        /// The target kind.
        kind: String,
    },
    /// There is no conversion rule for the kind.
    #[error("unsupported type {kind}.")]
    UnsupportedType {
        /// The kind without a conversion rule.
        kind: String,
    },
}

impl ConvertError {
    pub(crate) fn malformed(literal: &str, kind: impl std::fmt::Display) -> Self {
        ConvertError::MalformedLiteral {
            literal: literal.to_string(),
            kind: kind.to_string(),
        }
    }

    pub(crate) fn out_of_range(literal: &str, kind: impl std::fmt::Display) -> Self {
        ConvertError::OutOfRange {
            literal: literal.to_string(),
            kind: kind.to_string(),
        }
    }

    pub(crate) fn unsupported(kind: impl std::fmt::Display) -> Self {
        ConvertError::UnsupportedType {
            kind: kind.to_string(),
        }
    }
}
