use std::time::Duration;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::Config;
use crate::value::{parse_duration, parse_value, AtomKind, Bindable, ConvertError, Kind, Value};

/// Behaviour to bind an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the binding object graph so that flags of different types may all be set by a single flag set.
pub(crate) trait AnonymousBinder<R> {
    /// Adopt the separators and fallbacks of the parser.
    fn configure(&mut self, config: &Config);

    /// Write the declared default literal into the record.
    /// A default that does not convert resets the field to its type's `Default`.
    fn apply_default(&mut self, record: &mut R);

    /// Overwrite the field with the provider's value, if there is a provider.
    fn apply_provider(&mut self, record: &mut R);

    /// Convert `literal` and write it into the record.
    /// On failure neither the record nor the current literal change.
    fn set(&mut self, record: &mut R, literal: &str) -> Result<(), ConvertError>;

    /// The last literal successfully applied to the field.
    /// A duration that fell back leaves it unchanged.
    fn current(&self) -> &str;

    /// Whether the flag may be given without a value.
    fn is_bool_flag(&self) -> bool;
}

/// The typed binder of one flag to one field of the record `R`.
pub(crate) struct Binder<R, T> {
    accessor: fn(&mut R) -> &mut T,
    default: Option<String>,
    provider: Option<Box<dyn Fn(&R) -> T>>,
    item_separator: String,
    pair_separator: String,
    duration_fallback: Duration,
    current: String,
}

impl<R, T> Binder<R, T>
where
    T: Bindable,
{
    pub(crate) fn new(
        accessor: fn(&mut R) -> &mut T,
        default: Option<String>,
        provider: Option<Box<dyn Fn(&R) -> T>>,
    ) -> Self {
        let config = Config::default();
        Self {
            accessor,
            default,
            provider,
            item_separator: config.item_separator().to_string(),
            pair_separator: config.pair_separator().to_string(),
            duration_fallback: config.duration_fallback(),
            current: String::default(),
        }
    }

    // The flag reports whether `literal` itself produced the value, as opposed to a duration fallback.
    fn convert(&self, literal: &str) -> Result<(T, bool), ConvertError> {
        let kind = T::kind();
        let (value, exact) = match kind {
            Kind::Duration => match parse_duration(literal) {
                Ok(duration) => (Value::Duration(duration), true),
                Err(_error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Duration '{literal}' did not parse ({_error}), falling back to {:?}.", self.duration_fallback);
                    }
                    (Value::Duration(self.duration_fallback), false)
                }
            },
            _ => (
                parse_value(&kind, literal, &self.item_separator, &self.pair_separator)?,
                true,
            ),
        };

        T::from_value(value)
            .map(|value| (value, exact))
            .ok_or_else(|| ConvertError::unsupported(&kind))
    }
}

impl<R, T> AnonymousBinder<R> for Binder<R, T>
where
    T: Bindable,
{
    fn configure(&mut self, config: &Config) {
        self.item_separator = config.item_separator().to_string();
        self.pair_separator = config.pair_separator().to_string();
        self.duration_fallback = config.duration_fallback();
    }

    fn apply_default(&mut self, record: &mut R) {
        let Some(default) = self.default.clone() else {
            // Without a declared default the field keeps its initial value.
            return;
        };

        match self.convert(&default) {
            Ok((value, exact)) => {
                *(self.accessor)(record) = value;

                if exact {
                    self.current = default;
                }
            }
            Err(_error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Default '{default}' did not convert ({_error}), resetting the field.");
                }
                *(self.accessor)(record) = T::default();
                self.current = String::default();
            }
        }
    }

    fn apply_provider(&mut self, record: &mut R) {
        if let Some(provider) = &self.provider {
            let value = provider(&*record);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Provider overrides the default '{}'.", self.current);
            }
            *(self.accessor)(record) = value;
        }
    }

    fn set(&mut self, record: &mut R, literal: &str) -> Result<(), ConvertError> {
        let (value, exact) = self.convert(literal)?;
        *(self.accessor)(record) = value;

        if exact {
            self.current = literal.to_string();
        }

        Ok(())
    }

    fn current(&self) -> &str {
        &self.current
    }

    fn is_bool_flag(&self) -> bool {
        T::kind() == Kind::Atom(AtomKind::Bool)
    }
}
