#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::value::{parse_atom, AtomValue, ConvertError, Kind, Value};

/// Convert a literal into a value of any atomic, sequence or mapping kind.
///
/// Sequences split the literal on `item_separator`, keeping element order and duplicates.
/// Mappings further split each item on `pair_separator`: the first piece is the key, the second is the value.
/// Items with fewer than two pieces are skipped, and a repeated key overwrites the earlier value.
/// An empty literal converts to an empty sequence or mapping.
///
/// The first element that fails to convert aborts the whole conversion.
/// Durations are handled by their own grammar (see [`crate::parse_duration`]) and are [`ConvertError::UnsupportedType`] here.
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::{parse_value, AtomKind, AtomValue, Kind, Value, Width};
///
/// let kind = Kind::Sequence(Box::new(Kind::Atom(AtomKind::Int(Width::W32))));
/// assert_eq!(
///     parse_value(&kind, "1@2@2", "@", "=").unwrap(),
///     Value::Sequence(vec![AtomValue::Int(1), AtomValue::Int(2), AtomValue::Int(2)])
/// );
/// ```
pub fn parse_value(
    kind: &Kind,
    literal: &str,
    item_separator: &str,
    pair_separator: &str,
) -> Result<Value, ConvertError> {
    match kind {
        Kind::Atom(_) => parse_atom(kind, literal).map(Value::Atom),
        Kind::Duration => Err(ConvertError::unsupported(kind)),
        Kind::Sequence(element) => {
            check_atomic(element)?;

            if literal.is_empty() {
                return Ok(Value::Sequence(Vec::default()));
            }

            literal
                .split(item_separator)
                .map(|item| parse_atom(element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence)
        }
        Kind::Mapping(key_kind, value_kind) => {
            check_atomic(key_kind)?;
            check_atomic(value_kind)?;
            let mut pairs: Vec<(AtomValue, AtomValue)> = Vec::default();

            if literal.is_empty() {
                return Ok(Value::Mapping(pairs));
            }

            for item in literal.split(item_separator) {
                let pieces: Vec<&str> = item.split(pair_separator).collect();

                if pieces.len() < 2 {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Skipping mapping item '{item}' without a '{pair_separator}'.");
                    }
                    continue;
                }

                let key = parse_atom(key_kind, pieces[0])?;
                let value = parse_atom(value_kind, pieces[1])?;
                upsert(&mut pairs, key, value);
            }

            Ok(Value::Mapping(pairs))
        }
    }
}

fn check_atomic(kind: &Kind) -> Result<(), ConvertError> {
    match kind {
        Kind::Atom(_) => Ok(()),
        _ => Err(ConvertError::unsupported(kind)),
    }
}

fn upsert(pairs: &mut Vec<(AtomValue, AtomValue)>, key: AtomValue, value: AtomValue) {
    match pairs.iter_mut().find(|(existing, _)| existing == &key) {
        Some(pair) => pair.1 = value,
        None => pairs.push((key, value)),
    }
}
