use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Duration;

use crate::model::{Observed, Subject};
use crate::value::{AtomKind, AtomValue, FloatWidth, Kind, Value, Width};

/// Behaviour for primitive types that may appear on their own, or as the element of a sequence or mapping.
pub trait Element: Sized {
    /// The primitive kind of this type.
    fn atom_kind() -> AtomKind;

    /// Narrow a converted primitive back into this type.
    /// Returns `None` when the primitive is of a different kind.
    fn from_atom(value: AtomValue) -> Option<Self>;
}

/// Behaviour for types that may be bound to a flag.
///
/// We use this at the bottom of the binding object graph so the compiler can maintain each field's type.
/// Types that do not implement `Bindable` cannot be registered, so unsupported fields are rejected at compile time.
pub trait Bindable: Default + Sized {
    /// The declared kind of this type.
    fn kind() -> Kind;

    /// Narrow a converted value back into this type.
    /// Returns `None` when the value is of a different kind.
    fn from_value(value: Value) -> Option<Self>;

    /// The subject a command trigger may observe on this type, if any.
    fn subject() -> Option<Subject> {
        None
    }

    /// Observe the current value for the purpose of evaluating a command trigger.
    fn observe(&self) -> Option<Observed> {
        None
    }
}

macro_rules! integer_element {
    ($type:ty, $variant:ident, $width:expr) => {
        impl Element for $type {
            fn atom_kind() -> AtomKind {
                AtomKind::$variant($width)
            }

            fn from_atom(value: AtomValue) -> Option<Self> {
                match value {
                    AtomValue::$variant(inner) => <$type>::try_from(inner).ok(),
                    _ => None,
                }
            }
        }
    };
}

integer_element!(i8, Int, Width::W8);
integer_element!(i16, Int, Width::W16);
integer_element!(i32, Int, Width::W32);
integer_element!(i64, Int, Width::W64);
integer_element!(isize, Int, Width::Pointer);
integer_element!(u8, Uint, Width::W8);
integer_element!(u16, Uint, Width::W16);
integer_element!(u32, Uint, Width::W32);
integer_element!(u64, Uint, Width::W64);
integer_element!(usize, Uint, Width::Pointer);

impl Element for f32 {
    fn atom_kind() -> AtomKind {
        AtomKind::Float(FloatWidth::W32)
    }

    fn from_atom(value: AtomValue) -> Option<Self> {
        match value {
            // Widened from an `f32` parse, so the narrowing is exact.
            AtomValue::Float(inner) => Some(inner as f32),
            _ => None,
        }
    }
}

impl Element for f64 {
    fn atom_kind() -> AtomKind {
        AtomKind::Float(FloatWidth::W64)
    }

    fn from_atom(value: AtomValue) -> Option<Self> {
        match value {
            AtomValue::Float(inner) => Some(inner),
            _ => None,
        }
    }
}

impl Element for bool {
    fn atom_kind() -> AtomKind {
        AtomKind::Bool
    }

    fn from_atom(value: AtomValue) -> Option<Self> {
        match value {
            AtomValue::Bool(inner) => Some(inner),
            _ => None,
        }
    }
}

impl Element for String {
    fn atom_kind() -> AtomKind {
        AtomKind::Str
    }

    fn from_atom(value: AtomValue) -> Option<Self> {
        match value {
            AtomValue::Str(inner) => Some(inner),
            _ => None,
        }
    }
}

macro_rules! atom_bindable {
    ($($type:ty),*) => {
        $(
            impl Bindable for $type {
                fn kind() -> Kind {
                    Kind::Atom(<$type as Element>::atom_kind())
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Atom(atom) => <$type as Element>::from_atom(atom),
                        _ => None,
                    }
                }
            }
        )*
    };
}

atom_bindable!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Bindable for bool {
    fn kind() -> Kind {
        Kind::Atom(AtomKind::Bool)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Atom(atom) => bool::from_atom(atom),
            _ => None,
        }
    }

    fn subject() -> Option<Subject> {
        Some(Subject::Switch)
    }

    fn observe(&self) -> Option<Observed> {
        Some(Observed::Switch(*self))
    }
}

impl Bindable for String {
    fn kind() -> Kind {
        Kind::Atom(AtomKind::Str)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Atom(atom) => String::from_atom(atom),
            _ => None,
        }
    }

    fn subject() -> Option<Subject> {
        Some(Subject::Text)
    }

    fn observe(&self) -> Option<Observed> {
        Some(Observed::Text {
            empty: self.is_empty(),
        })
    }
}

impl Bindable for Duration {
    fn kind() -> Kind {
        Kind::Duration
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(inner) => Some(inner),
            _ => None,
        }
    }
}

impl<T: Element> Bindable for Vec<T> {
    fn kind() -> Kind {
        Kind::Sequence(Box::new(Kind::Atom(T::atom_kind())))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::from_atom).collect(),
            _ => None,
        }
    }
}

impl<K, V> Bindable for HashMap<K, V>
where
    K: Element + Eq + Hash,
    V: Element,
{
    fn kind() -> Kind {
        Kind::Mapping(
            Box::new(Kind::Atom(K::atom_kind())),
            Box::new(Kind::Atom(V::atom_kind())),
        )
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(pairs) => pairs
                .into_iter()
                .map(|(key, value)| Some((K::from_atom(key)?, V::from_atom(value)?)))
                .collect(),
            _ => None,
        }
    }
}

impl<K, V> Bindable for BTreeMap<K, V>
where
    K: Element + Ord,
    V: Element,
{
    fn kind() -> Kind {
        Kind::Mapping(
            Box::new(Kind::Atom(K::atom_kind())),
            Box::new(Kind::Atom(V::atom_kind())),
        )
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(pairs) => pairs
                .into_iter()
                .map(|(key, value)| Some((K::from_atom(key)?, V::from_atom(value)?)))
                .collect(),
            _ => None,
        }
    }
}
