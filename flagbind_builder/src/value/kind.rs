use std::time::Duration;

/// The bit width of an integer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
    /// The platform pointer width (`isize`/`usize`).
    Pointer,
}

impl Width {
    /// The number of bits for this width.
    pub fn bits(&self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
            Width::Pointer => usize::BITS,
        }
    }
}

/// The bit width of a floating point kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// `f32`.
    W32,
    /// `f64`.
    W64,
}

/// A primitive kind, convertible from a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// `bool`.
    Bool,
    /// A signed integer of the given width.
    Int(Width),
    /// An unsigned integer of the given width.
    Uint(Width),
    /// A float of the given width.
    Float(FloatWidth),
    /// `String`.
    Str,
}

impl std::fmt::Display for AtomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomKind::Bool => write!(f, "bool"),
            AtomKind::Int(Width::Pointer) => write!(f, "isize"),
            AtomKind::Int(width) => write!(f, "i{}", width.bits()),
            AtomKind::Uint(Width::Pointer) => write!(f, "usize"),
            AtomKind::Uint(width) => write!(f, "u{}", width.bits()),
            AtomKind::Float(FloatWidth::W32) => write!(f, "f32"),
            AtomKind::Float(FloatWidth::W64) => write!(f, "f64"),
            AtomKind::Str => write!(f, "String"),
        }
    }
}

/// The declared kind of a bound field.
///
/// Sequences and mappings are described recursively so that the dynamic parser can report
/// element kinds it has no conversion rule for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A single primitive.
    Atom(AtomKind),
    /// Elapsed time (`std::time::Duration`).
    Duration,
    /// An ordered sequence of elements.
    Sequence(Box<Kind>),
    /// A key-unique mapping.
    Mapping(Box<Kind>, Box<Kind>),
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Atom(atom) => write!(f, "{atom}"),
            Kind::Duration => write!(f, "Duration"),
            Kind::Sequence(element) => write!(f, "Vec<{element}>"),
            Kind::Mapping(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}

/// A single converted primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomValue {
    /// A converted `bool`.
    Bool(bool),
    /// Any signed integer, already range checked against its width.
    Int(i64),
    /// Any unsigned integer, already range checked against its width.
    Uint(u64),
    /// Any float; `f32` values are widened losslessly.
    Float(f64),
    /// A `String`.
    Str(String),
}

/// A converted field value, ready to be moved into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single primitive.
    Atom(AtomValue),
    /// Elapsed time.
    Duration(Duration),
    /// Elements in input order.
    Sequence(Vec<AtomValue>),
    /// Key/value pairs in first-insertion order, keys unique.
    Mapping(Vec<(AtomValue, AtomValue)>),
}
