use std::num::IntErrorKind;

use crate::value::{AtomKind, AtomValue, ConvertError, FloatWidth, Kind, Width};

/// Convert a single token into a primitive of the requested kind.
///
/// Failures always propagate; it is up to the caller to decide whether a failure should fall back to a default.
/// Only [`Kind::Atom`] kinds have a conversion rule, every other kind is [`ConvertError::UnsupportedType`].
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::{parse_atom, AtomKind, AtomValue, Kind, Width};
///
/// let kind = Kind::Atom(AtomKind::Int(Width::W8));
/// assert_eq!(parse_atom(&kind, "-12").unwrap(), AtomValue::Int(-12));
/// assert!(parse_atom(&kind, "200").is_err());
/// ```
pub fn parse_atom(kind: &Kind, literal: &str) -> Result<AtomValue, ConvertError> {
    match kind {
        Kind::Atom(atom) => convert(*atom, literal),
        _ => Err(ConvertError::unsupported(kind)),
    }
}

fn convert(kind: AtomKind, literal: &str) -> Result<AtomValue, ConvertError> {
    match kind {
        AtomKind::Bool => parse_bool(literal)
            .map(AtomValue::Bool)
            .ok_or_else(|| ConvertError::malformed(literal, kind)),
        AtomKind::Int(width) => parse_int(literal, width).map(AtomValue::Int),
        AtomKind::Uint(width) => parse_uint(literal, width).map(AtomValue::Uint),
        AtomKind::Float(width) => parse_float(literal, width).map(AtomValue::Float),
        AtomKind::Str => Ok(AtomValue::Str(literal.to_string())),
    }
}

pub(crate) fn parse_bool(literal: &str) -> Option<bool> {
    match literal {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_int(literal: &str, width: Width) -> Result<i64, ConvertError> {
    let kind = AtomKind::Int(width);
    let value = literal
        .parse::<i64>()
        .map_err(|error| match error.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ConvertError::out_of_range(literal, kind)
            }
            _ => ConvertError::malformed(literal, kind),
        })?;
    let bits = width.bits();

    if bits < 64 {
        let max = (1i64 << (bits - 1)) - 1;
        let min = -(1i64 << (bits - 1));

        if value < min || value > max {
            return Err(ConvertError::out_of_range(literal, kind));
        }
    }

    Ok(value)
}

fn parse_uint(literal: &str, width: Width) -> Result<u64, ConvertError> {
    let kind = AtomKind::Uint(width);

    // `u64::from_str` tolerates a leading '+', unsigned literals must not carry a sign.
    if literal.starts_with('+') {
        return Err(ConvertError::malformed(literal, kind));
    }

    let value = literal
        .parse::<u64>()
        .map_err(|error| match error.kind() {
            IntErrorKind::PosOverflow => ConvertError::out_of_range(literal, kind),
            _ => ConvertError::malformed(literal, kind),
        })?;
    let bits = width.bits();

    if bits < 64 && value > (1u64 << bits) - 1 {
        return Err(ConvertError::out_of_range(literal, kind));
    }

    Ok(value)
}

fn parse_float(literal: &str, width: FloatWidth) -> Result<f64, ConvertError> {
    let kind = AtomKind::Float(width);
    let value = match width {
        FloatWidth::W32 => literal.parse::<f32>().map(f64::from),
        FloatWidth::W64 => literal.parse::<f64>(),
    }
    .map_err(|_| ConvertError::malformed(literal, kind))?;

    // Finite literals that overflow the width parse as infinity.
    if value.is_infinite() && !names_infinity(literal) {
        return Err(ConvertError::out_of_range(literal, kind));
    }

    Ok(value)
}

fn names_infinity(literal: &str) -> bool {
    let unsigned = literal.trim_start_matches(|c| c == '+' || c == '-');
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn int(width: Width) -> Kind {
        Kind::Atom(AtomKind::Int(width))
    }

    fn uint(width: Width) -> Kind {
        Kind::Atom(AtomKind::Uint(width))
    }

    fn float(width: FloatWidth) -> Kind {
        Kind::Atom(AtomKind::Float(width))
    }

    #[rstest]
    #[case("1", true)]
    #[case("t", true)]
    #[case("T", true)]
    #[case("TRUE", true)]
    #[case("true", true)]
    #[case("True", true)]
    #[case("0", false)]
    #[case("f", false)]
    #[case("F", false)]
    #[case("FALSE", false)]
    #[case("false", false)]
    #[case("False", false)]
    fn bool_literals(#[case] literal: &str, #[case] expected: bool) {
        assert_eq!(
            parse_atom(&Kind::Atom(AtomKind::Bool), literal).unwrap(),
            AtomValue::Bool(expected)
        );
    }

    #[rstest]
    #[case("")]
    #[case("yes")]
    #[case("tRUE")]
    #[case("2")]
    #[case(" true")]
    fn bool_malformed(#[case] literal: &str) {
        let error = parse_atom(&Kind::Atom(AtomKind::Bool), literal).unwrap_err();
        assert_matches!(error, ConvertError::MalformedLiteral { literal: l, kind } => {
            assert_eq!(l, literal);
            assert_eq!(kind, "bool");
        });
    }

    #[rstest]
    #[case(Width::W8, "127", 127)]
    #[case(Width::W8, "-128", -128)]
    #[case(Width::W16, "32767", 32767)]
    #[case(Width::W16, "-32768", -32768)]
    #[case(Width::W32, "2147483647", 2147483647)]
    #[case(Width::W32, "-2147483648", -2147483648)]
    #[case(Width::W64, "9223372036854775807", i64::MAX)]
    #[case(Width::W64, "-9223372036854775808", i64::MIN)]
    #[case(Width::W32, "+7", 7)]
    #[case(Width::W32, "007", 7)]
    fn int_in_range(#[case] width: Width, #[case] literal: &str, #[case] expected: i64) {
        assert_eq!(
            parse_atom(&int(width), literal).unwrap(),
            AtomValue::Int(expected)
        );
    }

    #[rstest]
    #[case(Width::W8, "128")]
    #[case(Width::W8, "-129")]
    #[case(Width::W8, "200")]
    #[case(Width::W16, "32768")]
    #[case(Width::W16, "-32769")]
    #[case(Width::W32, "2147483648")]
    #[case(Width::W32, "-2147483649")]
    #[case(Width::W64, "9223372036854775808")]
    #[case(Width::W64, "-9223372036854775809")]
    fn int_out_of_range(#[case] width: Width, #[case] literal: &str) {
        assert_matches!(
            parse_atom(&int(width), literal).unwrap_err(),
            ConvertError::OutOfRange { .. }
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1.5")]
    #[case("0x10")]
    #[case("1_000")]
    #[case(" 1")]
    fn int_malformed(#[case] literal: &str) {
        assert_matches!(
            parse_atom(&int(Width::W32), literal).unwrap_err(),
            ConvertError::MalformedLiteral { .. }
        );
    }

    #[rstest]
    #[case(Width::W8, "255", 255)]
    #[case(Width::W16, "65535", 65535)]
    #[case(Width::W32, "4294967295", 4294967295)]
    #[case(Width::W64, "18446744073709551615", u64::MAX)]
    #[case(Width::W8, "0", 0)]
    fn uint_in_range(#[case] width: Width, #[case] literal: &str, #[case] expected: u64) {
        assert_eq!(
            parse_atom(&uint(width), literal).unwrap(),
            AtomValue::Uint(expected)
        );
    }

    #[rstest]
    #[case(Width::W8, "256")]
    #[case(Width::W16, "65536")]
    #[case(Width::W32, "4294967296")]
    #[case(Width::W64, "18446744073709551616")]
    fn uint_out_of_range(#[case] width: Width, #[case] literal: &str) {
        assert_matches!(
            parse_atom(&uint(width), literal).unwrap_err(),
            ConvertError::OutOfRange { .. }
        );
    }

    #[rstest]
    #[case("-1")]
    #[case("+1")]
    #[case("one")]
    fn uint_malformed(#[case] literal: &str) {
        assert_matches!(
            parse_atom(&uint(Width::W64), literal).unwrap_err(),
            ConvertError::MalformedLiteral { .. }
        );
    }

    #[test]
    fn pointer_width_limits() {
        let max = isize::MAX.to_string();
        assert_eq!(
            parse_atom(&int(Width::Pointer), &max).unwrap(),
            AtomValue::Int(isize::MAX as i64)
        );

        let max = usize::MAX.to_string();
        assert_eq!(
            parse_atom(&uint(Width::Pointer), &max).unwrap(),
            AtomValue::Uint(usize::MAX as u64)
        );
    }

    #[test]
    fn int_round_trip() {
        let mut rng = thread_rng();

        for _ in 0..500 {
            let value: i8 = rng.gen();
            assert_eq!(
                parse_atom(&int(Width::W8), &value.to_string()).unwrap(),
                AtomValue::Int(value as i64)
            );

            let value: i16 = rng.gen();
            assert_eq!(
                parse_atom(&int(Width::W16), &value.to_string()).unwrap(),
                AtomValue::Int(value as i64)
            );

            let value: i32 = rng.gen();
            assert_eq!(
                parse_atom(&int(Width::W32), &value.to_string()).unwrap(),
                AtomValue::Int(value as i64)
            );

            let value: i64 = rng.gen();
            assert_eq!(
                parse_atom(&int(Width::W64), &value.to_string()).unwrap(),
                AtomValue::Int(value)
            );
        }
    }

    #[test]
    fn uint_round_trip() {
        let mut rng = thread_rng();

        for _ in 0..500 {
            let value: u8 = rng.gen();
            assert_eq!(
                parse_atom(&uint(Width::W8), &value.to_string()).unwrap(),
                AtomValue::Uint(value as u64)
            );

            let value: u32 = rng.gen();
            assert_eq!(
                parse_atom(&uint(Width::W32), &value.to_string()).unwrap(),
                AtomValue::Uint(value as u64)
            );

            let value: u64 = rng.gen();
            assert_eq!(
                parse_atom(&uint(Width::W64), &value.to_string()).unwrap(),
                AtomValue::Uint(value)
            );
        }
    }

    #[rstest]
    #[case(FloatWidth::W64, "1200.0", 1200.0)]
    #[case(FloatWidth::W64, "-2.5e3", -2500.0)]
    #[case(FloatWidth::W64, "1e308", 1e308)]
    #[case(FloatWidth::W32, "0.5", 0.5)]
    #[case(FloatWidth::W32, "3.4e38", 3.4e38_f32 as f64)]
    fn float_in_range(#[case] width: FloatWidth, #[case] literal: &str, #[case] expected: f64) {
        assert_eq!(
            parse_atom(&float(width), literal).unwrap(),
            AtomValue::Float(expected)
        );
    }

    #[rstest]
    #[case(FloatWidth::W32, "3.5e38")]
    #[case(FloatWidth::W32, "-1e39")]
    #[case(FloatWidth::W64, "1e309")]
    fn float_out_of_range(#[case] width: FloatWidth, #[case] literal: &str) {
        assert_matches!(
            parse_atom(&float(width), literal).unwrap_err(),
            ConvertError::OutOfRange { .. }
        );
    }

    #[rstest]
    #[case("inf")]
    #[case("-inf")]
    #[case("+Infinity")]
    fn float_infinity(#[case] literal: &str) {
        let value = parse_atom(&float(FloatWidth::W32), literal).unwrap();
        assert_matches!(value, AtomValue::Float(v) => assert!(v.is_infinite()));
    }

    #[test]
    fn float_malformed() {
        assert_matches!(
            parse_atom(&float(FloatWidth::W64), "1,5").unwrap_err(),
            ConvertError::MalformedLiteral { .. }
        );
    }

    #[test]
    fn string_identity() {
        assert_eq!(
            parse_atom(&Kind::Atom(AtomKind::Str), " a@b=c ").unwrap(),
            AtomValue::Str(" a@b=c ".to_string())
        );
    }

    #[rstest]
    #[case(Kind::Duration)]
    #[case(Kind::Sequence(Box::new(Kind::Atom(AtomKind::Str))))]
    #[case(Kind::Mapping(
        Box::new(Kind::Atom(AtomKind::Str)),
        Box::new(Kind::Atom(AtomKind::Str))
    ))]
    fn unsupported(#[case] kind: Kind) {
        assert_eq!(
            parse_atom(&kind, "x").unwrap_err(),
            ConvertError::UnsupportedType {
                kind: kind.to_string()
            }
        );
    }
}
