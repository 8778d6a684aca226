use std::fmt;

use super::error::{CoercionError, ParseBoolError};

/// The scalar type a capture is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Captured text, assigned verbatim.
    Text,
    /// A base-10 integer of any primitive width.
    Integer,
    /// A 32-bit float.
    Float32,
    /// A 64-bit float.
    Float64,
    /// `true`/`false`/`1`/`0`/`t`/`f`, ASCII case-insensitive.
    Boolean,
}

/// How a field reacts to a capture, resolved once per field when a rule compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A plain scalar. Empty captures reset it to its default.
    Required(ValueKind),
    /// An `Option` of a scalar. Empty captures reset it to `None`.
    Optional(ValueKind),
    /// A type without a coercion. Reset on empty captures, otherwise left alone.
    Opaque,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Float32 => "f32",
            ValueKind::Float64 => "f64",
            ValueKind::Boolean => "bool",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Required(kind) => write!(f, "{kind}"),
            FieldKind::Optional(kind) => write!(f, "optional {kind}"),
            FieldKind::Opaque => f.write_str("opaque"),
        }
    }
}

/// A field type that can be filled from captured text.
///
/// Implemented for `String`, every primitive integer, `f32`, `f64`, `bool`,
/// and `Option` of each of them.
pub trait FieldValue: Default + Send + 'static {
    const KIND: FieldKind;

    /// Coerce a non-empty capture into a value of this type.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] when the text does not parse as this type.
    fn from_capture(text: &str) -> Result<Self, CoercionError>;
}

/// Parse a boolean the way most config formats spell one.
///
/// # Errors
///
/// Returns [`ParseBoolError`] for anything but `true`/`false`/`1`/`0`/`t`/`f`.
pub fn parse_bool(text: &str) -> Result<bool, ParseBoolError> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|t| text.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if FALSE.iter().any(|f| text.eq_ignore_ascii_case(f)) {
        Ok(false)
    } else {
        Err(ParseBoolError::new(text))
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Required(ValueKind::Text);

    fn from_capture(text: &str) -> Result<Self, CoercionError> {
        Ok(text.to_owned())
    }
}

impl FieldValue for Option<String> {
    const KIND: FieldKind = FieldKind::Optional(ValueKind::Text);

    fn from_capture(text: &str) -> Result<Self, CoercionError> {
        Ok(Some(text.to_owned()))
    }
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Required(ValueKind::Boolean);

    fn from_capture(text: &str) -> Result<Self, CoercionError> {
        Ok(parse_bool(text)?)
    }
}

impl FieldValue for Option<bool> {
    const KIND: FieldKind = FieldKind::Optional(ValueKind::Boolean);

    fn from_capture(text: &str) -> Result<Self, CoercionError> {
        Ok(Some(parse_bool(text)?))
    }
}

/// Reject a parse that overflowed to infinity unless the text spelled one out.
fn finite_or_spelled<T>(text: &str, value: T, is_infinite: bool) -> Result<T, CoercionError> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let spelled = ["inf", "infinity"]
        .iter()
        .any(|s| unsigned.eq_ignore_ascii_case(s));
    if is_infinite && !spelled {
        Err(CoercionError::FloatRange(text.to_owned()))
    } else {
        Ok(value)
    }
}

macro_rules! parsed_value {
    (@parse Integer, $ty:ty, $text:expr) => {
        $text.parse::<$ty>()?
    };
    (@parse $float:ident, $ty:ty, $text:expr) => {{
        let value = $text.parse::<$ty>()?;
        finite_or_spelled($text, value, value.is_infinite())?
    }};
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Required(ValueKind::$kind);

                fn from_capture(text: &str) -> Result<Self, CoercionError> {
                    Ok(parsed_value!(@parse $kind, $ty, text))
                }
            }

            impl FieldValue for Option<$ty> {
                const KIND: FieldKind = FieldKind::Optional(ValueKind::$kind);

                fn from_capture(text: &str) -> Result<Self, CoercionError> {
                    Ok(Some(parsed_value!(@parse $kind, $ty, text)))
                }
            }
        )+
    };
}

parsed_value!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
parsed_value!(Float32 => f32);
parsed_value!(Float64 => f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_verbatim() {
        assert_eq!(String::from_capture(" John ").unwrap(), " John ");
    }

    #[test]
    fn integers_are_base_ten() {
        assert_eq!(i64::from_capture("178").unwrap(), 178);
        assert_eq!(i32::from_capture("-42").unwrap(), -42);
        assert_eq!(i64::from_capture("+7").unwrap(), 7);
        assert_eq!(u8::from_capture("255").unwrap(), 255);
    }

    #[test]
    fn integer_errors() {
        assert!(matches!(
            i64::from_capture("abc"),
            Err(CoercionError::Integer(_))
        ));
        assert!(matches!(
            u8::from_capture("256"),
            Err(CoercionError::Integer(_))
        ));
        assert!(matches!(
            i64::from_capture("1.5"),
            Err(CoercionError::Integer(_))
        ));
    }

    #[test]
    fn floats_use_their_width() {
        assert_eq!(f32::from_capture("3.4").unwrap(), 3.4_f32);
        assert_eq!(f64::from_capture("1.2").unwrap(), 1.2_f64);
        assert_eq!(f64::from_capture("9").unwrap(), 9.0);
        assert!(matches!(
            f64::from_capture("abc"),
            Err(CoercionError::Float(_))
        ));
    }

    #[test]
    fn float_overflow_is_an_error() {
        assert_eq!(
            f32::from_capture("3.4e39"),
            Err(CoercionError::FloatRange("3.4e39".to_owned()))
        );
        assert!(matches!(
            f64::from_capture("1e400"),
            Err(CoercionError::FloatRange(_))
        ));
        assert!(matches!(
            Option::<f64>::from_capture("-1e400"),
            Err(CoercionError::FloatRange(_))
        ));
        assert_eq!(f64::from_capture("1e300").unwrap(), 1e300);
        assert_eq!(f32::from_capture("1e-50").unwrap(), 0.0);
    }

    #[test]
    fn spelled_infinity_is_accepted() {
        assert_eq!(f64::from_capture("inf").unwrap(), f64::INFINITY);
        assert_eq!(f32::from_capture("-Infinity").unwrap(), f32::NEG_INFINITY);
        assert_eq!(
            Option::<f64>::from_capture("+INF").unwrap(),
            Some(f64::INFINITY)
        );
    }

    #[test]
    fn bool_spellings() {
        for text in ["true", "TRUE", "True", "t", "T", "1"] {
            assert_eq!(parse_bool(text), Ok(true), "{text}");
        }
        for text in ["false", "FALSE", "False", "f", "F", "0"] {
            assert_eq!(parse_bool(text), Ok(false), "{text}");
        }
        for text in ["yes", "no", "2", "tru", ""] {
            assert!(parse_bool(text).is_err(), "{text}");
        }
    }

    #[test]
    fn optional_wraps_present_value() {
        assert_eq!(Option::<i64>::from_capture("42").unwrap(), Some(42));
        assert_eq!(Option::<bool>::from_capture("t").unwrap(), Some(true));
        assert_eq!(
            Option::<String>::from_capture("x").unwrap(),
            Some("x".to_owned())
        );
        assert!(Option::<f32>::from_capture("x").is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(String::KIND, FieldKind::Required(ValueKind::Text));
        assert_eq!(u16::KIND, FieldKind::Required(ValueKind::Integer));
        assert_eq!(
            Option::<f32>::KIND,
            FieldKind::Optional(ValueKind::Float32)
        );
        assert_eq!(Option::<f64>::KIND.to_string(), "optional f64");
        assert_eq!(FieldKind::Opaque.to_string(), "opaque");
    }
}
