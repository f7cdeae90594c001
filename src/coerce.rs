//! The numeric coercion matrix.
//!
//! Document values arrive in whatever representation the decoder produced:
//! integers anywhere in the `i64`/`u64` range, 32- or 64-bit floats, or a
//! numeral in a string. Each scalar validator has one canonical
//! representation, and these functions are the only way in: narrowing must
//! round-trip exactly, float-to-integer is opt-in and only for integral
//! floats, and failures carry the reason so a wrong-type violation can
//! explain itself.
//!
//! Widening into a float is always permitted, including `f64` to `f32`; the
//! decimal path is deliberately lenient about float precision loss.

use crate::error::CoerceError;
use crate::value::Value;

/// Coerce into the 32-bit integer canonical form.
///
/// `float_ok` enables the float-as-int path: the float must have no
/// fractional component at 32-bit width, verified by casting back and
/// comparing.
pub fn to_i32(value: &Value, float_ok: bool) -> Result<i32, CoerceError> {
    match *value {
        Value::Int(n) => i32::try_from(n).map_err(|_| CoerceError::Overflow { target: "int" }),
        Value::F32(f) => float_to_i32(f as f64, float_ok),
        Value::F64(f) => float_to_i32(f, float_ok),
        Value::Str(ref s) => s.parse::<i32>().map_err(|_| CoerceError::NotNumeric),
        ref other => Err(CoerceError::WrongType {
            found: other.kind_name(),
        }),
    }
}

/// Coerce into the 64-bit integer canonical form. Same rules as [`to_i32`],
/// at 64-bit width.
pub fn to_i64(value: &Value, float_ok: bool) -> Result<i64, CoerceError> {
    match *value {
        Value::Int(n) => i64::try_from(n).map_err(|_| CoerceError::Overflow { target: "long" }),
        Value::F32(f) => float_to_i64(f as f64, float_ok),
        Value::F64(f) => float_to_i64(f, float_ok),
        Value::Str(ref s) => s.parse::<i64>().map_err(|_| CoerceError::NotNumeric),
        ref other => Err(CoerceError::WrongType {
            found: other.kind_name(),
        }),
    }
}

/// Coerce into the 32-bit float canonical form. Integers and wider floats
/// always convert; narrowing precision loss is not detected.
pub fn to_f32(value: &Value) -> Result<f32, CoerceError> {
    match *value {
        Value::Int(n) => Ok(n.as_f32()),
        Value::F32(f) => Ok(f),
        Value::F64(f) => Ok(f as f32),
        Value::Str(ref s) => s.parse::<f32>().map_err(|_| CoerceError::NotNumeric),
        ref other => Err(CoerceError::WrongType {
            found: other.kind_name(),
        }),
    }
}

/// Coerce into the 64-bit float canonical form.
pub fn to_f64(value: &Value) -> Result<f64, CoerceError> {
    match *value {
        Value::Int(n) => Ok(n.as_f64()),
        Value::F32(f) => Ok(f as f64),
        Value::F64(f) => Ok(f),
        Value::Str(ref s) => s.parse::<f64>().map_err(|_| CoerceError::NotNumeric),
        ref other => Err(CoerceError::WrongType {
            found: other.kind_name(),
        }),
    }
}

fn float_to_i32(f: f64, float_ok: bool) -> Result<i32, CoerceError> {
    if !float_ok {
        return Err(CoerceError::WrongType { found: "double" });
    }
    let narrowed = f as i32;
    if narrowed as f64 == f {
        Ok(narrowed)
    } else {
        Err(CoerceError::Overflow { target: "int" })
    }
}

fn float_to_i64(f: f64, float_ok: bool) -> Result<i64, CoerceError> {
    if !float_ok {
        return Err(CoerceError::WrongType { found: "double" });
    }
    let narrowed = f as i64;
    if narrowed as f64 == f {
        Ok(narrowed)
    } else {
        Err(CoerceError::Overflow { target: "long" })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::integer::Integer;

    #[test]
    fn integer_narrowing_is_exact() {
        assert_eq!(to_i32(&Value::from(45i64), false), Ok(45));
        assert_eq!(to_i32(&Value::from(-7i8), false), Ok(-7));
        assert_eq!(
            to_i32(&Value::from(1i64 << 40), false),
            Err(CoerceError::Overflow { target: "int" })
        );
        assert_eq!(
            to_i64(&Value::Int(Integer::max_value()), false),
            Err(CoerceError::Overflow { target: "long" })
        );
    }

    #[test]
    fn float_to_int_needs_opt_in() {
        assert_eq!(
            to_i32(&Value::from(45.0f64), false),
            Err(CoerceError::WrongType { found: "double" })
        );
        assert_eq!(to_i32(&Value::from(45.0f64), true), Ok(45));
        assert_eq!(
            to_i32(&Value::from(45.5f64), true),
            Err(CoerceError::Overflow { target: "int" })
        );
        assert_eq!(to_i64(&Value::from(45.0f32), true), Ok(45));
    }

    #[test]
    fn strings_parse_as_decimal() {
        assert_eq!(to_i32(&Value::from("45"), false), Ok(45));
        assert_eq!(to_f64(&Value::from("4.5")), Ok(4.5));
        assert_eq!(
            to_i32(&Value::from("quatro"), false),
            Err(CoerceError::NotNumeric)
        );
    }

    #[test]
    fn widening_into_floats_always_passes() {
        assert_eq!(to_f32(&Value::from(3u8)), Ok(3.0));
        assert_eq!(to_f64(&Value::from(3.5f32)), Ok(3.5));
        // Narrowing f64 -> f32 is lenient about precision.
        assert!(to_f32(&Value::from(1.000000001f64)).is_ok());
    }

    #[test]
    fn non_numeric_kinds_fail() {
        assert_eq!(
            to_f64(&Value::Bool(true)),
            Err(CoerceError::WrongType { found: "bool" })
        );
        assert_eq!(
            to_i64(&Value::Array(vec![]), true),
            Err(CoerceError::WrongType { found: "array" })
        );
    }
}
