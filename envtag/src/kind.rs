//! Primitive kinds and the scalar coercion table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::FieldError;

/// Closed set of primitive kinds a raw value can be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Isize,
    I8,
    I16,
    I32,
    I64,
    Usize,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Isize => "isize",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Usize => "usize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "string",
        };
        f.write_str(name)
    }
}

/// A coerced value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
}

type CoerceFn = fn(&str) -> Result<Scalar, String>;

/// One entry per kind. Adding a kind means adding a row here.
static COERCIONS: Lazy<HashMap<Kind, CoerceFn>> = Lazy::new(|| {
    let table: [(Kind, CoerceFn); 14] = [
        (Kind::Bool, parse_bool),
        (Kind::Isize, |raw| int(raw).map(Scalar::Isize)),
        (Kind::I8, |raw| int(raw).map(Scalar::I8)),
        (Kind::I16, |raw| int(raw).map(Scalar::I16)),
        (Kind::I32, |raw| int(raw).map(Scalar::I32)),
        (Kind::I64, |raw| int(raw).map(Scalar::I64)),
        (Kind::Usize, |raw| int(raw).map(Scalar::Usize)),
        (Kind::U8, |raw| int(raw).map(Scalar::U8)),
        (Kind::U16, |raw| int(raw).map(Scalar::U16)),
        (Kind::U32, |raw| int(raw).map(Scalar::U32)),
        (Kind::U64, |raw| int(raw).map(Scalar::U64)),
        (Kind::F32, |raw| float::<f32>(raw).map(Scalar::F32)),
        (Kind::F64, |raw| float::<f64>(raw).map(Scalar::F64)),
        (Kind::String, |raw| Ok(Scalar::String(raw.to_string()))),
    ];
    table.into_iter().collect()
});

/// Coerce a raw string to `kind`.
pub fn coerce(kind: Kind, raw: &str) -> Result<Scalar, FieldError> {
    let coerce = COERCIONS
        .get(&kind)
        .ok_or(FieldError::Unsupported {
            type_name: "unregistered kind",
        })?;
    coerce(raw).map_err(|message| FieldError::Coerce {
        kind,
        value: raw.to_string(),
        message,
    })
}

/// `true` or `false`, ASCII case-insensitive.
fn parse_bool(raw: &str) -> Result<Scalar, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(Scalar::Bool(true))
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(Scalar::Bool(false))
    } else {
        Err("expected 'true' or 'false'".to_string())
    }
}

fn int<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| e.to_string())
}

/// Finite literals that overflow the target precision are rejected.
fn float<T>(raw: &str) -> Result<T, String>
where
    T: FromStr + Into<f64> + Copy,
    T::Err: fmt::Display,
{
    let value: T = raw.parse().map_err(|e: T::Err| e.to_string())?;
    if value.into().is_infinite() && !is_infinity_literal(raw) {
        return Err("value out of range".to_string());
    }
    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
