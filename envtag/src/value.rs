//! Field target types and coercion dispatch.
//!
//! Every type used as an annotated field implements [`FieldValue`]. A value is
//! produced by the first applicable path:
//!
//! 1. JSON decoding, when the annotation carries the `json` option;
//! 2. the type's own text decoder, for types implementing [`FromText`];
//! 3. the scalar table, for primitive kinds.
//!
//! Anything else is an unsupported-type error.

use std::collections::{BTreeMap, HashMap};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::error::FieldError;
use crate::kind::{self, Kind, Scalar};

/// Decoder from raw text, used by [`FromText`] types.
pub type TextHook<T> = fn(&str) -> Result<T, String>;

/// Decoder from a JSON payload.
pub type StructuredHook<T> = fn(&str) -> Result<T, serde_json::Error>;

/// Capability of types that know how to parse themselves from text.
///
/// When a field's type opts in through [`FieldValue::text_hook`], the decoder
/// is authoritative and the scalar table is never consulted.
pub trait FromText: Sized {
    type Err: std::fmt::Display;

    fn from_text(text: &str) -> Result<Self, Self::Err>;
}

/// A type that can be the target of an annotated field.
///
/// All methods default to "not supported", so an implementation only states
/// the paths the type opts into. [`field_value!`](crate::field_value) writes
/// the common implementations.
pub trait FieldValue: Sized {
    /// Primitive kind used for scalar coercion.
    fn kind() -> Option<Kind> {
        None
    }

    /// Rebuild the value from a scalar of [`FieldValue::kind`].
    fn from_scalar(_scalar: Scalar) -> Option<Self> {
        None
    }

    fn text_hook() -> Option<TextHook<Self>> {
        None
    }

    fn structured_hook() -> Option<StructuredHook<Self>> {
        None
    }

    /// Value for an empty raw string, bypassing every decoder.
    fn empty() -> Option<Self> {
        None
    }
}

/// Text hook for a [`FromText`] type.
pub fn decode_text<T: FromText>(raw: &str) -> Result<T, String> {
    T::from_text(raw).map_err(|e| e.to_string())
}

/// Structured hook for any deserializable type.
pub fn decode_structured<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Convert `raw` into a `T`.
pub fn coerce<T: FieldValue>(raw: &str, structured: bool) -> Result<T, FieldError> {
    if raw.is_empty() {
        if let Some(value) = T::empty() {
            return Ok(value);
        }
    }

    if structured {
        let decode = T::structured_hook().ok_or_else(FieldError::unsupported::<T>)?;
        return decode(raw).map_err(|source| FieldError::Structured {
            value: raw.to_string(),
            source,
        });
    }

    if let Some(decode) = T::text_hook() {
        return decode(raw).map_err(|message| FieldError::Decode {
            type_name: std::any::type_name::<T>(),
            value: raw.to_string(),
            message,
        });
    }

    let kind = T::kind().ok_or_else(FieldError::unsupported::<T>)?;
    let scalar = kind::coerce(kind, raw)?;
    T::from_scalar(scalar).ok_or_else(FieldError::unsupported::<T>)
}

/// Implement [`FieldValue`] for user types.
///
/// ```rust
/// use envtag::{field_value, FromText};
///
/// #[derive(Debug, PartialEq, serde::Deserialize)]
/// enum Level {
///     Debug,
///     Info,
/// }
///
/// impl FromText for Level {
///     type Err = String;
///
///     fn from_text(text: &str) -> Result<Self, Self::Err> {
///         match text.to_ascii_uppercase().as_str() {
///             "DEBUG" => Ok(Level::Debug),
///             "INFO" => Ok(Level::Info),
///             other => Err(format!("unknown level {other}")),
///         }
///     }
/// }
///
/// // `text` for FromText types, `structured` for serde types, or both.
/// field_value!(text, structured: Level);
/// ```
#[macro_export]
macro_rules! field_value {
    (text: $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                fn text_hook() -> ::std::option::Option<$crate::value::TextHook<Self>> {
                    ::std::option::Option::Some($crate::value::decode_text::<Self>)
                }
            }
        )+
    };
    (structured: $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                fn structured_hook() -> ::std::option::Option<$crate::value::StructuredHook<Self>> {
                    ::std::option::Option::Some($crate::value::decode_structured::<Self>)
                }
            }
        )+
    };
    (text, structured: $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                fn text_hook() -> ::std::option::Option<$crate::value::TextHook<Self>> {
                    ::std::option::Option::Some($crate::value::decode_text::<Self>)
                }

                fn structured_hook() -> ::std::option::Option<$crate::value::StructuredHook<Self>> {
                    ::std::option::Option::Some($crate::value::decode_structured::<Self>)
                }
            }
        )+
    };
}

macro_rules! scalar_value {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> Option<Kind> {
                    Some(Kind::$kind)
                }

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$kind(value) => Some(value),
                        _ => None,
                    }
                }

                fn structured_hook() -> Option<StructuredHook<Self>> {
                    Some(decode_structured::<Self>)
                }
            }
        )+
    };
}

scalar_value! {
    bool => Bool,
    isize => Isize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    usize => Usize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

macro_rules! from_str_text {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromText for $ty {
                type Err = <$ty as std::str::FromStr>::Err;

                fn from_text(text: &str) -> Result<Self, Self::Err> {
                    text.parse()
                }
            }
        )+
        field_value!(text, structured: $($ty),+);
    };
}

from_str_text!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, PathBuf);

impl<T: DeserializeOwned> FieldValue for Vec<T> {
    fn structured_hook() -> Option<StructuredHook<Self>> {
        Some(decode_structured::<Self>)
    }
}

impl<T: DeserializeOwned> FieldValue for HashMap<String, T> {
    fn structured_hook() -> Option<StructuredHook<Self>> {
        Some(decode_structured::<Self>)
    }
}

impl<T: DeserializeOwned> FieldValue for BTreeMap<String, T> {
    fn structured_hook() -> Option<StructuredHook<Self>> {
        Some(decode_structured::<Self>)
    }
}

field_value!(structured: serde_json::Value);

/// `None` for an empty value, otherwise decoded as `T`.
impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> Option<Kind> {
        T::kind()
    }

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        T::from_scalar(scalar).map(Some)
    }

    fn text_hook() -> Option<TextHook<Self>> {
        T::text_hook().map(|_| decode_text_some::<T> as TextHook<Self>)
    }

    fn structured_hook() -> Option<StructuredHook<Self>> {
        T::structured_hook().map(|_| decode_structured_some::<T> as StructuredHook<Self>)
    }

    fn empty() -> Option<Self> {
        Some(None)
    }
}

fn decode_text_some<T: FieldValue>(raw: &str) -> Result<Option<T>, String> {
    match T::text_hook() {
        Some(decode) => decode(raw).map(Some),
        None => Err(format!("{} has no text decoder", std::any::type_name::<T>())),
    }
}

/// JSON `null` decodes to `None`.
fn decode_structured_some<T: FieldValue>(raw: &str) -> Result<Option<T>, serde_json::Error> {
    if raw.trim() == "null" {
        return Ok(None);
    }
    match T::structured_hook() {
        Some(decode) => decode(raw).map(Some),
        None => Err(serde::de::Error::custom(format!(
            "{} has no structured decoder",
            std::any::type_name::<T>()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Percent(u8);

    impl FromText for Percent {
        type Err = String;

        fn from_text(text: &str) -> Result<Self, Self::Err> {
            let digits = text
                .strip_suffix('%')
                .ok_or_else(|| "missing '%'".to_string())?;
            digits.parse().map(Percent).map_err(|e| format!("{e}"))
        }
    }

    field_value!(text: Percent);

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    field_value!(structured: Endpoint);

    #[test]
    fn test_scalar_dispatch() {
        assert_eq!(coerce::<u16>("8080", false).unwrap(), 8080);
        assert!(coerce::<bool>("TRUE", false).unwrap());
        assert_eq!(coerce::<String>("text", false).unwrap(), "text");
    }

    #[test]
    fn test_scalar_failure_names_kind() {
        match coerce::<u8>("300", false) {
            Err(FieldError::Coerce { kind, value, .. }) => {
                assert_eq!(kind, Kind::U8);
                assert_eq!(value, "300");
            }
            other => panic!("expected coerce error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_hook_wins() {
        assert_eq!(coerce::<Percent>("42%", false).unwrap(), Percent(42));

        match coerce::<Percent>("42", false) {
            Err(FieldError::Decode { message, .. }) => assert_eq!(message, "missing '%'"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_std_text_types() {
        let addr: SocketAddr = coerce("127.0.0.1:8080", false).unwrap();
        assert_eq!(addr.port(), 8080);

        let ip: IpAddr = coerce("::1", false).unwrap();
        assert!(ip.is_loopback());

        assert!(coerce::<Ipv4Addr>("localhost", false).is_err());
    }

    #[test]
    fn test_structured_decode() {
        let endpoint: Endpoint = coerce(r#"{"host":"db","port":5432}"#, true).unwrap();
        assert_eq!(
            endpoint,
            Endpoint {
                host: "db".to_string(),
                port: 5432
            }
        );

        let hosts: Vec<String> = coerce(r#"["a","b"]"#, true).unwrap();
        assert_eq!(hosts, vec!["a", "b"]);
    }

    #[test]
    fn test_structured_scalar() {
        assert_eq!(coerce::<i32>("-5", true).unwrap(), -5);
        assert_eq!(coerce::<String>(r#""quoted""#, true).unwrap(), "quoted");
    }

    #[test]
    fn test_structured_failure_skips_scalar() {
        // "text" is a valid String scalar but not a JSON string
        assert!(matches!(
            coerce::<String>("text", true),
            Err(FieldError::Structured { .. })
        ));
    }

    #[test]
    fn test_option_empty_is_none() {
        assert_eq!(coerce::<Option<u16>>("", false).unwrap(), None);
        assert_eq!(coerce::<Option<u16>>("", true).unwrap(), None);
        assert_eq!(coerce::<Option<u16>>("80", false).unwrap(), Some(80));
        assert_eq!(coerce::<Option<u16>>("null", true).unwrap(), None);
        assert!(matches!(
            coerce::<Option<u16>>("eighty", false),
            Err(FieldError::Coerce { kind: Kind::U16, .. })
        ));
    }

    #[test]
    fn test_option_of_text_type() {
        assert_eq!(coerce::<Option<Percent>>("5%", false).unwrap(), Some(Percent(5)));
        assert!(coerce::<Option<Percent>>("5", false).is_err());
    }

    #[test]
    fn test_unsupported_without_path() {
        assert!(matches!(
            coerce::<Vec<String>>(r#"["a"]"#, false),
            Err(FieldError::Unsupported { .. })
        ));
        assert!(matches!(
            coerce::<Percent>("\"1%\"", true),
            Err(FieldError::Unsupported { .. })
        ));
    }
}
