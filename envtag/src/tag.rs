//! Tag grammar.
//!
//! ```text
//! annotation := name ["=" rest]
//! rest       := default ("," option)*
//! option     := "json"
//! ```
//!
//! Options are only parsed after an `=`. Without one the whole annotation is
//! the variable name, commas included.

use crate::error::TagError;

/// Parsed form of one field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Name of the environment variable.
    pub name: &'a str,

    /// Value used when the variable is not set. Empty means empty string.
    pub default: &'a str,

    /// Set when the annotation has no `=`; a missing variable is an error.
    pub required: bool,

    /// The value is a JSON payload rather than a scalar.
    pub structured: bool,
}

/// Parse an annotation such as `PORT=8080` or `HOSTS=[],json`.
pub fn parse(annotation: &str) -> Result<Directive<'_>, TagError> {
    let (name, rest) = match annotation.split_once('=') {
        Some((name, rest)) => (name, Some(rest)),
        None => (annotation, None),
    };

    let mut directive = Directive {
        name,
        default: "",
        required: rest.is_none(),
        structured: false,
    };

    if let Some(rest) = rest {
        let mut parts = rest.split(',');
        directive.default = parts.next().unwrap_or_default();
        for option in parts {
            match option {
                "json" => directive.structured = true,
                other => return Err(TagError::UnrecognizedOption(other.to_string())),
            }
        }
    }

    if directive.name.is_empty() {
        return Err(TagError::EmptyName);
    }

    Ok(directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only_is_required() {
        let directive = parse("HOST").unwrap();
        assert_eq!(directive.name, "HOST");
        assert_eq!(directive.default, "");
        assert!(directive.required);
        assert!(!directive.structured);
    }

    #[test]
    fn test_default_value() {
        let directive = parse("PORT=8080").unwrap();
        assert_eq!(directive.name, "PORT");
        assert_eq!(directive.default, "8080");
        assert!(!directive.required);
    }

    #[test]
    fn test_empty_default_is_optional() {
        let directive = parse("NAME=").unwrap();
        assert_eq!(directive.name, "NAME");
        assert_eq!(directive.default, "");
        assert!(!directive.required);
    }

    #[test]
    fn test_json_option() {
        let directive = parse("HOSTS=[\"a\"],json").unwrap();
        assert_eq!(directive.default, "[\"a\"]");
        assert!(directive.structured);
    }

    #[test]
    fn test_empty_default_with_json() {
        let directive = parse("name=,json").unwrap();
        assert_eq!(directive.name, "name");
        assert_eq!(directive.default, "");
        assert!(!directive.required);
        assert!(directive.structured);
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let directive = parse("DSN=user=admin").unwrap();
        assert_eq!(directive.name, "DSN");
        assert_eq!(directive.default, "user=admin");
    }

    #[test]
    fn test_comma_without_equals_is_part_of_name() {
        let directive = parse("NAME,json").unwrap();
        assert_eq!(directive.name, "NAME,json");
        assert!(directive.required);
        assert!(!directive.structured);
    }

    #[test]
    fn test_unrecognized_option() {
        assert_eq!(
            parse("LEVEL=INFO,bogus"),
            Err(TagError::UnrecognizedOption("bogus".to_string()))
        );
        assert_eq!(
            parse("LEVEL=INFO,json,yaml"),
            Err(TagError::UnrecognizedOption("yaml".to_string()))
        );
        assert_eq!(
            parse("LEVEL=INFO,"),
            Err(TagError::UnrecognizedOption(String::new()))
        );
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(parse(""), Err(TagError::EmptyName));
        assert_eq!(parse("=8080"), Err(TagError::EmptyName));
    }

    #[test]
    fn test_unrecognized_option_reported_before_empty_name() {
        assert_eq!(
            parse("=INFO,bogus"),
            Err(TagError::UnrecognizedOption("bogus".to_string()))
        );
        assert_eq!(parse("=INFO,json"), Err(TagError::EmptyName));
    }
}
