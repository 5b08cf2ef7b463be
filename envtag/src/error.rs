//! Error types for binding environment variables

use std::fmt;

use crate::kind::Kind;

/// Errors produced while parsing a single field annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// A token after the default value is not a known option.
    ///
    /// `json` is the only option currently recognized.
    #[error("unrecognized tag option '{0}'")]
    UnrecognizedOption(String),

    /// The annotation does not name a variable.
    #[error("tag does not name an environment variable")]
    EmptyName,
}

/// Errors scoped to a single field of a bind pass.
///
/// A field error never stops the pass: the field keeps its default value and
/// the binder moves on to the next field.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The field annotation could not be parsed.
    #[error("failed to parse tag {tag}: {source}")]
    Tag {
        /// Raw annotation text
        tag: String,
        /// What was wrong with it
        source: TagError,
    },

    /// Required environment variable is not set.
    #[error("env '{name}' required, but not found")]
    Missing {
        /// Name of the missing environment variable
        name: String,
    },

    /// The variable is set but its value is not valid Unicode.
    #[error("env '{name}' is not valid unicode")]
    NotUnicode {
        /// Name of the environment variable
        name: String,
    },

    /// The raw value could not be converted to the field's primitive kind.
    #[error("failed to parse {kind} {value}: {message}")]
    Coerce {
        /// Kind the value was coerced to
        kind: Kind,
        /// Offending raw value
        value: String,
        /// Message from the scalar parser
        message: String,
    },

    /// The type's own text decoder rejected the value.
    #[error("failed to decode {type_name} {value}: {message}")]
    Decode {
        /// Rust type of the field
        type_name: &'static str,
        /// Offending raw value
        value: String,
        /// Message from the decoder
        message: String,
    },

    /// The value was marked `json` but is not a valid payload for the field.
    #[error("failed to unmarshal JSON {value}: {source}")]
    Structured {
        /// Offending raw value
        value: String,
        /// Underlying `serde_json` error
        source: serde_json::Error,
    },

    /// The field's type has no coercion path for this annotation.
    #[error("unsupported type {type_name}")]
    Unsupported {
        /// Rust type of the field
        type_name: &'static str,
    },
}

impl FieldError {
    pub(crate) fn unsupported<T>() -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Combined error of a bind pass.
///
/// Holds every field error in field declaration order. Displayed one error per
/// line, so a single run reports all configuration problems at once.
#[derive(Debug)]
pub struct LoadError {
    errors: Vec<FieldError>,
}

impl LoadError {
    /// Join field errors; `None` when there is nothing to report.
    pub(crate) fn join(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The individual field errors, in declaration order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.errors.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
