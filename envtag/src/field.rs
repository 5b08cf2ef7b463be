//! Field access for configuration records.
//!
//! `#[derive(EnvConfig)]` implements [`EnvConfig::fields`], which exposes each
//! annotated field with its tag table and a type-erased slot to write into.

use crate::error::FieldError;
use crate::value::{self, FieldValue};

/// A configuration record that can be bound from the environment.
///
/// `Default` provides the value a field keeps when binding it fails.
pub trait EnvConfig: Default {
    /// Annotated fields, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Write access to one field, independent of its type.
pub trait Slot {
    /// Coerce `raw` and store it. The field is untouched on error.
    fn assign(&mut self, raw: &str, structured: bool) -> Result<(), FieldError>;

    fn type_name(&self) -> &'static str;
}

impl<T: FieldValue> Slot for T {
    fn assign(&mut self, raw: &str, structured: bool) -> Result<(), FieldError> {
        *self = value::coerce::<T>(raw, structured)?;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// One annotated field of a record.
pub struct Field<'a> {
    ident: &'static str,
    tags: &'static [(&'static str, &'static str)],
    slot: &'a mut dyn Slot,
}

impl<'a> Field<'a> {
    /// Used by macro-generated code
    #[doc(hidden)]
    pub fn new(
        ident: &'static str,
        tags: &'static [(&'static str, &'static str)],
        slot: &'a mut dyn Slot,
    ) -> Self {
        Self { ident, tags, slot }
    }

    /// Rust identifier of the field.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Annotation stored under `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, annotation)| *annotation)
    }

    pub fn type_name(&self) -> &'static str {
        self.slot.type_name()
    }

    pub(crate) fn assign(&mut self, raw: &str, structured: bool) -> Result<(), FieldError> {
        self.slot.assign(raw, structured)
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("ident", &self.ident)
            .field("tags", &self.tags)
            .field("type_name", &self.type_name())
            .finish()
    }
}
