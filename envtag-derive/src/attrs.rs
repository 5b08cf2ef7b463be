//! Attribute parsing for field annotations.
//!
//! Two spellings attach an annotation to a field:
//!
//! - `#[env("NAME=DEFAULT")]` stores it under the `env` key;
//! - `#[tag(key = "NAME=DEFAULT")]` stores it under `key`.
//!
//! The annotation text itself is parsed at bind time, not here.

use syn::ext::IdentExt;
use syn::{Field, LitStr};

/// Key used by the `#[env("...")]` shorthand.
const ENV_KEY: &str = "env";

/// Annotations found on a struct field, as `(key, annotation)` pairs.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub tags: Vec<(String, LitStr)>,
}

impl FieldAttrs {
    /// Collect `#[env(...)]` and `#[tag(...)]` attributes from a field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if attr.path().is_ident("env") {
                let annotation: LitStr = attr.parse_args()?;
                attrs.insert(ENV_KEY.to_string(), annotation)?;
                continue;
            }

            if attr.path().is_ident("tag") {
                attr.parse_nested_meta(|meta| {
                    let key = meta
                        .path
                        .get_ident()
                        .ok_or_else(|| meta.error("tag key must be an identifier"))?
                        .unraw()
                        .to_string();
                    let annotation: LitStr = meta.value()?.parse()?;
                    attrs.insert(key, annotation)
                })?;
            }
        }

        Ok(attrs)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn insert(&mut self, key: String, annotation: LitStr) -> syn::Result<()> {
        if self.tags.iter().any(|(k, _)| *k == key) {
            return Err(syn::Error::new(
                annotation.span(),
                format!("duplicate `{key}` tag on field"),
            ));
        }
        self.tags.push((key, annotation));
        Ok(())
    }
}
