//! Bind pass over a configuration record.

use std::env;
use std::ffi::OsString;

use tracing::{debug, debug_span, error, trace};

use crate::error::{FieldError, LoadError, TagError};
use crate::field::{EnvConfig, Field};
use crate::options::Options;
use crate::tag::{self, Directive};

/// What happened to one field during a pass.
#[derive(Debug)]
enum Outcome {
    Skipped,
    Bound,
    Failed(FieldError),
}

/// Binds environment variables into [`EnvConfig`] records.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    options: Options,
}

impl Binder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run a bind pass.
    ///
    /// Returns the record, with every field that failed left at its default
    /// value, and the combined error of the pass.
    pub fn bind<T: EnvConfig>(&self) -> (T, Result<(), LoadError>) {
        let _span = debug_span!(
            "bind",
            config = std::any::type_name::<T>(),
            tag = self.options.tag()
        )
        .entered();

        let mut config = T::default();
        let mut errors = Vec::new();

        for mut field in config.fields() {
            match self.bind_field(&mut field) {
                Outcome::Skipped => trace!(field = field.ident(), "no tag, skipped"),
                Outcome::Bound => debug!(field = field.ident(), "bound"),
                Outcome::Failed(e) => {
                    debug!(field = field.ident(), error = %e, "failed");
                    errors.push(e);
                }
            }
        }

        let result = match LoadError::join(errors) {
            Some(e) => Err(e),
            None => Ok(()),
        };
        (config, result)
    }

    /// Bind a record, discarding it when any field failed.
    pub fn load<T: EnvConfig>(&self) -> Result<T, LoadError> {
        let (config, result) = self.bind();
        result.map(|()| config)
    }

    /// Bind a record or exit the process.
    ///
    /// Prints the combined error and exits with status 1 when any field
    /// failed. Meant for the top of `main`, not for libraries.
    pub fn must_bind<T: EnvConfig>(&self) -> T {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "configuration failed to load");
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }

    /// Parsed directives of every field annotated under the current key.
    ///
    /// Lists the variables a record expects without reading the environment.
    pub fn directives<T: EnvConfig>(
        &self,
    ) -> Vec<(&'static str, Result<Directive<'static>, TagError>)> {
        let mut config = T::default();
        let directives = config
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .tag(self.options.tag())
                    .map(|annotation| (field.ident(), tag::parse(annotation)))
            })
            .collect();
        directives
    }

    fn bind_field(&self, field: &mut Field<'_>) -> Outcome {
        let Some(annotation) = field.tag(self.options.tag()) else {
            return Outcome::Skipped;
        };

        let directive = match tag::parse(annotation) {
            Ok(directive) => directive,
            Err(source) => {
                return Outcome::Failed(FieldError::Tag {
                    tag: annotation.to_string(),
                    source,
                })
            }
        };

        let raw = match lookup(directive.name) {
            Ok(Some(value)) => value,
            Ok(None) if directive.required => {
                return Outcome::Failed(FieldError::Missing {
                    name: directive.name.to_string(),
                })
            }
            Ok(None) => directive.default.to_string(),
            Err(e) => return Outcome::Failed(e),
        };

        match field.assign(&raw, directive.structured) {
            Ok(()) => Outcome::Bound,
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Read `name` from the process environment. Set-but-empty counts as set.
fn lookup(name: &str) -> Result<Option<String>, FieldError> {
    match env::var_os(name) {
        Some(value) => value.into_string().map(Some).map_err(|_: OsString| {
            FieldError::NotUnicode {
                name: name.to_string(),
            }
        }),
        None => Ok(None),
    }
}
