//! Bind environment variables into configuration structs
//!
//! `envtag` fills a struct from the process environment, driven by one
//! annotation string per field. A companion [`Group`] collects the failures of
//! several setup steps and reports them together.
//!
//! # Annotations
//!
//! | Annotation          | Meaning                                              |
//! |---------------------|------------------------------------------------------|
//! | `NAME`              | required, read from `NAME`                           |
//! | `NAME=`             | optional, defaults to the empty string               |
//! | `NAME=DEFAULT`      | optional, defaults to `DEFAULT`                      |
//! | `NAME=DEFAULT,json` | optional, value is decoded as JSON                   |
//!
//! Options are only recognized after `=`: `NAME,json` names a variable called
//! `NAME,json`.
//!
//! # Value Parsing
//!
//! - Booleans: `true` / `false`, any ASCII case
//! - Integers (`i8`..`i64`, `isize`, `u8`..`u64`, `usize`): base 10, full range
//! - Floats (`f32`, `f64`)
//! - `String`: as is
//! - Types implementing [`FromText`], such as `SocketAddr` or `IpAddr`
//! - With `json`: anything `serde` can deserialize, including `Vec<T>` and maps
//!
//! # Example
//!
//! ```rust
//! use envtag::EnvConfig;
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Config {
//!     #[env("DATABASE_URL")]
//!     database_url: String,
//!
//!     #[env("PORT=8080")]
//!     port: u16,
//!
//!     #[env("ALLOWED_HOSTS=[\"localhost\"],json")]
//!     allowed_hosts: Vec<String>,
//!
//!     // not bound
//!     cache: Vec<u8>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! let config: Config = envtag::load()?;
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.allowed_hosts, vec!["localhost"]);
//! #     Ok(())
//! # }
//! ```
//!
//! Every field is visited even when an earlier one fails, so the returned
//! [`LoadError`] lists all configuration problems at once.
//!
//! # Tag keys
//!
//! `#[env("...")]` stores an annotation under the `env` key. Other keys are
//! written as `#[tag(key = "...")]` and selected with [`options::tag_name`]:
//!
//! ```rust
//! use envtag::{options::tag_name, EnvConfig};
//!
//! #[derive(Default, EnvConfig)]
//! struct Config {
//!     #[env("PORT=8080")]
//!     #[tag(test = "TEST_PORT=0")]
//!     port: u16,
//! }
//!
//! let config: Config = envtag::load_with([tag_name("test")]).unwrap();
//! assert_eq!(config.port, 0);
//! ```
//!
//! # Record shape
//!
//! Only structs with named fields can be bound:
//!
//! ```compile_fail
//! use envtag::EnvConfig;
//!
//! #[derive(Default, EnvConfig)]
//! struct Pair(#[env("LEFT")] String, #[env("RIGHT")] String);
//! ```
//!
//! ```compile_fail
//! use envtag::EnvConfig;
//!
//! #[derive(Default, EnvConfig)]
//! enum Mode {
//!     #[default]
//!     Dev,
//! }
//! ```

pub mod bind;
pub mod error;
pub mod field;
pub mod group;
pub mod kind;
pub mod options;
pub mod tag;
pub mod value;

pub use bind::Binder;
pub use envtag_derive::EnvConfig;
pub use error::{FieldError, LoadError, TagError};
pub use field::{EnvConfig, Field, Slot};
pub use group::Group;
pub use options::Options;
pub use tag::Directive;
pub use value::{FieldValue, FromText};

// Re-export for Group callers
pub use anyhow;

/// Bind `T` with default options.
pub fn load<T: EnvConfig>() -> Result<T, LoadError> {
    Binder::default().load()
}

/// Bind `T` with options folded from `overrides`.
pub fn load_with<T, F>(overrides: impl IntoIterator<Item = F>) -> Result<T, LoadError>
where
    T: EnvConfig,
    F: FnOnce(Options) -> Options,
{
    Binder::new(Options::fold(overrides)).load()
}

/// Bind `T` with default options or exit the process.
///
/// See [`Binder::must_bind`].
pub fn must_load<T: EnvConfig>() -> T {
    Binder::default().must_bind()
}
