//! Deferred error collection.
//!
//! A [`Group`] records the failures of several independent setup steps without
//! interrupting them, then reports them all at once.
//!
//! ```rust
//! use envtag::Group;
//!
//! fn connect(url: &str) -> anyhow::Result<String> {
//!     anyhow::ensure!(url.starts_with("postgres://"), "bad database url {url}");
//!     Ok(url.to_string())
//! }
//!
//! let mut group = Group::new();
//! let primary = group.take(connect("postgres://primary"));
//! let replica = group.take(connect("mysql://replica"));
//!
//! assert!(primary.is_some());
//! assert!(replica.is_none());
//! assert_eq!(group.combined().unwrap().to_string(), "bad database url mysql://replica");
//! ```

use std::fmt;

use tracing::error;

/// Ordered collection of errors from one logical unit of setup work.
///
/// Meant for sequential use by a single setup routine.
#[derive(Debug, Default)]
pub struct Group {
    errors: Vec<anyhow::Error>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error of `outcome`, if any, and hand back `value`.
    ///
    /// Fits [`Binder::bind`](crate::Binder::bind), which returns a record
    /// together with the outcome of the pass.
    pub fn append<T, E>(&mut self, value: T, outcome: Result<(), E>) -> T
    where
        E: Into<anyhow::Error>,
    {
        if let Err(e) = outcome {
            self.push(e);
        }
        value
    }

    /// Record the error of `result`, if any, and hand back its value.
    pub fn take<T, E>(&mut self, result: Result<T, E>) -> Option<T>
    where
        E: Into<anyhow::Error>,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    pub fn push(&mut self, error: impl Into<anyhow::Error>) {
        self.errors.push(error.into());
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Join the recorded errors in insertion order.
    ///
    /// A single error is returned as is; several are wrapped in [`Joined`].
    pub fn combined(mut self) -> Option<anyhow::Error> {
        match self.errors.len() {
            0 => None,
            1 => self.errors.pop(),
            _ => Some(anyhow::Error::new(Joined(self.errors))),
        }
    }

    pub fn finish(self) -> anyhow::Result<()> {
        match self.combined() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Panic if any error was recorded.
    ///
    /// The combined error is printed to stderr first, then used as the panic
    /// payload.
    pub fn must_succeed(self) {
        if let Some(e) = self.combined() {
            error!(error = %e, "setup failed");
            eprintln!("error: {e:#}");
            std::panic::panic_any(e);
        }
    }
}

/// Several errors reported as one, one per line.
#[derive(Debug)]
pub struct Joined(Vec<anyhow::Error>);

impl Joined {
    pub fn errors(&self) -> &[anyhow::Error] {
        &self.0
    }
}

impl fmt::Display for Joined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error:#}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Joined {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    fn without_error<T>(value: T) -> anyhow::Result<T> {
        Ok(value)
    }

    fn with_error<T>(value: T, message: &'static str) -> (T, Result<(), anyhow::Error>) {
        (value, Err(anyhow::anyhow!(message)))
    }

    #[test]
    fn test_empty_group_has_no_error() {
        let group = Group::new();
        assert!(group.is_empty());
        assert!(group.combined().is_none());
    }

    #[test]
    fn test_successes_pass_values_through() {
        let mut group = Group::new();
        let a = group.take(without_error(true));
        let b = group.take(without_error("Hello, World!"));

        assert_eq!(a, Some(true));
        assert_eq!(b, Some("Hello, World!"));
        assert!(group.finish().is_ok());
    }

    #[test]
    fn test_append_returns_value_on_error() {
        let mut group = Group::new();
        let (value, outcome) = with_error(30, "an error occurred");
        let value = group.append(value, outcome);

        assert_eq!(value, 30);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_single_failure_is_the_combined_error() {
        let mut group = Group::new();
        group.take(without_error(1));
        group.take(without_error("two"));
        group.take::<(), _>(Err(anyhow::anyhow!("an error occurred")));

        let error = group.combined().unwrap();
        assert_eq!(error.to_string(), "an error occurred");
        assert!(error.downcast_ref::<Joined>().is_none());
    }

    #[test]
    fn test_several_failures_keep_order() {
        let mut group = Group::new();
        group.push(anyhow::anyhow!("first"));
        group.take::<(), _>(Err(std::fmt::Error));
        group.push(anyhow::anyhow!("third"));

        let error = group.combined().unwrap();
        let joined = error.downcast_ref::<Joined>().unwrap();
        assert_eq!(joined.errors().len(), 3);
        assert_eq!(
            error.to_string(),
            "first\nan error occurred when formatting an argument\nthird"
        );
    }

    #[test]
    fn test_must_succeed_panics_with_error() {
        let mut group = Group::new();
        group.take(without_error(30));
        group.take::<&str, _>(Err(anyhow::anyhow!("an error occurred")));

        let payload = panic::catch_unwind(AssertUnwindSafe(|| group.must_succeed())).unwrap_err();
        let error = payload.downcast::<anyhow::Error>().unwrap();
        assert_eq!(error.to_string(), "an error occurred");
    }

    #[test]
    fn test_must_succeed_without_errors() {
        let mut group = Group::new();
        let a = group.take(without_error(30));
        let b = group.take(without_error("hi"));
        group.must_succeed();

        assert_eq!(a, Some(30));
        assert_eq!(b, Some("hi"));
    }
}
