//! Binder configuration.

/// Tag key used when none is configured.
pub const DEFAULT_TAG: &str = "env";

/// Settings of a bind pass.
///
/// Built from [`Options::default`], optionally folded with overrides such as
/// [`tag_name`]. Never mutated once a pass starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    tag: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl Options {
    /// Fold `overrides` over the default options, in order.
    pub fn fold<I, F>(overrides: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(Options) -> Options,
    {
        overrides
            .into_iter()
            .fold(Self::default(), |options, apply| apply(options))
    }

    /// Scan annotations under `tag` instead of `env`.
    pub fn with_tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Override selecting the tag key to scan.
pub fn tag_name(tag: impl Into<String>) -> impl FnOnce(Options) -> Options {
    let tag = tag.into();
    move |options| options.with_tag_name(tag)
}
