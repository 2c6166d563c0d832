//! Line & Whitelist Filters
//!
//! Keyword gate in front of the patterns, and prefix suppression of
//! known-noise observables.

/// Cheap pre-check: does the line contain any catalog keyword?
pub struct LineFilter<'a> {
    keywords: &'a [&'static str],
}

impl<'a> LineFilter<'a> {
    pub fn new(keywords: &'a [&'static str]) -> Self {
        Self { keywords }
    }

    /// Case-sensitive substring test
    pub fn is_relevant(&self, line: &str) -> bool {
        self.keywords.iter().any(|keyword| line.contains(keyword))
    }
}

/// Ordered list of ignored name prefixes
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    prefixes: Vec<String>,
}

impl Whitelist {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_whitelisted(&self, name: &str) -> bool {
        self.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
