//! Pattern Catalog
//!
//! Table of classifiers that decide what counts as an observable.
//! The matching engine only ever calls `extract` and `normalize`, so adding
//! a classifier means adding a `ClassifierDef` entry, nothing else.
//!
//! ## Structure
//! - `types`: Category, Capture, Normalizer, ClassifierDef
//! - `rules`: the built-in table, auxiliary patterns, default whitelist
//! - `normalize`: capture -> observable name

pub mod types;
pub mod rules;
pub mod normalize;

use regex::Regex;

use crate::error::{TraceError, TraceResult};

pub use types::{Capture, Category, ClassifierDef, Normalizer};
pub use normalize::NormalizeContext;
pub use rules::{CLASSIFIERS, DEFAULT_WHITELIST};

// ============================================================================
// COMPILED CLASSIFIER
// ============================================================================

/// A `ClassifierDef` with its patterns compiled
#[derive(Debug, Clone)]
pub struct Classifier {
    def: ClassifierDef,
    regexes: Vec<Regex>,
}

impl Classifier {
    pub fn compile(def: &ClassifierDef) -> TraceResult<Self> {
        let regexes = def
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| TraceError::InvalidPattern {
                    category: def.category.to_string(),
                    source,
                })
            })
            .collect::<TraceResult<Vec<_>>>()?;

        Ok(Self {
            def: def.clone(),
            regexes,
        })
    }

    pub fn category(&self) -> Category {
        self.def.category
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        self.def.keywords
    }

    pub fn normalizer(&self) -> Normalizer {
        self.def.normalizer
    }

    /// Every match of every pattern, in pattern order then match order
    pub fn extract(&self, line: &str) -> Vec<Capture> {
        let mut captures = Vec::new();

        for regex in &self.regexes {
            let groups = regex.captures_len() - 1;
            for caps in regex.captures_iter(line) {
                let group = |i: usize| {
                    caps.get(i)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default()
                };
                let capture = match groups {
                    0 => Capture::Single(group(0)),
                    1 => Capture::Single(group(1)),
                    n => Capture::Tuple((1..=n).map(group).collect()),
                };
                captures.push(capture);
            }
        }

        captures
    }

    pub fn normalize(&self, capture: &Capture, ctx: &NormalizeContext<'_>) -> String {
        self.def.normalizer.apply(capture, ctx)
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone)]
pub struct PatternCatalog {
    classifiers: Vec<Classifier>,
    /// Union of all classifier keywords, deduplicated, first-seen order
    keywords: Vec<&'static str>,
}

impl PatternCatalog {
    /// The built-in six classifiers
    pub fn standard() -> TraceResult<Self> {
        Self::from_defs(CLASSIFIERS)
    }

    pub fn from_defs(defs: &[ClassifierDef]) -> TraceResult<Self> {
        let classifiers = defs
            .iter()
            .map(Classifier::compile)
            .collect::<TraceResult<Vec<_>>>()?;

        let mut catalog = Self {
            classifiers,
            keywords: Vec::new(),
        };
        catalog.rebuild_keywords();
        Ok(catalog)
    }

    /// Append one more classifier
    pub fn with_classifier(mut self, def: &ClassifierDef) -> TraceResult<Self> {
        self.classifiers.push(Classifier::compile(def)?);
        self.rebuild_keywords();
        Ok(self)
    }

    pub fn classifiers(&self) -> &[Classifier] {
        &self.classifiers
    }

    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }

    /// Distinct categories in table order
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for classifier in &self.classifiers {
            if !categories.contains(&classifier.category()) {
                categories.push(classifier.category());
            }
        }
        categories
    }

    fn rebuild_keywords(&mut self) {
        self.keywords.clear();
        for classifier in &self.classifiers {
            for &keyword in classifier.keywords() {
                if !self.keywords.contains(&keyword) {
                    self.keywords.push(keyword);
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
