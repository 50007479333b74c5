//! Filter criteria for image listings.

use super::layout::TableLayout;
use crate::sql::{Expr, ExprExt};

/// Optional constraints on which images are listed.
///
/// Every field is independent: a label detail without a label is still
/// applied on its own. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFilter {
    /// Substring of the path, matched case-insensitively.
    pub search: Option<String>,
    pub label: Option<String>,
    pub label_detail: Option<String>,
    /// Inclusive lower score bound.
    pub min_score: Option<f64>,
    /// Inclusive upper score bound.
    pub max_score: Option<f64>,
}

impl ImageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label_detail(mut self, detail: impl Into<String>) -> Self {
        self.label_detail = Some(detail.into());
        self
    }

    pub fn score_between(mut self, min: f64, max: f64) -> Self {
        self.min_score = Some(min);
        self.max_score = Some(max);
        self
    }

    pub fn min_score(mut self, min: f64) -> Self {
        self.min_score = Some(min);
        self
    }

    pub fn max_score(mut self, max: f64) -> Self {
        self.max_score = Some(max);
        self
    }

    /// True when no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.predicates(&TableLayout::default()).is_empty()
    }

    /// One predicate per present field, in a fixed order.
    pub fn predicates(&self, layout: &TableLayout) -> Vec<Expr> {
        let mut predicates = Vec::new();

        if let Some(term) = present(&self.search) {
            predicates.push(layout.path().ilike(contains_pattern(term)));
        }
        if let Some(label) = present(&self.label) {
            predicates.push(layout.label().eq(label));
        }
        if let Some(detail) = present(&self.label_detail) {
            predicates.push(layout.label_detail().eq(detail));
        }
        if let Some(min) = self.min_score {
            predicates.push(layout.score().gte(min));
        }
        if let Some(max) = self.max_score {
            predicates.push(layout.score().lte(max));
        }

        predicates
    }

    /// All predicates ANDed together, or `None` when unconstrained.
    pub fn to_condition(&self, layout: &TableLayout) -> Option<Expr> {
        self.predicates(layout)
            .into_iter()
            .reduce(|acc, predicate| acc.and(predicate))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// `%term%`, with LIKE wildcards in the term matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
