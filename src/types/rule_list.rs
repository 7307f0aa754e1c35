use std::fmt;

use super::rule::CompiledRule;

/// An ordered, immutable list of compiled rules.
///
/// Order is load-bearing: the engine walks the list front to back and stops
/// at the first rule whose conditions hold. A list is never edited in place;
/// reloads build a new one. Thread-safe and designed to live behind `Arc`.
#[derive(Debug)]
pub struct RuleList<C, R> {
    pub(crate) rules: Vec<CompiledRule<C, R>>,
}

impl<C, R> RuleList<C, R> {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn rules(&self) -> &[CompiledRule<C, R>] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule<C, R>> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn barrier_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_barrier()).count()
    }
}

impl<C, R> Default for RuleList<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> Clone for RuleList<C, R> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<C, R> From<Vec<CompiledRule<C, R>>> for RuleList<C, R> {
    fn from(rules: Vec<CompiledRule<C, R>>) -> Self {
        Self { rules }
    }
}

impl<C, R> FromIterator<CompiledRule<C, R>> for RuleList<C, R> {
    fn from_iter<I: IntoIterator<Item = CompiledRule<C, R>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a, C, R> IntoIterator for &'a RuleList<C, R> {
    type Item = &'a CompiledRule<C, R>;
    type IntoIter = std::slice::Iter<'a, CompiledRule<C, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl<C, R> fmt::Display for RuleList<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleList({} rules, {} barriers)",
            self.rules.len(),
            self.barrier_count(),
        )
    }
}
