//! The seam between this crate and the evaluation engine.
//!
//! The engine owns condition and rarity values and decides whether a rule
//! matches a context. This crate only stores its values, compares them by
//! identity, and hands ordered lists back for evaluation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{Condition, ItemId, NativeRule, Rarity, RuleList};

/// An external drop-rule evaluation engine.
pub trait Engine {
    /// Opaque condition value.
    type Condition;
    /// Opaque rarity value.
    type Rarity;
    /// Whatever the engine evaluates rules against (a fishing attempt).
    type Context;

    /// Run the engine's canonical population routine against a fresh, empty
    /// list and report what it produced. Called once per registry build.
    fn populate(&self) -> Population<Self::Condition, Self::Rarity>;

    /// Evaluate `list` front to back against `context`, returning the
    /// dropped item or `0` for no drop.
    fn evaluate(
        &self,
        list: &RuleList<Self::Condition, Self::Rarity>,
        context: &Self::Context,
    ) -> ItemId;
}

/// The outcome of one run of the engine's population routine: the handles it
/// exposes for each known symbol, and the rules it populated.
#[derive(Debug)]
pub struct Population<C, R> {
    conditions: HashMap<Condition, Arc<C>>,
    rarities: HashMap<Rarity, Arc<R>>,
    rules: Vec<NativeRule<C, R>>,
}

impl<C, R> Population<C, R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
            rarities: HashMap::new(),
            rules: Vec::new(),
        }
    }

    /// Record the handle the engine exposes for `symbol`.
    pub fn expose_condition(&mut self, symbol: Condition, handle: Arc<C>) {
        self.conditions.insert(symbol, handle);
    }

    /// Record the handle the engine exposes for `symbol`.
    pub fn expose_rarity(&mut self, symbol: Rarity, handle: Arc<R>) {
        self.rarities.insert(symbol, handle);
    }

    /// Append a rule to the populated list.
    pub fn push_rule(&mut self, rule: NativeRule<C, R>) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn condition(&self, symbol: Condition) -> Option<&Arc<C>> {
        self.conditions.get(&symbol)
    }

    #[must_use]
    pub fn rarity(&self, symbol: Rarity) -> Option<&Arc<R>> {
        self.rarities.get(&symbol)
    }

    /// The populated list, in engine order.
    #[must_use]
    pub fn rules(&self) -> &[NativeRule<C, R>] {
        &self.rules
    }
}

impl<C, R> Default for Population<C, R> {
    fn default() -> Self {
        Self::new()
    }
}
