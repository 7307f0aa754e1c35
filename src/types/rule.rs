use std::sync::Arc;

use super::handle::Handle;
use super::symbol::{Condition, Rarity};

/// Engine item identifier. `0` means "no drop".
pub type ItemId = i32;

/// A human-authored drop rule, expressed in symbolic names.
///
/// Chance fractions are carried as written; nothing here checks that
/// `chance_numerator <= chance_denominator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarativeRule {
    pub possible_items: Vec<ItemId>,
    pub chance_numerator: i32,
    pub chance_denominator: i32,
    /// `None` compiles to [`Rarity::Common`].
    pub rarity: Option<Rarity>,
    pub conditions: Vec<Condition>,
}

impl DeclarativeRule {
    /// A rule dropping one of `items` with certainty, at common rarity.
    #[must_use]
    pub fn new(items: impl Into<Vec<ItemId>>) -> Self {
        Self {
            possible_items: items.into(),
            chance_numerator: 1,
            chance_denominator: 1,
            rarity: None,
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn chance(mut self, numerator: i32, denominator: i32) -> Self {
        self.chance_numerator = numerator;
        self.chance_denominator = denominator;
        self
    }

    #[must_use]
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn is_barrier(&self) -> bool {
        self.possible_items.is_empty()
    }
}

/// A rule in the shape the engine evaluates, with handles in place of names.
///
/// A rule with no possible items is a barrier: when its conditions hold the
/// engine stops with "no drop".
#[derive(Debug)]
pub struct CompiledRule<C, R> {
    pub possible_items: Vec<ItemId>,
    pub chance_numerator: i32,
    pub chance_denominator: i32,
    /// Engine-authored rules may carry no rarity at all.
    pub rarity: Option<Handle<R>>,
    pub conditions: Vec<Handle<C>>,
}

impl<C, R> CompiledRule<C, R> {
    /// A barrier on a single condition, with a certain chance.
    #[must_use]
    pub fn barrier(condition: Handle<C>, rarity: Option<Handle<R>>) -> Self {
        Self {
            possible_items: Vec::new(),
            chance_numerator: 1,
            chance_denominator: 1,
            rarity,
            conditions: vec![condition],
        }
    }

    #[must_use]
    pub fn is_barrier(&self) -> bool {
        self.possible_items.is_empty()
    }
}

impl<C, R> Clone for CompiledRule<C, R> {
    fn clone(&self) -> Self {
        Self {
            possible_items: self.possible_items.clone(),
            chance_numerator: self.chance_numerator,
            chance_denominator: self.chance_denominator,
            rarity: self.rarity.clone(),
            conditions: self.conditions.clone(),
        }
    }
}

/// A rule exactly as the engine hands it over: raw engine values, no ids.
#[derive(Debug)]
pub struct NativeRule<C, R> {
    pub possible_items: Vec<ItemId>,
    pub chance_numerator: i32,
    pub chance_denominator: i32,
    pub rarity: Option<Arc<R>>,
    pub conditions: Vec<Arc<C>>,
}

impl<C, R> Clone for NativeRule<C, R> {
    fn clone(&self) -> Self {
        Self {
            possible_items: self.possible_items.clone(),
            chance_numerator: self.chance_numerator,
            chance_denominator: self.chance_denominator,
            rarity: self.rarity.clone(),
            conditions: self.conditions.clone(),
        }
    }
}
