use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::Population;
use crate::types::{
    identity, CompiledRule, Condition, Handle, HandleId, NativeRule, Rarity, RuleList, Symbol,
};

/// Maps symbolic names to the engine handles that implement them, and back.
///
/// Built once from a [`Population`] and read-only afterwards. Each distinct
/// engine handle gets a [`HandleId`] equal to its creation index; both
/// directions of the mapping are keyed by that id.
#[derive(Debug)]
pub struct SymbolRegistry<S, T> {
    /// Distinct handles, indexed by id.
    handles: Vec<Handle<T>>,
    /// First symbol registered for each id.
    symbols: Vec<S>,
    forward: HashMap<S, HandleId>,
    by_identity: HashMap<usize, HandleId>,
}

impl<S: Symbol, T> SymbolRegistry<S, T> {
    /// Walk `S::ALL` in order, reading each symbol's handle through `lookup`.
    ///
    /// A symbol whose handle is missing is logged and left out. A handle that
    /// is identical to one already registered keeps its first symbol as the
    /// reverse mapping.
    pub(crate) fn build<'a>(mut lookup: impl FnMut(S) -> Option<&'a Arc<T>>) -> Self
    where
        T: 'a,
    {
        let mut registry = Self {
            handles: Vec::new(),
            symbols: Vec::new(),
            forward: HashMap::new(),
            by_identity: HashMap::new(),
        };

        for &symbol in S::ALL {
            let Some(raw) = lookup(symbol) else {
                warn!(symbol = symbol.name(), "engine does not expose a handle");
                continue;
            };
            let key = identity(raw);
            let id = match registry.by_identity.get(&key) {
                Some(&existing) => {
                    debug!(
                        symbol = symbol.name(),
                        shared_with = registry.symbols[existing.index()].name(),
                        "engine handle shared between symbols"
                    );
                    existing
                }
                None => {
                    let id = HandleId(registry.handles.len() as u32);
                    registry.handles.push(Handle::new(id, Arc::clone(raw)));
                    registry.symbols.push(symbol);
                    registry.by_identity.insert(key, id);
                    id
                }
            };
            registry.forward.insert(symbol, id);
        }

        registry
    }

    /// The handle registered for `symbol`.
    #[must_use]
    pub fn resolve(&self, symbol: S) -> Option<&Handle<T>> {
        self.forward
            .get(&symbol)
            .map(|id| &self.handles[id.index()])
    }

    /// The symbol a handle was registered under. Handles this registry never
    /// issued resolve to `None`.
    #[must_use]
    pub fn reverse_resolve(&self, handle: &Handle<T>) -> Option<S> {
        let index = handle.id().index();
        match self.handles.get(index) {
            Some(known) if known == handle => Some(self.symbols[index]),
            _ => None,
        }
    }

    /// Id of a raw engine value, if it is one of the registered handles.
    #[must_use]
    pub fn identify(&self, raw: &Arc<T>) -> Option<HandleId> {
        self.by_identity.get(&identity(raw)).copied()
    }

    /// Whether `symbol` resolved at construction.
    #[must_use]
    pub fn contains(&self, symbol: S) -> bool {
        self.forward.contains_key(&symbol)
    }

    /// Number of distinct handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Symbols that resolved, in registration order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (S, &Handle<T>)> {
        S::ALL
            .iter()
            .filter_map(|&s| self.resolve(s).map(|h| (s, h)))
    }
}

/// The condition and rarity registries built from one population run.
#[derive(Debug)]
pub struct Registries<C, R> {
    pub conditions: SymbolRegistry<Condition, C>,
    pub rarities: SymbolRegistry<Rarity, R>,
}

impl<C, R> Registries<C, R> {
    #[must_use]
    pub fn build(population: &Population<C, R>) -> Self {
        let registries = Self {
            conditions: SymbolRegistry::build(|s| population.condition(s)),
            rarities: SymbolRegistry::build(|s| population.rarity(s)),
        };
        debug!(
            conditions = registries.conditions.len(),
            rarities = registries.rarities.len(),
            "symbol registries built"
        );
        registries
    }

    #[must_use]
    pub fn condition(&self, symbol: Condition) -> Option<&Handle<C>> {
        self.conditions.resolve(symbol)
    }

    #[must_use]
    pub fn rarity(&self, symbol: Rarity) -> Option<&Handle<R>> {
        self.rarities.resolve(symbol)
    }

    /// Convert an engine-authored list into a [`RuleList`].
    ///
    /// Registered handles keep their registry ids. Handles the registry never
    /// saw get fresh ids past the registry range, shared between repeated
    /// occurrences of the same engine value.
    #[must_use]
    pub fn adopt(&self, rules: &[NativeRule<C, R>]) -> RuleList<C, R> {
        let mut conditions = Adopter::new(&self.conditions);
        let mut rarities = Adopter::new(&self.rarities);

        rules
            .iter()
            .map(|rule| CompiledRule {
                possible_items: rule.possible_items.clone(),
                chance_numerator: rule.chance_numerator,
                chance_denominator: rule.chance_denominator,
                rarity: rule.rarity.as_ref().map(|r| rarities.adopt(r)),
                conditions: rule.conditions.iter().map(|c| conditions.adopt(c)).collect(),
            })
            .collect()
    }
}

/// Assigns ids to raw engine values during [`Registries::adopt`].
struct Adopter<'a, S, T> {
    registry: &'a SymbolRegistry<S, T>,
    foreign: HashMap<usize, HandleId>,
    next: u32,
}

impl<'a, S: Symbol, T> Adopter<'a, S, T> {
    fn new(registry: &'a SymbolRegistry<S, T>) -> Self {
        Self {
            registry,
            foreign: HashMap::new(),
            next: registry.len() as u32,
        }
    }

    fn adopt(&mut self, raw: &Arc<T>) -> Handle<T> {
        if let Some(id) = self.registry.identify(raw) {
            return self.registry.handles[id.index()].clone();
        }
        let next = &mut self.next;
        let id = *self.foreign.entry(identity(raw)).or_insert_with(|| {
            let id = HandleId(*next);
            *next += 1;
            id
        });
        Handle::new(id, Arc::clone(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Population<&'static str, &'static str> {
        let mut pop = Population::new();
        for &c in Condition::ALL {
            pop.expose_condition(c, Arc::new(c.name()));
        }
        for &r in Rarity::ALL {
            pop.expose_rarity(r, Arc::new(r.name()));
        }
        pop
    }

    #[test]
    fn resolve_and_reverse() {
        let reg = Registries::build(&population());
        let lava = reg.condition(Condition::InLava).unwrap();
        assert_eq!(reg.conditions.reverse_resolve(lava), Some(Condition::InLava));
        assert_eq!(reg.conditions.len(), Condition::ALL.len());
        assert_eq!(reg.rarities.len(), Rarity::ALL.len());
    }

    #[test]
    fn ids_follow_registration_order() {
        let reg = Registries::build(&population());
        assert_eq!(reg.condition(Condition::HardMode).unwrap().id(), HandleId(0));
        assert_eq!(reg.condition(Condition::InLava).unwrap().id(), HandleId(2));
        assert_eq!(reg.rarity(Rarity::Any).unwrap().id(), HandleId(0));
    }

    #[test]
    fn missing_symbol_is_absent_not_fatal() {
        let mut pop: Population<&str, &str> = Population::new();
        pop.expose_condition(Condition::Hallow, Arc::new("hallow"));
        let reg = Registries::build(&pop);
        assert!(reg.condition(Condition::InLava).is_none());
        assert!(!reg.conditions.contains(Condition::InLava));
        assert!(reg.condition(Condition::Hallow).is_some());
        assert_eq!(reg.condition(Condition::Hallow).unwrap().id(), HandleId(0));
        assert!(reg.rarities.is_empty());
    }

    #[test]
    fn shared_handle_reverse_maps_to_first_symbol() {
        let shared = Arc::new("ocean");
        let mut pop: Population<&str, &str> = Population::new();
        pop.expose_condition(Condition::OriginalOcean, Arc::clone(&shared));
        pop.expose_condition(Condition::Ocean, Arc::clone(&shared));
        let reg = Registries::build(&pop);

        let a = reg.condition(Condition::OriginalOcean).unwrap();
        let b = reg.condition(Condition::Ocean).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_eq!(reg.conditions.len(), 1);
        assert_eq!(
            reg.conditions.reverse_resolve(b),
            Some(Condition::OriginalOcean)
        );
    }

    #[test]
    fn structurally_equal_handles_stay_distinct() {
        let mut pop: Population<&str, &str> = Population::new();
        pop.expose_condition(Condition::Snow, Arc::new("same"));
        pop.expose_condition(Condition::TrueSnow, Arc::new("same"));
        let reg = Registries::build(&pop);
        assert_eq!(reg.conditions.len(), 2);
        let snow = reg.condition(Condition::Snow).unwrap();
        assert_eq!(reg.conditions.reverse_resolve(snow), Some(Condition::Snow));
    }

    #[test]
    fn foreign_handle_does_not_reverse_resolve() {
        let reg = Registries::build(&population());
        let foreign = Handle::new(HandleId(0), Arc::new("HardMode"));
        assert_eq!(reg.conditions.reverse_resolve(&foreign), None);
        assert_eq!(reg.conditions.identify(foreign.raw()), None);
    }

    #[test]
    fn adopt_assigns_registry_and_fresh_ids() {
        let pop = population();
        let reg = Registries::build(&pop);
        let quest = Arc::new("quest fish");
        let rule = NativeRule {
            possible_items: vec![2450],
            chance_numerator: 1,
            chance_denominator: 1,
            rarity: Some(Arc::clone(pop.rarity(Rarity::Rare).unwrap())),
            conditions: vec![
                Arc::clone(pop.condition(Condition::Jungle).unwrap()),
                Arc::clone(&quest),
                Arc::clone(&quest),
            ],
        };
        let list = reg.adopt(&[rule]);
        let adopted = &list.rules()[0];

        assert_eq!(adopted.conditions[0], *reg.condition(Condition::Jungle).unwrap());
        let fresh = adopted.conditions[1].id();
        assert!(fresh.index() >= reg.conditions.len());
        assert_eq!(adopted.conditions[2].id(), fresh);
        assert_eq!(
            reg.rarities.reverse_resolve(adopted.rarity.as_ref().unwrap()),
            Some(Rarity::Rare)
        );
    }

    #[test]
    fn iter_lists_resolved_symbols_in_order() {
        let mut pop: Population<&str, &str> = Population::new();
        pop.expose_condition(Condition::Ocean, Arc::new("ocean"));
        pop.expose_condition(Condition::HardMode, Arc::new("hm"));
        let reg = Registries::build(&pop);
        let symbols: Vec<Condition> = reg.conditions.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![Condition::HardMode, Condition::Ocean]);
    }
}
