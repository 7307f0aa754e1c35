//! Query-time dispatch between the compiled custom list and the engine's own.
//!
//! The custom list is published through an [`ArcSwap`]: a reload compiles a
//! complete new list off to the side and swaps it in with one store, so a
//! concurrent [`DropResolver::resolve_drop`] sees either the old list or the
//! new one, never a half-built one.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::compile::compile;
use crate::config::DropConfig;
use crate::engine::Engine;
use crate::export::{export, render, statistics, ExportStatistics, ExportedRule, ItemNames};
use crate::registry::Registries;
use crate::types::{ItemId, RuleList};

/// What one reload published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Declarative rules compiled into the custom list.
    pub loaded: usize,
    /// Declarative rules that failed to convert.
    pub skipped: usize,
    /// Length of the published list, barriers included.
    pub rules: usize,
}

impl fmt::Display for ReloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} custom rules loaded, {} skipped, {} entries published",
            self.loaded, self.skipped, self.rules
        )
    }
}

struct Published<C, R> {
    custom: Arc<RuleList<C, R>>,
    enable_custom: bool,
    enable_vanilla: bool,
}

/// Resolves fishing drops against the custom rules first, then the engine's
/// own rules.
pub struct DropResolver<E: Engine> {
    engine: E,
    registries: Registries<E::Condition, E::Rarity>,
    vanilla: RuleList<E::Condition, E::Rarity>,
    state: ArcSwap<Published<E::Condition, E::Rarity>>,
}

impl<E: Engine> DropResolver<E> {
    /// Populate the registries from a single run of the engine's population
    /// routine, keep the populated list as the vanilla rules, and publish the
    /// custom rules compiled from `config`.
    pub fn new(engine: E, config: &DropConfig) -> Self {
        let population = engine.populate();
        let registries = Registries::build(&population);
        let vanilla = registries.adopt(population.rules());
        info!(vanilla = %vanilla, "drop resolver initialized");

        let resolver = Self {
            engine,
            registries,
            vanilla,
            state: ArcSwap::from_pointee(Published {
                custom: Arc::new(RuleList::new()),
                enable_custom: config.enable_custom_rules,
                enable_vanilla: config.enable_vanilla_rules,
            }),
        };
        resolver.reload(config);
        resolver
    }

    /// Rebuild the custom list from `config` and publish it, together with
    /// the source toggles, in one atomic swap.
    ///
    /// A configuration without custom rules publishes an empty list.
    pub fn reload(&self, config: &DropConfig) -> ReloadSummary {
        let (custom, loaded, skipped) = if config.custom_rules.is_empty() {
            (RuleList::new(), 0, 0)
        } else {
            let compiled = compile(&config.declarative_rules(), &self.registries);
            (compiled.list, compiled.loaded, compiled.skipped)
        };

        let summary = ReloadSummary {
            loaded,
            skipped,
            rules: custom.len(),
        };
        self.state.store(Arc::new(Published {
            custom: Arc::new(custom),
            enable_custom: config.enable_custom_rules,
            enable_vanilla: config.enable_vanilla_rules,
        }));

        if loaded > 0 {
            info!(%summary, "custom drop rules loaded");
        }
        summary
    }

    /// The item to drop for `context`, or `0` for none.
    ///
    /// Each enabled source costs one engine call; custom rules are asked
    /// first and a non-zero answer stops there.
    pub fn resolve_drop(&self, context: &E::Context) -> ItemId {
        let state = self.state.load();
        if state.enable_custom {
            let item = self.engine.evaluate(&state.custom, context);
            if item != 0 {
                return item;
            }
        }
        if state.enable_vanilla {
            return self.engine.evaluate(&self.vanilla, context);
        }
        0
    }

    /// The currently published custom list.
    #[must_use]
    pub fn custom_rules(&self) -> Arc<RuleList<E::Condition, E::Rarity>> {
        Arc::clone(&self.state.load().custom)
    }

    /// The engine's own list, as populated at construction.
    #[must_use]
    pub fn vanilla_rules(&self) -> &RuleList<E::Condition, E::Rarity> {
        &self.vanilla
    }

    #[must_use]
    pub fn registries(&self) -> &Registries<E::Condition, E::Rarity> {
        &self.registries
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Export the engine's own list.
    #[must_use]
    pub fn export_vanilla(&self, skip_partial: bool) -> Vec<ExportedRule> {
        export(&self.vanilla, &self.registries, skip_partial)
    }

    /// Mapping statistics for the engine's own list.
    #[must_use]
    pub fn vanilla_statistics(&self) -> ExportStatistics {
        statistics(&self.vanilla, &self.registries)
    }

    /// Render the fully mapped part of the engine's own list as a rule
    /// document ready to be edited into a custom configuration.
    #[must_use]
    pub fn export_document(&self, names: &impl ItemNames) -> String {
        let rules = self.export_vanilla(true);
        render(&rules, &self.vanilla_statistics(), names)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use super::*;
    use crate::config::RuleEntry;
    use crate::engine::Population;
    use crate::types::{Condition, DeclarativeRule, NativeRule, Rarity, Symbol};

    /// Answers with the first item of the first non-barrier rule in a list,
    /// and counts calls.
    struct FirstItem {
        calls: Cell<usize>,
        vanilla_item: i32,
    }

    impl Engine for FirstItem {
        type Condition = &'static str;
        type Rarity = &'static str;
        type Context = ();

        fn populate(&self) -> Population<&'static str, &'static str> {
            let mut pop = Population::new();
            for &c in Condition::ALL {
                pop.expose_condition(c, Arc::new(c.name()));
            }
            for &r in Rarity::ALL {
                pop.expose_rarity(r, Arc::new(r.name()));
            }
            pop.push_rule(NativeRule {
                possible_items: vec![self.vanilla_item],
                chance_numerator: 1,
                chance_denominator: 1,
                rarity: None,
                conditions: Vec::new(),
            });
            pop
        }

        fn evaluate(&self, list: &RuleList<&'static str, &'static str>, _: &()) -> ItemId {
            self.calls.set(self.calls.get() + 1);
            list.iter()
                .find(|r| !r.is_barrier())
                .map_or(0, |r| r.possible_items[0])
        }
    }

    fn config(items: &[i32], custom: bool, vanilla: bool) -> DropConfig {
        DropConfig {
            enable_custom_rules: custom,
            enable_vanilla_rules: vanilla,
            custom_rules: items
                .iter()
                .map(|&i| RuleEntry::from(&DeclarativeRule::new([i])))
                .collect(),
        }
    }

    fn resolver(cfg: &DropConfig, vanilla_item: i32) -> DropResolver<FirstItem> {
        DropResolver::new(
            FirstItem {
                calls: Cell::new(0),
                vanilla_item,
            },
            cfg,
        )
    }

    #[test]
    fn custom_wins_over_vanilla() {
        let r = resolver(&config(&[11], true, true), 99);
        assert_eq!(r.resolve_drop(&()), 11);
        assert_eq!(r.engine().calls.get(), 1);
    }

    #[test]
    fn falls_back_to_vanilla_on_zero() {
        let r = resolver(&config(&[], true, true), 99);
        assert_eq!(r.resolve_drop(&()), 99);
        assert_eq!(r.engine().calls.get(), 2);
    }

    #[test]
    fn disabled_sources_are_not_called() {
        let r = resolver(&config(&[11], false, true), 99);
        assert_eq!(r.resolve_drop(&()), 99);
        assert_eq!(r.engine().calls.get(), 1);

        let r = resolver(&config(&[11], false, false), 99);
        assert_eq!(r.resolve_drop(&()), 0);
        assert_eq!(r.engine().calls.get(), 0);
    }

    #[test]
    fn custom_only_returns_zero_without_vanilla() {
        let r = resolver(&config(&[], true, false), 99);
        assert_eq!(r.resolve_drop(&()), 0);
    }

    #[test]
    fn empty_config_publishes_empty_list() {
        let r = resolver(&config(&[], true, true), 99);
        assert!(r.custom_rules().is_empty());
    }

    #[test]
    fn reload_replaces_list_and_toggles() {
        let r = resolver(&config(&[11], true, true), 99);
        let before = r.custom_rules();

        let summary = r.reload(&config(&[22, 23], true, false));
        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.rules, 3);
        assert_eq!(r.resolve_drop(&()), 22);

        // the old snapshot is untouched
        assert_eq!(before.len(), 2);
        assert_eq!(r.custom_rules().len(), 3);
    }

    #[test]
    fn vanilla_list_is_adopted() {
        let r = resolver(&config(&[], true, true), 42);
        assert_eq!(r.vanilla_rules().len(), 1);
        let exported = r.export_vanilla(true);
        assert_eq!(exported[0].possible_items, vec![42]);
        assert_eq!(r.vanilla_statistics().total, 1);
        assert!(r.export_document(&crate::export::NoItemNames).contains("- 42 # Unknown(42)"));
    }

    #[test]
    fn summary_display() {
        let s = ReloadSummary {
            loaded: 3,
            skipped: 1,
            rules: 5,
        };
        assert_eq!(s.to_string(), "3 custom rules loaded, 1 skipped, 5 entries published");
    }
}
