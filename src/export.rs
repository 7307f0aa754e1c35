//! Reverse translation: engine rule lists back into declarative rules.
//!
//! Used to bootstrap a custom rule file from the engine's own list and to
//! report how much of that list the symbolic names can describe.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::registry::Registries;
use crate::types::{CompiledRule, Condition, DeclarativeRule, ItemId, Rarity, RuleList, Symbol};

/// A compiled rule translated back into symbolic names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportedRule {
    pub possible_items: Vec<ItemId>,
    pub chance_numerator: i32,
    pub chance_denominator: i32,
    /// `None` when the rule had no rarity or the registry does not know it.
    pub rarity: Option<Rarity>,
    /// Conditions that reverse-resolved, in original order.
    pub conditions: Vec<Condition>,
    /// Conditions that did not reverse-resolve.
    pub unmapped_conditions: usize,
}

/// How completely an exported rule's conditions were recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStatus {
    /// Every condition resolved (including rules with none).
    Full,
    /// Some conditions resolved, some did not.
    Partial,
    /// The rule had conditions and none resolved.
    Unmapped,
}

impl ExportedRule {
    #[must_use]
    pub fn mapping(&self) -> MappingStatus {
        if self.unmapped_conditions == 0 {
            MappingStatus::Full
        } else if self.conditions.is_empty() {
            MappingStatus::Unmapped
        } else {
            MappingStatus::Partial
        }
    }

    /// Only fully mapped rules are safe to re-import: dropping a condition
    /// would make the rule match strictly more situations than the original.
    #[must_use]
    pub fn is_fully_mapped(&self) -> bool {
        self.unmapped_conditions == 0
    }

    /// The rule as it would be written in configuration.
    ///
    /// A rule the engine left without a recognised rarity matches every
    /// rarity, so it comes back as [`Rarity::Any`] rather than falling to the
    /// `Common` default on re-import.
    #[must_use]
    pub fn to_declarative(&self) -> DeclarativeRule {
        DeclarativeRule {
            possible_items: self.possible_items.clone(),
            chance_numerator: self.chance_numerator,
            chance_denominator: self.chance_denominator,
            rarity: Some(self.rarity.unwrap_or(Rarity::Any)),
            conditions: self.conditions.clone(),
        }
    }
}

/// Translate a single compiled rule.
#[must_use]
pub fn export_rule<C, R>(rule: &CompiledRule<C, R>, registries: &Registries<C, R>) -> ExportedRule {
    let rarity = rule
        .rarity
        .as_ref()
        .and_then(|r| registries.rarities.reverse_resolve(r));
    let conditions: Vec<Condition> = rule
        .conditions
        .iter()
        .filter_map(|c| registries.conditions.reverse_resolve(c))
        .collect();

    ExportedRule {
        possible_items: rule.possible_items.clone(),
        chance_numerator: rule.chance_numerator,
        chance_denominator: rule.chance_denominator,
        rarity,
        unmapped_conditions: rule.conditions.len() - conditions.len(),
        conditions,
    }
}

/// Translate every rule of `list`, in order.
///
/// With `skip_partial`, rules that are not fully mapped are left out.
#[must_use]
pub fn export<C, R>(
    list: &RuleList<C, R>,
    registries: &Registries<C, R>,
    skip_partial: bool,
) -> Vec<ExportedRule> {
    list.iter()
        .map(|rule| export_rule(rule, registries))
        .filter(|rule| !skip_partial || rule.is_fully_mapped())
        .collect()
}

/// Mapping counts over an unfiltered export of `list`.
#[must_use]
pub fn statistics<C, R>(list: &RuleList<C, R>, registries: &Registries<C, R>) -> ExportStatistics {
    ExportStatistics::from_rules(&export(list, registries, false))
}

/// How many rules of a list map fully, partially, or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportStatistics {
    pub total: usize,
    pub fully_mapped: usize,
    pub partially_mapped: usize,
    pub unmapped: usize,
}

impl ExportStatistics {
    #[must_use]
    pub fn from_rules(rules: &[ExportedRule]) -> Self {
        let mut stats = Self {
            total: rules.len(),
            ..Self::default()
        };
        for rule in rules {
            match rule.mapping() {
                MappingStatus::Full => stats.fully_mapped += 1,
                MappingStatus::Partial => stats.partially_mapped += 1,
                MappingStatus::Unmapped => stats.unmapped += 1,
            }
        }
        stats
    }

    /// `value / total` as a percentage rounded to two decimals; `0` when
    /// `total` is zero.
    #[must_use]
    pub fn percentage(value: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (value as f64 * 100.0 / total as f64 * 100.0).round() / 100.0
    }
}

impl fmt::Display for ExportStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total: {}, fully mapped: {} ({:.2}%), partially mapped: {} ({:.2}%), unmapped: {} ({:.2}%)",
            self.total,
            self.fully_mapped,
            Self::percentage(self.fully_mapped, self.total),
            self.partially_mapped,
            Self::percentage(self.partially_mapped, self.total),
            self.unmapped,
            Self::percentage(self.unmapped, self.total),
        )
    }
}

/// Looks up a display name for an item id.
pub trait ItemNames {
    fn item_name(&self, id: ItemId) -> Option<String>;
}

/// An [`ItemNames`] that knows no items.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoItemNames;

impl ItemNames for NoItemNames {
    fn item_name(&self, _id: ItemId) -> Option<String> {
        None
    }
}

impl ItemNames for HashMap<ItemId, String> {
    fn item_name(&self, id: ItemId) -> Option<String> {
        self.get(&id).cloned()
    }
}

impl ItemNames for BTreeMap<ItemId, String> {
    fn item_name(&self, id: ItemId) -> Option<String> {
        self.get(&id).cloned()
    }
}

/// Render exported rules as a YAML rule document followed by a statistics
/// report in trailing comments.
///
/// The document parses back with
/// [`parse_rule_document`](crate::config::parse_rule_document).
#[must_use]
pub fn render(rules: &[ExportedRule], stats: &ExportStatistics, names: &impl ItemNames) -> String {
    ExportDocument {
        rules,
        stats,
        names,
    }
    .to_string()
}

struct ExportDocument<'a, N> {
    rules: &'a [ExportedRule],
    stats: &'a ExportStatistics,
    names: &'a N,
}

impl<N: ItemNames> fmt::Display for ExportDocument<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Fishing drop rule export")?;
        writeln!(f, "# Generated automatically. Rules whose conditions cannot all be")?;
        writeln!(f, "# named (quest fish, special world seeds) are left out.")?;
        writeln!(f)?;
        if self.rules.is_empty() {
            writeln!(f, "rules: []")?;
        } else {
            writeln!(f, "rules:")?;
        }

        for rule in self.rules {
            if rule.possible_items.is_empty() {
                writeln!(f, "  - possibleItems: []")?;
            } else {
                writeln!(f, "  - possibleItems:")?;
                for &id in &rule.possible_items {
                    let name = self
                        .names
                        .item_name(id)
                        .unwrap_or_else(|| format!("Unknown({id})"));
                    writeln!(f, "      - {id} # {name}")?;
                }
            }
            writeln!(f, "    chanceNumerator: {}", rule.chance_numerator)?;
            writeln!(f, "    chanceDenominator: {}", rule.chance_denominator)?;
            let rarity = rule.rarity.unwrap_or(Rarity::Any);
            writeln!(f, "    rarity: {}", rarity.name())?;
            if !rule.conditions.is_empty() {
                writeln!(f, "    conditions:")?;
                for condition in &rule.conditions {
                    writeln!(f, "      - {}", condition.name())?;
                }
            }
            writeln!(f)?;
        }

        let s = self.stats;
        let pct = |v| ExportStatistics::percentage(v, s.total);
        writeln!(f)?;
        writeln!(f, "# ====== Export statistics ======")?;
        writeln!(f, "# Total rules: {}", s.total)?;
        writeln!(f, "# Fully mapped: {} ({:.2}%)", s.fully_mapped, pct(s.fully_mapped))?;
        writeln!(
            f,
            "# Partially mapped: {} ({:.2}%)",
            s.partially_mapped,
            pct(s.partially_mapped)
        )?;
        writeln!(f, "# Unmapped: {} ({:.2}%)", s.unmapped, pct(s.unmapped))?;
        writeln!(f, "# Exported: {} rules", self.rules.len())
    }
}
