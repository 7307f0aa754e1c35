use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, error, info};

use crate::registry::Registries;
use crate::types::{
    CompileError, CompiledRule, Condition, DeclarativeRule, Handle, Rarity, Region, RuleList,
    Symbol,
};

/// Result of compiling a batch of declarative rules.
#[derive(Debug)]
pub struct Compilation<C, R> {
    pub list: RuleList<C, R>,
    /// Declarative rules converted successfully. Barriers are not counted.
    pub loaded: usize,
    /// Declarative rules that failed to convert and were left out.
    pub skipped: usize,
}

impl<C, R> fmt::Display for Compilation<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} loaded, {} skipped, {}",
            self.loaded, self.skipped, self.list
        )
    }
}

/// Compile declarative rules into an engine rule list.
///
/// Output order:
/// 1. an `AnyEnemies` barrier, when the registry resolves that condition;
/// 2. one group per exclusive region present, in region priority order, each
///    closed by a barrier on the region's condition;
/// 3. rules touching no exclusive region, unterminated.
///
/// Within a group rules keep their input order. A rule whose conversion fails
/// is logged and skipped; unknown or unresolvable conditions are dropped from
/// the rule rather than failing it.
pub fn compile<C, R>(rules: &[DeclarativeRule], registries: &Registries<C, R>) -> Compilation<C, R> {
    let mut out = Vec::with_capacity(rules.len() + Region::ALL.len() + 1);

    if let Some(guard) = barrier(Condition::AnyEnemies, registries) {
        out.push(guard);
        info!("added AnyEnemies head barrier");
    }

    let (regions, ungrouped) = group_by_region(rules);
    let mut loaded = 0;
    let mut skipped = 0;

    let mut emit = |rule: &DeclarativeRule, out: &mut Vec<CompiledRule<C, R>>| {
        match compile_rule(rule, registries) {
            Ok(compiled) => {
                out.push(compiled);
                loaded += 1;
            }
            Err(e) => {
                error!(items = ?rule.possible_items, "failed to load drop rule: {e}");
                skipped += 1;
            }
        }
    };

    for (region, group) in &regions {
        for rule in group.iter().copied() {
            emit(rule, &mut out);
        }
        if let Some(stopper) = barrier(region.condition(), registries) {
            out.push(stopper);
            info!(region = %region, "added region barrier");
        }
    }
    for rule in ungrouped {
        emit(rule, &mut out);
    }

    Compilation {
        list: out.into(),
        loaded,
        skipped,
    }
}

/// Partition rules by their highest-priority exclusive region, keeping input
/// order inside each partition. The map iterates in priority order.
fn group_by_region(
    rules: &[DeclarativeRule],
) -> (BTreeMap<Region, Vec<&DeclarativeRule>>, Vec<&DeclarativeRule>) {
    let mut regions: BTreeMap<Region, Vec<&DeclarativeRule>> = BTreeMap::new();
    let mut ungrouped = Vec::new();
    for rule in rules {
        match Region::of(&rule.conditions) {
            Some(region) => regions.entry(region).or_default().push(rule),
            None => ungrouped.push(rule),
        }
    }
    (regions, ungrouped)
}

/// Convert one declarative rule. Conditions the registry cannot resolve are
/// dropped; a missing or unresolvable rarity falls back to `Common`.
pub fn compile_rule<C, R>(
    rule: &DeclarativeRule,
    registries: &Registries<C, R>,
) -> Result<CompiledRule<C, R>, CompileError> {
    let rarity = rule
        .rarity
        .and_then(|r| registries.rarity(r))
        .or_else(|| registries.rarity(Rarity::Common))
        .ok_or(CompileError::MissingRarity {
            rarity: rule.rarity.unwrap_or_default(),
        })?;

    let conditions: Vec<Handle<C>> = rule
        .conditions
        .iter()
        .filter_map(|&c| {
            let handle = registries.condition(c);
            if handle.is_none() {
                debug!(condition = c.name(), "dropping unresolved condition");
            }
            handle.cloned()
        })
        .collect();

    Ok(CompiledRule {
        possible_items: rule.possible_items.clone(),
        chance_numerator: rule.chance_numerator,
        chance_denominator: rule.chance_denominator,
        rarity: Some(rarity.clone()),
        conditions,
    })
}

fn barrier<C, R>(condition: Condition, registries: &Registries<C, R>) -> Option<CompiledRule<C, R>> {
    let handle = registries.condition(condition)?;
    Some(CompiledRule::barrier(
        handle.clone(),
        registries.rarity(Rarity::Any).cloned(),
    ))
}
