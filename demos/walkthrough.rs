use std::collections::HashMap;
use std::sync::Arc;

use fishdrop::{
    Condition, DropConfig, DropResolver, Engine, ItemId, NativeRule, Population, Rarity, RuleList,
    Symbol,
};

/// A toy engine: handles are symbol names, a catch is the list of active
/// condition names plus the rolled rarity, and the first matching rule wins.
struct ToyEngine {
    conditions: HashMap<Condition, Arc<&'static str>>,
    rarities: HashMap<Rarity, Arc<&'static str>>,
}

struct Catch {
    active: Vec<&'static str>,
    rarity: &'static str,
}

impl ToyEngine {
    fn new() -> Self {
        Self {
            conditions: Condition::ALL.iter().map(|&c| (c, Arc::new(c.name()))).collect(),
            rarities: Rarity::ALL.iter().map(|&r| (r, Arc::new(r.name()))).collect(),
        }
    }
}

impl Engine for ToyEngine {
    type Condition = &'static str;
    type Rarity = &'static str;
    type Context = Catch;

    fn populate(&self) -> Population<&'static str, &'static str> {
        let mut pop = Population::new();
        for (&c, handle) in &self.conditions {
            pop.expose_condition(c, Arc::clone(handle));
        }
        for (&r, handle) in &self.rarities {
            pop.expose_rarity(r, Arc::clone(handle));
        }
        // the engine's own list: bass anywhere, plus a quest fish nobody can name
        pop.push_rule(NativeRule {
            possible_items: vec![2290],
            chance_numerator: 1,
            chance_denominator: 1,
            rarity: Some(Arc::clone(&self.rarities[&Rarity::Common])),
            conditions: Vec::new(),
        });
        pop.push_rule(NativeRule {
            possible_items: vec![2450],
            chance_numerator: 1,
            chance_denominator: 1,
            rarity: None,
            conditions: vec![Arc::new("questFish")],
        });
        pop
    }

    fn evaluate(&self, list: &RuleList<&'static str, &'static str>, catch: &Catch) -> ItemId {
        for rule in list {
            let rarity_ok = rule
                .rarity
                .as_ref()
                .map_or(true, |r| **r.raw() == "Any" || **r.raw() == catch.rarity);
            let conditions_ok = rule.conditions.iter().all(|c| catch.active.contains(&**c.raw()));
            if rarity_ok && conditions_ok {
                return rule.possible_items.first().copied().unwrap_or(0);
            }
        }
        0
    }
}

fn main() {
    let config = DropConfig::from_yaml_str(
        r"
enableCustomFishRules: true
enableVanillaFishRules: true
customFishRules:
  - possibleItems: [2312]
    conditions: [InLava]
    rarity: Rare
  - possibleItems: [2305]
    conditions: [Snow]
",
    )
    .expect("failed to parse config");

    let resolver = DropResolver::new(ToyEngine::new(), &config);
    println!("custom: {}", resolver.custom_rules());
    println!("vanilla: {}", resolver.vanilla_rules());

    let catches = [
        ("rare catch in lava", Catch { active: vec!["InLava"], rarity: "Rare" }),
        ("common catch in lava", Catch { active: vec!["InLava"], rarity: "Common" }),
        ("snow", Catch { active: vec!["Snow"], rarity: "Common" }),
        ("enemies in snow", Catch { active: vec!["Snow", "AnyEnemies"], rarity: "Common" }),
    ];
    for (label, catch) in &catches {
        println!("{label}: {}", resolver.resolve_drop(catch));
    }

    println!("{}", resolver.vanilla_statistics());
    let names = HashMap::from([(2290, "Bass".to_owned())]);
    print!("{}", resolver.export_document(&names));
}
