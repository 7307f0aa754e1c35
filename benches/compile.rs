use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fishdrop::{
    compile, Condition, DeclarativeRule, DropConfig, DropResolver, Engine, ItemId, Population,
    Rarity, RuleEntry, RuleList, Symbol,
};

/// Engine whose handles are the symbol names and whose context is the set of
/// active condition names.
struct Names;

impl Engine for Names {
    type Condition = &'static str;
    type Rarity = &'static str;
    type Context = Vec<&'static str>;

    fn populate(&self) -> Population<&'static str, &'static str> {
        let mut pop = Population::new();
        for &c in Condition::ALL {
            pop.expose_condition(c, Arc::new(c.name()));
        }
        for &r in Rarity::ALL {
            pop.expose_rarity(r, Arc::new(r.name()));
        }
        pop
    }

    fn evaluate(&self, list: &RuleList<&'static str, &'static str>, active: &Vec<&'static str>) -> ItemId {
        list.iter()
            .find(|r| r.conditions.iter().all(|c| active.contains(&**c.raw())))
            .map_or(0, |r| r.possible_items.first().copied().unwrap_or(0))
    }
}

/// `n` rules spread over every region and a few ordinary conditions.
fn build_rules(n: usize) -> Vec<DeclarativeRule> {
    const POOL: &[Condition] = &[
        Condition::InLava,
        Condition::Ocean,
        Condition::Jungle,
        Condition::Crate,
        Condition::Snow,
        Condition::InHoney,
        Condition::HardMode,
        Condition::Junk,
    ];
    (0..n)
        .map(|i| {
            DeclarativeRule::new([i as ItemId + 1])
                .when(POOL[i % POOL.len()])
                .when(POOL[(i / POOL.len()) % POOL.len()])
        })
        .collect()
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let population = Names.populate();
    let registries = fishdrop::Registries::build(&population);

    for &n in &[10, 100, 1000] {
        let rules = build_rules(n);
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| compile(black_box(&rules), &registries));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_drop");

    for &n in &[10, 100, 1000] {
        let config = DropConfig {
            custom_rules: build_rules(n).iter().map(RuleEntry::from).collect(),
            ..DropConfig::default()
        };
        let resolver = DropResolver::new(Names, &config);
        // worst case: nothing matches until the end of the list
        let active = vec!["Remix"];
        group.bench_function(&format!("{n}_rules_miss"), |b| {
            b.iter(|| resolver.resolve_drop(black_box(&active)));
        });
        let lava = vec!["InLava", "Jungle"];
        group.bench_function(&format!("{n}_rules_hit"), |b| {
            b.iter(|| resolver.resolve_drop(black_box(&lava)));
        });
    }
    group.finish();
}

fn bench_reload(c: &mut Criterion) {
    let config = DropConfig {
        custom_rules: build_rules(200).iter().map(RuleEntry::from).collect(),
        ..DropConfig::default()
    };
    let resolver = DropResolver::new(Names, &config);
    c.bench_function("reload_200_rules", |b| {
        b.iter(|| resolver.reload(black_box(&config)));
    });
}

criterion_group!(benches, bench_compile, bench_resolve, bench_reload);
criterion_main!(benches);
