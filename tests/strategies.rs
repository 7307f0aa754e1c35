#![allow(dead_code)]

use fishdrop::{Condition, DeclarativeRule, Rarity};
use proptest::prelude::*;

// --- Symbol pools ---
// Every exclusive region condition, plus a handful of ordinary ones so that
// some rules stay ungrouped.

pub const CONDITIONS: &[Condition] = &[
    Condition::InLava,
    Condition::InHoney,
    Condition::Junk,
    Condition::Crate,
    Condition::Ocean,
    Condition::HardMode,
    Condition::Jungle,
    Condition::Snow,
    Condition::Hallow,
    Condition::BloodMoon,
];

pub const RARITIES: &[Rarity] = &[
    Rarity::Legendary,
    Rarity::VeryRare,
    Rarity::Rare,
    Rarity::Uncommon,
    Rarity::Common,
];

/// A rule with at least one item, so it is never a barrier.
pub fn arb_rule() -> impl Strategy<Value = DeclarativeRule> {
    (
        prop::collection::vec(1_i32..5000, 1..4),
        1_i32..5,
        5_i32..20,
        prop::option::of(prop::sample::select(RARITIES)),
        prop::collection::vec(prop::sample::select(CONDITIONS), 0..4),
    )
        .prop_map(|(items, num, den, rarity, mut conditions)| {
            conditions.dedup();
            DeclarativeRule {
                possible_items: items,
                chance_numerator: num,
                chance_denominator: den,
                rarity,
                conditions,
            }
        })
}

pub fn arb_rules() -> impl Strategy<Value = Vec<DeclarativeRule>> {
    prop::collection::vec(arb_rule(), 0..24)
}

/// Conditions active during a generated catch.
pub fn arb_active() -> impl Strategy<Value = Vec<Condition>> {
    prop::collection::vec(prop::sample::select(CONDITIONS), 0..5)
}

/// Rarity rolled for a generated catch.
pub fn arb_rarity_catch() -> impl Strategy<Value = Rarity> {
    prop::sample::select(RARITIES)
}
