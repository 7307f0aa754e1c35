use std::fmt;

/// A closed set of symbolic tags with stable, case-insensitive names.
///
/// Implemented by [`Condition`] and [`Rarity`]. The order of [`Symbol::ALL`]
/// is the order in which registries read handles back from the engine.
pub trait Symbol: Copy + Eq + std::hash::Hash + fmt::Debug + 'static {
    /// Every value of the tag set, in registration order.
    const ALL: &'static [Self];

    /// Canonical name used in configuration and export documents.
    fn name(self) -> &'static str;

    /// Case-insensitive exact match against the canonical names.
    fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// All canonical names, in registration order.
    fn available_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.name()).collect()
    }
}

macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl Symbol for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

symbol_enum! {
    /// A fishing condition the engine knows how to test.
    pub enum Condition {
        HardMode => "HardMode",
        /// Pre-hardmode world.
        EarlyMode => "EarlyMode",
        InLava => "InLava",
        InHoney => "InHoney",
        Junk => "Junk",
        Crate => "Crate",
        /// Enemies are being spawned by the catch. Loot never drops while it holds.
        AnyEnemies => "AnyEnemies",
        CanFishInLava => "CanFishInLava",
        /// Dungeon, after Skeletron is defeated.
        Dungeon => "Dungeon",
        Beach => "Beach",
        Hallow => "Hallow",
        GlowingMushrooms => "GlowingMushrooms",
        TrueDesert => "TrueDesert",
        TrueSnow => "TrueSnow",
        Remix => "Remix",
        /// Sky.
        Height0 => "Height0",
        /// Surface.
        Height1 => "Height1",
        /// Underground.
        Height2 => "Height2",
        /// Caverns.
        Height3 => "Height3",
        Height1And2 => "Height1And2",
        HeightAbove1 => "HeightAbove1",
        HeightAboveAnd1 => "HeightAboveAnd1",
        HeightUnder2 => "HeightUnder2",
        HeightAbove2 => "HeightAbove2",
        UnderRockLayer => "UnderRockLayer",
        Corruption => "Corruption",
        Crimson => "Crimson",
        Jungle => "Jungle",
        Snow => "Snow",
        Desert => "Desert",
        RolledHallowDesert => "RolledHallowDesert",
        OriginalOcean => "OriginalOcean",
        RemixOcean => "RemixOcean",
        /// Either ocean variant.
        Ocean => "Ocean",
        /// More than 1000 water tiles in the pool.
        Water1000 => "Water1000",
        BloodMoon => "BloodMoon",
        DidNotUseCombatBook => "DidNotUseCombatBook",
    }
}

symbol_enum! {
    /// The rarity roll a rule requires.
    pub enum Rarity {
        /// Always matches.
        Any => "Any",
        Legendary => "Legendary",
        VeryRare => "VeryRare",
        Rare => "Rare",
        Uncommon => "Uncommon",
        Common => "Common",
        /// Not legendary, not very rare, and uncommon.
        BombRarity => "BombRarity",
        UncommonOrCommon => "UncommonOrCommon",
    }
}

impl Default for Rarity {
    fn default() -> Self {
        Self::Common
    }
}

/// One of the five mutually prioritized exclusive regions.
///
/// Variant order is priority order: a lower [`priority`](Region::priority)
/// is emitted earlier in a compiled list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Lava,
    Honey,
    Junk,
    Crate,
    Ocean,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Lava,
        Region::Honey,
        Region::Junk,
        Region::Crate,
        Region::Ocean,
    ];

    #[must_use]
    pub fn condition(self) -> Condition {
        match self {
            Region::Lava => Condition::InLava,
            Region::Honey => Condition::InHoney,
            Region::Junk => Condition::Junk,
            Region::Crate => Condition::Crate,
            Region::Ocean => Condition::Ocean,
        }
    }

    #[must_use]
    pub fn priority(self) -> u32 {
        self as u32
    }

    /// The highest-priority region among `conditions`, if any.
    #[must_use]
    pub fn of(conditions: &[Condition]) -> Option<Region> {
        Self::ALL
            .into_iter()
            .find(|region| conditions.contains(&region.condition()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.condition().name())
    }
}
