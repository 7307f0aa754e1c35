//! Declarative fishing drop rules for an engine that only understands its own
//! opaque condition and rarity objects.
//!
//! [`Registries`] name the engine's objects, [`compile`] turns declarative
//! rules into an ordered engine list with barriers, [`export`] goes the other
//! way, and [`DropResolver`] consults the compiled list before the engine's
//! own.

mod compile;
pub mod config;
mod engine;
mod error;
mod export;
mod registry;
mod resolve;
mod types;

pub use compile::{compile, compile_rule, Compilation};
pub use config::{DropConfig, RuleEntry};
pub use engine::{Engine, Population};
pub use error::FishdropError;
pub use export::{
    export, export_rule, render, statistics, ExportStatistics, ExportedRule, ItemNames,
    MappingStatus, NoItemNames,
};
pub use registry::{Registries, SymbolRegistry};
pub use resolve::{DropResolver, ReloadSummary};
pub use types::{
    CompileError, CompiledRule, Condition, DeclarativeRule, Handle, HandleId, ItemId, NativeRule,
    Rarity, Region, RuleList, Symbol,
};
