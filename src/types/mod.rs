mod error;
mod handle;
mod rule;
mod rule_list;
mod symbol;

pub(crate) use handle::identity;

pub use error::CompileError;
pub use handle::{Handle, HandleId};
pub use rule::{CompiledRule, DeclarativeRule, ItemId, NativeRule};
pub use rule_list::RuleList;
pub use symbol::{Condition, Rarity, Region, Symbol};
