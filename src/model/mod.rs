mod snapshot;
mod stat;

pub use snapshot::EffectiveStatSnapshot;
pub use stat::{Currency, Direction, EntityClass, FormulaKind, StatDefinition, StatKey};
