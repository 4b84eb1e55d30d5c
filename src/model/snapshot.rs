use std::collections::BTreeMap;

use super::stat::StatKey;

/// The per-tick, fully composed view of an entity's effective stats:
/// persisted ledger value plus every unlocked bonus contribution.
///
/// Rebuilt and discarded every simulation tick; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveStatSnapshot {
    values: BTreeMap<StatKey, f64>,
}

impl EffectiveStatSnapshot {
    pub fn new(values: BTreeMap<StatKey, f64>) -> Self {
        Self { values }
    }

    /// Effective value for `key`, 0 if the entity does not own the stat.
    pub fn get(&self, key: StatKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: StatKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
