use std::collections::{BTreeMap, BTreeSet};

use crate::model::{EffectiveStatSnapshot, StatKey};

use super::ledger::UpgradeEntity;

/// Anything that conditionally adds to a stat without owning its level or
/// cost: an equipped gunner, a meta-progression node. The unlocked set is
/// owned by the contributor's own lifecycle; this engine only reads it.
pub trait BonusProvider {
    fn unlocked_stats(&self) -> &BTreeSet<StatKey>;
    /// Additive contribution for `key`; only counted while `key` is in
    /// `unlocked_stats`.
    fn bonus_for(&self, key: StatKey) -> f64;
}

/// Fold the persisted ledger values and every unlocked provider contribution
/// into one per-tick snapshot.
///
/// Pure read: mutates neither the entity nor any provider, so it can run for
/// every consuming entity every tick while purchases mutate the ledger from
/// their own call site. Provider order never matters (the fold is a plain
/// sum), and an empty provider list reduces to the raw ledger values.
pub fn compose(entity: &UpgradeEntity, providers: &[&dyn BonusProvider]) -> EffectiveStatSnapshot {
    let mut values = BTreeMap::new();
    for (key, base) in entity.stat_values() {
        let mut total = base;
        for provider in providers {
            if provider.unlocked_stats().contains(&key) {
                total += provider.bonus_for(key);
            }
        }
        values.insert(key, total);
    }
    EffectiveStatSnapshot::new(values)
}

/// The "unlock at level N" gating rule: a stat becomes shareable once the
/// contributor's own level for it reaches the authored threshold. Stats with
/// no threshold are never shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneUnlocks {
    thresholds: BTreeMap<StatKey, u32>,
}

impl MilestoneUnlocks {
    pub fn new(thresholds: impl IntoIterator<Item = (StatKey, u32)>) -> Self {
        Self {
            thresholds: thresholds.into_iter().collect(),
        }
    }

    /// The milestone table gunners ship with.
    pub fn standard_gunner() -> Self {
        Self::new([
            (StatKey::Damage, 1),
            (StatKey::FireRate, 5),
            (StatKey::CriticalChance, 10),
        ])
    }

    pub fn threshold(&self, key: StatKey) -> Option<u32> {
        self.thresholds.get(&key).copied()
    }

    pub fn unlocked_for(&self, entity: &UpgradeEntity) -> BTreeSet<StatKey> {
        entity
            .stat_levels()
            .filter(|(key, level)| {
                self.threshold(*key)
                    .is_some_and(|threshold| *level >= threshold)
            })
            .map(|(key, _)| key)
            .collect()
    }
}

/// A contributor's frozen offering for one composition pass: the unlocked set
/// plus a bonus per key. Built fresh each tick from the contributor's current
/// state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportBonus {
    unlocked: BTreeSet<StatKey>,
    bonuses: BTreeMap<StatKey, f64>,
}

impl SupportBonus {
    pub fn new(
        unlocked: impl IntoIterator<Item = StatKey>,
        bonuses: impl IntoIterator<Item = (StatKey, f64)>,
    ) -> Self {
        Self {
            unlocked: unlocked.into_iter().collect(),
            bonuses: bonuses.into_iter().collect(),
        }
    }

    /// A gunner's contribution to its attached turret: `share` of the
    /// gunner's own effective value, for every stat past its milestone.
    pub fn from_entity(entity: &UpgradeEntity, milestones: &MilestoneUnlocks, share: f64) -> Self {
        let unlocked = milestones.unlocked_for(entity);
        let bonuses = unlocked
            .iter()
            .map(|&key| (key, entity.value(key) * share))
            .collect();
        Self { unlocked, bonuses }
    }
}

impl BonusProvider for SupportBonus {
    fn unlocked_stats(&self) -> &BTreeSet<StatKey> {
        &self.unlocked
    }

    fn bonus_for(&self, key: StatKey) -> f64 {
        self.bonuses.get(&key).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::StatCatalog;
    use crate::engine::ledger::UpgradeLedger;
    use crate::model::EntityClass;

    fn turret() -> (UpgradeLedger, UpgradeEntity) {
        let ledger = UpgradeLedger::new(StatCatalog::standard());
        let entity = ledger.create_entity(1, EntityClass::Turret).expect("turret");
        (ledger, entity)
    }

    #[test]
    fn no_providers_reduces_to_ledger_values() {
        let (_, entity) = turret();
        let snapshot = compose(&entity, &[]);
        for (key, value) in entity.stat_values() {
            assert_eq!(snapshot.get(key), value);
        }
        assert_eq!(snapshot.len(), EntityClass::Turret.stat_keys().len());
    }

    #[test]
    fn only_unlocked_contributions_count() {
        let (_, entity) = turret();
        let unlocking = SupportBonus::new([StatKey::Damage], [(StatKey::Damage, 5.0)]);
        // Offers a damage bonus but never unlocked the stat.
        let locked = SupportBonus::new([], [(StatKey::Damage, 500.0)]);

        let snapshot = compose(&entity, &[&unlocking, &locked]);
        assert_eq!(snapshot.get(StatKey::Damage), entity.value(StatKey::Damage) + 5.0);
    }

    #[test]
    fn provider_order_does_not_change_the_sum() {
        let (_, entity) = turret();
        let a = SupportBonus::new([StatKey::Damage], [(StatKey::Damage, 5.0)]);
        let b = SupportBonus::new(
            [StatKey::Damage, StatKey::Range],
            [(StatKey::Damage, 2.5), (StatKey::Range, 10.0)],
        );

        let forward = compose(&entity, &[&a, &b]);
        let backward = compose(&entity, &[&b, &a]);
        assert_eq!(forward, backward);
        assert_eq!(
            forward.get(StatKey::Damage),
            entity.value(StatKey::Damage) + 7.5
        );
    }

    #[test]
    fn repeated_composition_is_byte_identical() {
        let (_, entity) = turret();
        let support = SupportBonus::new([StatKey::Damage], [(StatKey::Damage, 3.0)]);
        let first = compose(&entity, &[&support]);
        let second = compose(&entity, &[&support]);
        assert_eq!(first, second);
    }

    #[test]
    fn milestones_gate_on_the_contributors_own_level() {
        let ledger = UpgradeLedger::new(StatCatalog::standard());
        let mut gunner = ledger.create_entity(2, EntityClass::Gunner).expect("gunner");
        let milestones = MilestoneUnlocks::standard_gunner();

        assert!(milestones.unlocked_for(&gunner).is_empty());

        ledger
            .apply_level(&mut gunner, StatKey::Damage, 1)
            .expect("level damage");
        ledger
            .apply_level(&mut gunner, StatKey::FireRate, 4)
            .expect("level fire rate");

        let unlocked = milestones.unlocked_for(&gunner);
        assert!(unlocked.contains(&StatKey::Damage));
        // One level short of the FireRate milestone.
        assert!(!unlocked.contains(&StatKey::FireRate));
        // Accuracy has no milestone and is never shared.
        assert!(!unlocked.contains(&StatKey::Accuracy));
    }

    #[test]
    fn support_bonus_shares_a_fraction_of_the_contributor() {
        let ledger = UpgradeLedger::new(StatCatalog::standard());
        let mut gunner = ledger.create_entity(2, EntityClass::Gunner).expect("gunner");
        ledger
            .apply_level(&mut gunner, StatKey::Damage, 3)
            .expect("level damage");

        let support =
            SupportBonus::from_entity(&gunner, &MilestoneUnlocks::standard_gunner(), 0.5);
        assert_eq!(
            support.bonus_for(StatKey::Damage),
            gunner.value(StatKey::Damage) * 0.5
        );
        assert_eq!(support.bonus_for(StatKey::Accuracy), 0.0);
    }
}
