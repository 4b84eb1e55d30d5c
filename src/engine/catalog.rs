use std::collections::BTreeMap;

use crate::model::{Currency, Direction, EntityClass, FormulaKind, StatDefinition, StatKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// Lookup for a pair nobody authored. A configuration bug, not a player
    /// action; unreachable once a catalog passed coverage validation.
    UnknownStat { class: EntityClass, key: StatKey },
    /// Coverage validation found a reachable stat with no curve.
    MissingDefinition { class: EntityClass, key: StatKey },
}

/// Read-only `(EntityClass, StatKey) -> StatDefinition` table.
///
/// Construction validates that every stat reachable for every class has an
/// authored definition, so the "missing upgrade rule" class of bug fails at
/// load instead of surfacing mid-run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCatalog {
    defs: BTreeMap<(EntityClass, StatKey), StatDefinition>,
}

impl StatCatalog {
    pub fn from_definitions(
        entries: impl IntoIterator<Item = ((EntityClass, StatKey), StatDefinition)>,
    ) -> Result<Self, CatalogError> {
        let defs: BTreeMap<_, _> = entries.into_iter().collect();
        for class in EntityClass::ALL {
            for &key in class.stat_keys() {
                if !defs.contains_key(&(class, key)) {
                    return Err(CatalogError::MissingDefinition { class, key });
                }
            }
        }
        Ok(Self { defs })
    }

    pub fn get(&self, class: EntityClass, key: StatKey) -> Result<&StatDefinition, CatalogError> {
        self.defs
            .get(&(class, key))
            .ok_or(CatalogError::UnknownStat { class, key })
    }

    pub fn definitions(
        &self,
    ) -> impl Iterator<Item = (EntityClass, StatKey, &StatDefinition)> + '_ {
        self.defs
            .iter()
            .map(|((class, key), def)| (*class, *key, def))
    }

    /// The built-in authored table used by the game session. Covers every
    /// reachable stat by construction, so validation cannot fail here.
    pub fn standard() -> Self {
        let increasing = |formula,
                          base_cost,
                          cost_growth,
                          base_value,
                          growth_per_level,
                          max_value,
                          currency| StatDefinition {
            formula,
            base_cost,
            cost_growth,
            base_value,
            growth_per_level,
            direction: Direction::Increasing,
            min_value: None,
            max_value,
            currency,
        };

        use Currency::{Coins, Crystals};
        use EntityClass::{Base, Gunner, Turret};
        use FormulaKind::{Exponential, HybridQuadratic, LinearAdd};

        let entries = [
            // Turret: the run's workhorse, paid in soft currency.
            (
                (Turret, StatKey::Damage),
                increasing(Exponential, 10.0, 1.1, 5.0, 1.08, None, Coins),
            ),
            (
                (Turret, StatKey::FireRate),
                increasing(HybridQuadratic, 25.0, 0.02, 1.0, 0.05, Some(20.0), Coins),
            ),
            (
                (Turret, StatKey::CriticalChance),
                increasing(LinearAdd, 40.0, 1.2, 2.0, 0.5, Some(60.0), Coins),
            ),
            (
                (Turret, StatKey::CriticalFactor),
                increasing(LinearAdd, 60.0, 1.18, 1.5, 0.05, None, Coins),
            ),
            (
                (Turret, StatKey::Range),
                increasing(LinearAdd, 30.0, 1.25, 40.0, 2.0, Some(200.0), Coins),
            ),
            (
                (Turret, StatKey::PierceChance),
                increasing(LinearAdd, 80.0, 1.3, 0.0, 1.0, Some(80.0), Coins),
            ),
            (
                (Turret, StatKey::ExplosionRadius),
                increasing(HybridQuadratic, 120.0, 0.05, 0.0, 0.25, Some(12.0), Coins),
            ),
            // Gunner: meta progression, paid in crystals.
            (
                (Gunner, StatKey::Damage),
                increasing(Exponential, 5.0, 1.12, 3.0, 1.07, None, Crystals),
            ),
            (
                (Gunner, StatKey::FireRate),
                increasing(HybridQuadratic, 8.0, 0.03, 0.8, 0.04, Some(8.0), Crystals),
            ),
            (
                (Gunner, StatKey::CriticalChance),
                increasing(LinearAdd, 12.0, 1.22, 1.0, 0.4, Some(50.0), Crystals),
            ),
            (
                (Gunner, StatKey::Accuracy),
                increasing(LinearAdd, 6.0, 1.15, 70.0, 1.0, Some(100.0), Crystals),
            ),
            (
                (Gunner, StatKey::ReloadDelay),
                StatDefinition {
                    formula: LinearAdd,
                    base_cost: 10.0,
                    cost_growth: 1.2,
                    base_value: 5.0,
                    growth_per_level: 0.1,
                    direction: Direction::Decreasing,
                    min_value: Some(1.0),
                    max_value: None,
                    currency: Crystals,
                },
            ),
            // Base: survivability, soft currency.
            (
                (Base, StatKey::MaxHealth),
                increasing(Exponential, 15.0, 1.09, 100.0, 1.06, None, Coins),
            ),
            (
                (Base, StatKey::HealthRegen),
                increasing(LinearAdd, 20.0, 1.14, 0.5, 0.25, None, Coins),
            ),
            (
                (Base, StatKey::Armor),
                increasing(LinearAdd, 50.0, 1.35, 0.0, 1.0, Some(75.0), Coins),
            ),
        ];

        Self::from_definitions(entries).expect("standard catalog covers every reachable stat")
    }
}
