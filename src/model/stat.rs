use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum EntityClass {
    Turret,
    Gunner,
    Base,
}

impl EntityClass {
    pub const ALL: [EntityClass; 3] = [EntityClass::Turret, EntityClass::Gunner, EntityClass::Base];

    /// Every stat key reachable for this class. The catalog must author a
    /// definition for each of these; nothing outside this list is upgradable.
    pub fn stat_keys(self) -> &'static [StatKey] {
        match self {
            Self::Turret => &[
                StatKey::Damage,
                StatKey::FireRate,
                StatKey::CriticalChance,
                StatKey::CriticalFactor,
                StatKey::Range,
                StatKey::PierceChance,
                StatKey::ExplosionRadius,
            ],
            Self::Gunner => &[
                StatKey::Damage,
                StatKey::FireRate,
                StatKey::CriticalChance,
                StatKey::Accuracy,
                StatKey::ReloadDelay,
            ],
            Self::Base => &[StatKey::MaxHealth, StatKey::HealthRegen, StatKey::Armor],
        }
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Turret => "Turret",
            Self::Gunner => "Gunner",
            Self::Base => "Base",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.canonical_name() == name)
    }
}

/// Stable across save files: variants are only ever appended, never reordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StatKey {
    Damage,
    FireRate,
    CriticalChance,
    CriticalFactor,
    Range,
    PierceChance,
    ExplosionRadius,
    Accuracy,
    ReloadDelay,
    MaxHealth,
    HealthRegen,
    Armor,
}

impl StatKey {
    pub const ALL: [StatKey; 12] = [
        StatKey::Damage,
        StatKey::FireRate,
        StatKey::CriticalChance,
        StatKey::CriticalFactor,
        StatKey::Range,
        StatKey::PierceChance,
        StatKey::ExplosionRadius,
        StatKey::Accuracy,
        StatKey::ReloadDelay,
        StatKey::MaxHealth,
        StatKey::HealthRegen,
        StatKey::Armor,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Damage => "Damage",
            Self::FireRate => "FireRate",
            Self::CriticalChance => "CriticalChance",
            Self::CriticalFactor => "CriticalFactor",
            Self::Range => "Range",
            Self::PierceChance => "PierceChance",
            Self::ExplosionRadius => "ExplosionRadius",
            Self::Accuracy => "Accuracy",
            Self::ReloadDelay => "ReloadDelay",
            Self::MaxHealth => "MaxHealth",
            Self::HealthRegen => "HealthRegen",
            Self::Armor => "Armor",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.canonical_name() == name)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Currency {
    /// Soft currency earned passively during a run.
    #[default]
    Coins,
    /// Permanent meta-progression currency.
    Crystals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Increasing,
    /// The stat shrinks toward `min_value` as levels are bought
    /// (reload delays, falloff values and the like).
    Decreasing,
}

/// Closed set of cost/value curve shapes. Kept as a tagged variant rather than
/// per-stat closures so the catalog stays data-driven and serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaKind {
    /// Geometric cost curve, geometric value growth.
    Exponential,
    /// Per-level cost `base_cost * (1 + level^2 * cost_growth)`, linear value
    /// growth. Has no closed-form batch sum; priced by a bounded loop.
    HybridQuadratic,
    /// Linear value growth with a geometric cost curve.
    LinearAdd,
}

/// Authored once per `(EntityClass, StatKey)` pair; immutable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatDefinition {
    pub formula: FormulaKind,
    pub base_cost: f64,
    /// Geometric multiplier for `Exponential`/`LinearAdd` cost curves, the
    /// quadratic coefficient for `HybridQuadratic`.
    pub cost_growth: f64,
    /// The stat's value at level 0.
    pub base_value: f64,
    /// Geometric factor per level for `Exponential` values, additive step per
    /// level otherwise.
    pub growth_per_level: f64,
    pub direction: Direction,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub currency: Currency,
}
