use serde::{Deserialize, Serialize};

use crate::engine::{CatalogError, StatCatalog};
use crate::model::{Currency, Direction, EntityClass, FormulaKind, StatDefinition, StatKey};

/// On-disk shape of the authored stat table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDataFile {
    #[serde(rename = "_source", default)]
    pub source: String,
    #[serde(default)]
    pub stats: Vec<StatDataEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDataEntry {
    pub class: EntityClass,
    pub key: StatKey,
    pub formula: FormulaKind,
    pub base_cost: f64,
    pub cost_growth: f64,
    #[serde(default)]
    pub base_value: f64,
    #[serde(default)]
    pub growth_per_level: f64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
}

impl StatDataEntry {
    pub fn definition(&self) -> StatDefinition {
        StatDefinition {
            formula: self.formula,
            base_cost: self.base_cost,
            cost_growth: self.cost_growth,
            base_value: self.base_value,
            growth_per_level: self.growth_per_level,
            direction: self.direction,
            min_value: self.min_value,
            max_value: self.max_value,
            currency: self.currency,
        }
    }
}

impl StatDataFile {
    /// Build the validated runtime catalog; this is the fail-fast point for
    /// authoring gaps.
    pub fn to_catalog(&self) -> Result<StatCatalog, CatalogError> {
        StatCatalog::from_definitions(
            self.stats
                .iter()
                .map(|entry| ((entry.class, entry.key), entry.definition())),
        )
    }
}
