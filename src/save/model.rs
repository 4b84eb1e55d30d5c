use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveWallet {
    pub coins: f64,
    pub total_coins_earned: f64,
    pub coins_earned_this_run: f64,
    pub crystals: f64,
    pub total_crystals_earned: f64,
}

/// One persisted stat: key name and purchased level. Values are never
/// written; they are re-derived from levels on load. Keys are stored by
/// canonical name so a save survives additions to the enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveStatLevel {
    pub key: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SaveEntity {
    pub id: u64,
    pub class: String,
    pub levels: Vec<SaveStatLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub version: u32,
    pub wallet: SaveWallet,
    pub entities: Vec<SaveEntity>,
    pub coins_per_tick: f64,
    pub total_ticks: u64,
    pub paused: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: 1,
            wallet: SaveWallet::default(),
            entities: Vec::new(),
            coins_per_tick: 0.0,
            total_ticks: 0,
            paused: false,
        }
    }
}
