use std::collections::BTreeMap;

use bastion_idle::{EffectiveStatSnapshot, EntityId, GameSession, MilestoneUnlocks, StatKey};
use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    pub tick_hz: f32,
    pub start_coins: f64,
    pub start_crystals: f64,
    pub coins_per_tick: f64,
    pub turret_count: usize,
    pub gunner_count: usize,
    /// Fraction of a gunner's effective stat shared with the turrets it
    /// supports, once the stat's milestone is reached.
    pub gunner_support_share: f64,
    pub save_path: String,
    pub auto_save_interval_seconds: f32,
    pub status_interval_seconds: f32,
    /// Headless demo mode: greedily buy the cheapest affordable upgrade each
    /// tick so an unattended run still progresses.
    pub auto_spend: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_hz: 10.0,
            start_coins: 150.0,
            start_crystals: 30.0,
            coins_per_tick: 1.0,
            turret_count: 4,
            gunner_count: 2,
            gunner_support_share: 0.25,
            save_path: "bastion_idle_save.json".to_string(),
            auto_save_interval_seconds: 30.0,
            status_interval_seconds: 5.0,
            auto_spend: false,
        }
    }
}

#[derive(Resource, Debug)]
pub struct EconomySession {
    pub session: GameSession,
    pub turret_ids: Vec<EntityId>,
    pub gunner_ids: Vec<EntityId>,
    pub base_id: EntityId,
    pub milestones: MilestoneUnlocks,
    pub tick_timer: Timer,
    pub autosave_timer: Timer,
    pub status_timer: Timer,
    pub last_save_error: Option<String>,
}

/// Effective stats per entity, rebuilt after every economy tick. Combat and
/// display systems read from here instead of touching the ledger.
#[derive(Resource, Debug, Default)]
pub struct SnapshotCache {
    pub snapshots: BTreeMap<EntityId, EffectiveStatSnapshot>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PurchaseIntent {
    pub entity: EntityId,
    pub key: StatKey,
    pub batch: u32,
}
