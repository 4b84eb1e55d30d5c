use std::fs;

use bastion_idle::{
    BonusProvider, Currency, EntityId, StatKey, SupportBonus, WalletProvider,
    save_data_from_session, save_to_json_string,
};
use bevy::prelude::*;

use super::resources::{EconomySession, PurchaseIntent, RuntimeConfig, SnapshotCache};

pub fn apply_purchase_intents(
    mut intents: EventReader<PurchaseIntent>,
    mut econ: ResMut<EconomySession>,
) {
    for intent in intents.read() {
        match econ.session.purchase(intent.entity, intent.key, intent.batch) {
            Ok(result) => info!(
                "entity {} {:?} +{} -> level {} for {}",
                intent.entity, intent.key, intent.batch, result.new_level, result.price_paid
            ),
            Err(err) => warn!(
                "purchase refused for entity {} {:?} x{}: {err:?}",
                intent.entity, intent.key, intent.batch
            ),
        }
    }
}

pub fn tick_economy(
    time: Res<Time>,
    config: Res<RuntimeConfig>,
    mut econ: ResMut<EconomySession>,
    mut cache: ResMut<SnapshotCache>,
) {
    let econ = &mut *econ;
    let steps = econ
        .tick_timer
        .tick(time.delta())
        .times_finished_this_tick();
    if steps == 0 {
        return;
    }

    for _ in 0..steps {
        econ.session.tick();
    }

    rebuild_snapshots(econ, config.gunner_support_share, &mut cache);
}

/// Recompute every entity's effective stats from the ledger plus the gunners'
/// unlocked support bonuses. Turrets receive support; gunners and the base
/// compose from their own values alone.
fn rebuild_snapshots(econ: &EconomySession, support_share: f64, cache: &mut SnapshotCache) {
    let supports: Vec<SupportBonus> = econ
        .gunner_ids
        .iter()
        .filter_map(|&id| econ.session.entity(id))
        .map(|gunner| SupportBonus::from_entity(gunner, &econ.milestones, support_share))
        .collect();
    let providers: Vec<&dyn BonusProvider> = supports
        .iter()
        .map(|support| support as &dyn BonusProvider)
        .collect();

    cache.snapshots.clear();
    for &id in &econ.turret_ids {
        if let Some(snapshot) = econ.session.compose_entity(id, &providers) {
            cache.snapshots.insert(id, snapshot);
        }
    }
    for &id in econ.gunner_ids.iter().chain(std::iter::once(&econ.base_id)) {
        if let Some(snapshot) = econ.session.compose_entity(id, &[]) {
            cache.snapshots.insert(id, snapshot);
        }
    }
}

pub fn mark_economy_running(econ: Option<ResMut<EconomySession>>) {
    if let Some(mut econ) = econ {
        econ.session.paused = false;
    }
}

pub fn mark_economy_paused(econ: Option<ResMut<EconomySession>>) {
    if let Some(mut econ) = econ {
        econ.session.paused = true;
    }
}

pub fn autosave_session(
    time: Res<Time>,
    config: Res<RuntimeConfig>,
    mut econ: ResMut<EconomySession>,
) {
    if !econ.autosave_timer.tick(time.delta()).just_finished() {
        return;
    }

    let save = save_data_from_session(&econ.session);
    let written = save_to_json_string(&save)
        .and_then(|json| fs::write(&config.save_path, json).map_err(Into::into));
    match written {
        Ok(()) => {
            econ.last_save_error = None;
            debug!("autosaved to {}", config.save_path);
        }
        Err(err) => {
            let message = format!("{err:#}");
            if econ.last_save_error.as_deref() != Some(message.as_str()) {
                warn!("autosave failed: {message}");
            }
            econ.last_save_error = Some(message);
        }
    }
}

/// Greedy unattended spender: each frame, queue the single cheapest affordable
/// upgrade across every entity. Useful for soak-testing the economy headless.
pub fn auto_spend_cheapest(econ: Res<EconomySession>, mut intents: EventWriter<PurchaseIntent>) {
    let mut cheapest: Option<(f64, EntityId, StatKey)> = None;

    for entity in &econ.session.entities {
        for &key in entity.class.stat_keys() {
            let Ok(cost) = econ.session.preview_cost(entity.id, key, 1) else {
                continue;
            };
            let Ok(def) = econ.session.ledger.catalog().get(entity.class, key) else {
                continue;
            };
            if econ.session.wallet.balance(def.currency) + f64::EPSILON < cost {
                continue;
            }
            if cheapest.is_none_or(|(best, _, _)| cost < best) {
                cheapest = Some((cost, entity.id, key));
            }
        }
    }

    if let Some((cost, id, key)) = cheapest {
        debug!("auto-spend: entity {id} {key:?} for {cost}");
        intents.send(PurchaseIntent {
            entity: id,
            key,
            batch: 1,
        });
    }
}

pub fn log_status(time: Res<Time>, mut econ: ResMut<EconomySession>, cache: Res<SnapshotCache>) {
    if !econ.status_timer.tick(time.delta()).just_finished() {
        return;
    }
    let wallet = &econ.session.wallet;
    info!(
        "tick {} | coins {:.1} (+{:.1}/tick) | crystals {:.1} | {} snapshots",
        econ.session.tick_index,
        wallet.balance(Currency::Coins),
        econ.session.coins_per_tick,
        wallet.balance(Currency::Crystals),
        cache.snapshots.len()
    );
}
