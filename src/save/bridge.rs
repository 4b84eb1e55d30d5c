use anyhow::Result;

use crate::engine::GameSession;
use crate::model::{EntityClass, StatKey};

use super::{SaveData, SaveEntity, SaveStatLevel, SaveWallet};

pub fn save_data_from_session(session: &GameSession) -> SaveData {
    let mut entities = session
        .entities
        .iter()
        .map(|entity| SaveEntity {
            id: entity.id,
            class: entity.class.canonical_name().to_string(),
            levels: entity
                .stat_levels()
                .map(|(key, level)| SaveStatLevel {
                    key: key.canonical_name().to_string(),
                    level,
                })
                .collect(),
        })
        .collect::<Vec<_>>();
    entities.sort_by_key(|entity| entity.id);

    SaveData {
        version: 1,
        wallet: SaveWallet {
            coins: session.wallet.coins,
            total_coins_earned: session.wallet.total_coins_earned,
            coins_earned_this_run: session.wallet.coins_earned_this_run,
            crystals: session.wallet.crystals,
            total_crystals_earned: session.wallet.total_crystals_earned,
        },
        entities,
        coins_per_tick: session.coins_per_tick,
        total_ticks: session.tick_index,
        paused: session.paused,
    }
}

/// Rebuild a session from persisted state. Unknown classes and stat keys are
/// skipped (a save must stay loadable after a data change) and levels past a
/// stat's cap are clamped down; every value is re-derived from its level, so
/// a corrupted or stale `values` map can never survive a load.
pub fn apply_save_data(session: &mut GameSession, save: &SaveData) -> Result<()> {
    session.wallet.coins = save.wallet.coins.max(0.0);
    session.wallet.total_coins_earned = save.wallet.total_coins_earned.max(0.0);
    session.wallet.coins_earned_this_run = save.wallet.coins_earned_this_run.max(0.0);
    session.wallet.crystals = save.wallet.crystals.max(0.0);
    session.wallet.total_crystals_earned = save.wallet.total_crystals_earned.max(0.0);
    session.coins_per_tick = save.coins_per_tick.max(0.0);
    session.tick_index = save.total_ticks;
    session.paused = save.paused;

    session.entities.clear();

    for entry in &save.entities {
        let Some(class) = EntityClass::from_name(&entry.class) else {
            continue;
        };
        session
            .restore_entity(entry.id, class)
            .map_err(|err| anyhow::anyhow!("failed restoring entity {}: {err:?}", entry.id))?;

        for stat in &entry.levels {
            let Some(key) = StatKey::from_name(&stat.key) else {
                continue;
            };
            if !class.stat_keys().contains(&key) {
                continue;
            }
            session
                .apply_saved_level(entry.id, key, stat.level)
                .map_err(|err| {
                    anyhow::anyhow!(
                        "failed applying level for entity {} stat {}: {err:?}",
                        entry.id,
                        stat.key
                    )
                })?;
        }
    }

    Ok(())
}
