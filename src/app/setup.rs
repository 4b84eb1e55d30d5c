use std::fs;

use bastion_idle::{
    Currency, EntityClass, EntityId, GameSession, MilestoneUnlocks, StatCatalog, apply_save_data,
    load_from_json_string, load_stat_data,
};
use bevy::prelude::*;

use super::resources::{EconomySession, RuntimeConfig};
use super::state::{AppPhase, EconomyRunState};

pub fn bootstrap_session(
    mut commands: Commands,
    config: Res<RuntimeConfig>,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut next_run_state: ResMut<NextState<EconomyRunState>>,
) {
    let catalog = match load_stat_data() {
        Ok(file) => match file.to_catalog() {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!("stat data is incomplete, using the built-in table: {err:?}");
                StatCatalog::standard()
            }
        },
        Err(err) => {
            warn!("stat data failed to load, using the built-in table: {err:#}");
            StatCatalog::standard()
        }
    };

    let mut session = GameSession::new(catalog);
    session.coins_per_tick = config.coins_per_tick;

    let mut loaded_from_save = false;
    if let Ok(text) = fs::read_to_string(&config.save_path)
        && let Ok(save_data) = load_from_json_string(&text)
        && apply_save_data(&mut session, &save_data).is_ok()
    {
        loaded_from_save = true;
        info!(
            "loaded save from {} ({} entities, tick {})",
            config.save_path,
            session.entities.len(),
            session.tick_index
        );
        next_run_state.set(if save_data.paused {
            EconomyRunState::Paused
        } else {
            EconomyRunState::Running
        });
    }

    if !loaded_from_save {
        seed_entities(&mut session, &config);
        session.wallet.credit(Currency::Coins, config.start_coins);
        session.wallet.credit(Currency::Crystals, config.start_crystals);
        next_run_state.set(EconomyRunState::Running);
    }

    let base_id = session
        .entities
        .iter()
        .find(|entity| entity.class == EntityClass::Base)
        .map(|entity| entity.id)
        .unwrap_or_default();
    let turret_ids = ids_of(&session, EntityClass::Turret);
    let gunner_ids = ids_of(&session, EntityClass::Gunner);

    commands.insert_resource(EconomySession {
        session,
        turret_ids,
        gunner_ids,
        base_id,
        milestones: MilestoneUnlocks::standard_gunner(),
        tick_timer: Timer::from_seconds((1.0 / config.tick_hz).max(0.01), TimerMode::Repeating),
        autosave_timer: Timer::from_seconds(
            config.auto_save_interval_seconds.max(1.0),
            TimerMode::Repeating,
        ),
        status_timer: Timer::from_seconds(
            config.status_interval_seconds.max(1.0),
            TimerMode::Repeating,
        ),
        last_save_error: None,
    });

    next_phase.set(AppPhase::InGame);
}

fn seed_entities(session: &mut GameSession, config: &RuntimeConfig) {
    if let Err(err) = session.spawn_entity(EntityClass::Base) {
        error!("failed to spawn base: {err:?}");
    }
    for _ in 0..config.turret_count {
        if let Err(err) = session.spawn_entity(EntityClass::Turret) {
            error!("failed to spawn turret: {err:?}");
        }
    }
    for _ in 0..config.gunner_count {
        if let Err(err) = session.spawn_entity(EntityClass::Gunner) {
            error!("failed to spawn gunner: {err:?}");
        }
    }
}

fn ids_of(session: &GameSession, class: EntityClass) -> Vec<EntityId> {
    session
        .entities
        .iter()
        .filter(|entity| entity.class == class)
        .map(|entity| entity.id)
        .collect()
}
