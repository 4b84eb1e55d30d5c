mod bridge;
mod codec;
mod model;

pub use bridge::{apply_save_data, save_data_from_session};
pub use codec::{export_to_base64, import_from_base64, load_from_json_string, save_to_json_string};
pub use model::{SaveData, SaveEntity, SaveStatLevel, SaveWallet};

#[cfg(test)]
mod tests {
    use super::{apply_save_data, save_data_from_session};
    use crate::engine::{GameSession, StatCatalog};
    use crate::model::{Currency, EntityClass, StatKey};

    fn played_session() -> GameSession {
        let mut session = GameSession::new(StatCatalog::standard());
        session.wallet.credit(Currency::Coins, 500.0);
        session.wallet.credit(Currency::Crystals, 100.0);
        session.coins_per_tick = 2.0;

        let turret = session.spawn_entity(EntityClass::Turret).expect("turret");
        let gunner = session.spawn_entity(EntityClass::Gunner).expect("gunner");
        session.spawn_entity(EntityClass::Base).expect("base");

        session
            .purchase(turret, StatKey::Damage, 3)
            .expect("turret damage");
        session
            .purchase(gunner, StatKey::Accuracy, 2)
            .expect("gunner accuracy");
        for _ in 0..10 {
            session.tick();
        }
        session
    }

    #[test]
    fn session_bridge_round_trip() {
        let session = played_session();
        let save = save_data_from_session(&session);

        let mut restored = GameSession::new(StatCatalog::standard());
        apply_save_data(&mut restored, &save).expect("save apply should succeed");

        assert_eq!(restored.wallet.coins, session.wallet.coins);
        assert_eq!(
            restored.wallet.total_coins_earned,
            session.wallet.total_coins_earned
        );
        assert_eq!(restored.wallet.crystals, session.wallet.crystals);
        assert_eq!(restored.tick_index, session.tick_index);
        assert_eq!(restored.coins_per_tick, session.coins_per_tick);
        assert_eq!(restored.entities.len(), session.entities.len());
        for entity in &session.entities {
            let twin = restored.entity(entity.id).expect("entity should survive");
            assert_eq!(twin, entity);
        }
    }

    #[test]
    fn loaded_values_are_rederived_not_trusted() {
        let session = played_session();
        let save = save_data_from_session(&session);
        // Only levels are persisted, so a restored session has nowhere to get
        // a value from except the formula.
        let json = crate::save::save_to_json_string(&save).expect("to json");
        assert!(!json.contains("\"values\""));

        let mut restored = GameSession::new(StatCatalog::standard());
        apply_save_data(&mut restored, &save).expect("save apply should succeed");
        let turret = restored.entities[0].clone();
        assert_eq!(turret.level(StatKey::Damage), 3);
        assert_eq!(
            turret.value(StatKey::Damage),
            session.entities[0].value(StatKey::Damage)
        );
    }

    #[test]
    fn unknown_names_in_a_save_are_skipped() {
        let mut save = save_data_from_session(&played_session());
        save.entities[0].levels.push(super::SaveStatLevel {
            key: "FluxCapacitance".to_string(),
            level: 3,
        });
        save.entities.push(super::SaveEntity {
            id: 99,
            class: "Dirigible".to_string(),
            levels: Vec::new(),
        });

        let mut restored = GameSession::new(StatCatalog::standard());
        apply_save_data(&mut restored, &save).expect("save apply should succeed");
        assert!(restored.entity(99).is_none());
        assert_eq!(restored.entities.len(), 3);
    }

    #[test]
    fn corrupt_levels_are_clamped_on_load() {
        let mut save = save_data_from_session(&played_session());
        // Accuracy caps at level 30; a tampered save claims far more.
        save.entities[1]
            .levels
            .iter_mut()
            .find(|stat| stat.key == "Accuracy")
            .expect("accuracy entry")
            .level = 9999;

        let mut restored = GameSession::new(StatCatalog::standard());
        apply_save_data(&mut restored, &save).expect("save apply should succeed");
        let gunner = restored.entities[1].clone();
        assert_eq!(gunner.level(StatKey::Accuracy), 30);
        assert_eq!(gunner.value(StatKey::Accuracy), 100.0);
    }
}
