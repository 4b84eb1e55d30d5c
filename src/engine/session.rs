use crate::model::{Currency, EffectiveStatSnapshot, EntityClass, StatKey};

use super::catalog::StatCatalog;
use super::compose::{self, BonusProvider};
use super::ledger::{EntityId, LevelUpResult, PurchaseError, UpgradeEntity, UpgradeLedger};
use super::wallet::CurrencyWallet;

/// One game session's progression state: the wallet, the upgrade ledger and
/// every upgradable entity, owned in one place and passed by reference to
/// whoever needs it.
///
/// All purchases are routed through [`GameSession::purchase`], so intents
/// racing in the same frame are serialized by the single owner and can never
/// double-spend one balance.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub wallet: CurrencyWallet,
    pub ledger: UpgradeLedger,
    pub entities: Vec<UpgradeEntity>,
    pub paused: bool,
    pub tick_index: u64,
    /// Passive soft-currency income accrued each tick.
    pub coins_per_tick: f64,
    next_entity_id: EntityId,
}

impl GameSession {
    pub fn new(catalog: StatCatalog) -> Self {
        Self {
            wallet: CurrencyWallet::default(),
            ledger: UpgradeLedger::new(catalog),
            entities: Vec::new(),
            paused: false,
            tick_index: 0,
            coins_per_tick: 0.0,
            next_entity_id: 1,
        }
    }

    /// Create an entity when it is first acquired. It persists until
    /// explicitly removed (sold or wiped by a progression reset).
    pub fn spawn_entity(&mut self, class: EntityClass) -> Result<EntityId, PurchaseError> {
        let id = self.next_entity_id;
        let entity = self.ledger.create_entity(id, class)?;
        self.entities.push(entity);
        self.next_entity_id += 1;
        Ok(id)
    }

    /// Re-create an entity under a fixed id; the save/load bridge uses this
    /// to rebuild a session.
    pub fn restore_entity(
        &mut self,
        id: EntityId,
        class: EntityClass,
    ) -> Result<&mut UpgradeEntity, PurchaseError> {
        let entity = self.ledger.create_entity(id, class)?;
        self.entities.retain(|existing| existing.id != id);
        self.entities.push(entity);
        self.next_entity_id = self.next_entity_id.max(id + 1);
        Ok(self.entities.last_mut().expect("entity pushed above"))
    }

    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id != id);
        self.entities.len() != before
    }

    pub fn entity(&self, id: EntityId) -> Option<&UpgradeEntity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut UpgradeEntity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// The session-level purchase entry point; see [`UpgradeLedger::purchase`]
    /// for the transaction itself.
    pub fn purchase(
        &mut self,
        id: EntityId,
        key: StatKey,
        batch: u32,
    ) -> Result<LevelUpResult, PurchaseError> {
        let entity = self
            .entities
            .iter_mut()
            .find(|entity| entity.id == id)
            .ok_or(PurchaseError::UnknownEntity(id))?;
        self.ledger.purchase(entity, key, batch, &mut self.wallet)
    }

    pub fn preview_cost(
        &self,
        id: EntityId,
        key: StatKey,
        batch: u32,
    ) -> Result<f64, PurchaseError> {
        let entity = self
            .entity(id)
            .ok_or(PurchaseError::UnknownEntity(id))?;
        self.ledger.preview_cost(entity, key, batch)
    }

    /// Raw level apply for the load path; levels past the stat's cap are
    /// clamped down. See [`UpgradeLedger::apply_level`].
    pub fn apply_saved_level(
        &mut self,
        id: EntityId,
        key: StatKey,
        level: u32,
    ) -> Result<u32, PurchaseError> {
        let entity = self
            .entities
            .iter_mut()
            .find(|entity| entity.id == id)
            .ok_or(PurchaseError::UnknownEntity(id))?;
        self.ledger.apply_level(entity, key, level)
    }

    /// Effective stats for one entity this tick.
    pub fn compose_entity(
        &self,
        id: EntityId,
        providers: &[&dyn BonusProvider],
    ) -> Option<EffectiveStatSnapshot> {
        self.entity(id)
            .map(|entity| compose::compose(entity, providers))
    }

    /// Advance the idle economy by one tick.
    pub fn tick(&mut self) {
        self.wallet.begin_tick();
        if self.paused {
            return;
        }
        self.tick_index += 1;
        self.wallet.credit(Currency::Coins, self.coins_per_tick);
    }
}
