use std::collections::BTreeMap;

use crate::model::{EntityClass, StatKey};

use super::catalog::StatCatalog;
use super::cost_curve::{self, QuoteError};
use super::wallet::{WalletError, WalletProvider};

pub type EntityId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseError {
    /// No entity with the given id exists in the session.
    UnknownEntity(EntityId),
    /// No authored curve for this `(class, key)` pair. Configuration error;
    /// unreachable once the catalog passed load-time validation.
    UnknownStat,
    /// The stat already sits on its clamp bound.
    AtCap,
    InsufficientFunds { needed: f64, available: f64 },
    /// The requested batch would pass the stat's max level. Nothing is
    /// bought; the caller may retry with at most `max_batch` levels.
    BatchExceedsCap { max_batch: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelUpResult {
    pub new_level: u32,
    pub new_value: f64,
    pub price_paid: f64,
}

/// One upgradable game entity: a turret instance, a gunner instance or the
/// player base. Lives for the entity's whole lifetime, across save/load.
///
/// `values` is always re-derived from `levels` through the stat formula and
/// never trusted independently; level maps are the only persisted state.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeEntity {
    pub id: EntityId,
    pub class: EntityClass,
    levels: BTreeMap<StatKey, u32>,
    values: BTreeMap<StatKey, f64>,
}

impl UpgradeEntity {
    pub fn level(&self, key: StatKey) -> u32 {
        self.levels.get(&key).copied().unwrap_or(0)
    }

    pub fn value(&self, key: StatKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(0.0)
    }

    pub fn stat_levels(&self) -> impl Iterator<Item = (StatKey, u32)> + '_ {
        self.levels.iter().map(|(key, level)| (*key, *level))
    }

    pub fn stat_values(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        self.values.iter().map(|(key, value)| (*key, *value))
    }
}

/// The one generic upgrade engine behind turrets, gunners and the base.
/// Owned by the composition root (the game session); there is no global
/// instance.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeLedger {
    catalog: StatCatalog,
}

impl UpgradeLedger {
    pub fn new(catalog: StatCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &StatCatalog {
        &self.catalog
    }

    /// Fresh entity with every reachable stat at level 0 and its value
    /// derived from the formula.
    pub fn create_entity(
        &self,
        id: EntityId,
        class: EntityClass,
    ) -> Result<UpgradeEntity, PurchaseError> {
        let mut entity = UpgradeEntity {
            id,
            class,
            levels: BTreeMap::new(),
            values: BTreeMap::new(),
        };
        for &key in class.stat_keys() {
            entity.levels.insert(key, 0);
        }
        self.refresh_values(&mut entity)?;
        Ok(entity)
    }

    /// The atomic purchase transaction. Price first, then check funds, then
    /// debit, and only after a confirmed debit mutate level and value. The
    /// value is recomputed from the formula, never bumped incrementally, so
    /// float drift cannot accumulate across thousands of levels.
    ///
    /// Triggers no save and no UI refresh; those belong to the caller.
    pub fn purchase(
        &self,
        entity: &mut UpgradeEntity,
        key: StatKey,
        batch: u32,
        wallet: &mut dyn WalletProvider,
    ) -> Result<LevelUpResult, PurchaseError> {
        let def = self
            .catalog
            .get(entity.class, key)
            .map_err(|_| PurchaseError::UnknownStat)?;

        let quote = cost_curve::quote_batch(def, entity.level(key), batch)
            .map_err(PurchaseError::from)?;

        let available = wallet.balance(def.currency);
        if available + f64::EPSILON < quote.total_cost {
            return Err(PurchaseError::InsufficientFunds {
                needed: quote.total_cost,
                available,
            });
        }

        wallet
            .debit(def.currency, quote.total_cost)
            .map_err(PurchaseError::from)?;

        let new_value = cost_curve::stat_value(def, quote.final_level);
        entity.levels.insert(key, quote.final_level);
        entity.values.insert(key, new_value);

        Ok(LevelUpResult {
            new_level: quote.final_level,
            new_value,
            price_paid: quote.total_cost,
        })
    }

    /// Same pricing as the first half of `purchase`, no side effects.
    /// Backs "can I afford N levels" displays.
    pub fn preview_cost(
        &self,
        entity: &UpgradeEntity,
        key: StatKey,
        batch: u32,
    ) -> Result<f64, PurchaseError> {
        let def = self
            .catalog
            .get(entity.class, key)
            .map_err(|_| PurchaseError::UnknownStat)?;
        let quote =
            cost_curve::quote_batch(def, entity.level(key), batch).map_err(PurchaseError::from)?;
        Ok(quote.total_cost)
    }

    /// Raw level apply for the load path. Levels past the stat's cap are
    /// clamped down (corrupt-state recovery) rather than rejected, so a save
    /// stays loadable after a formula or data change. Returns the level that
    /// was actually applied.
    pub fn apply_level(
        &self,
        entity: &mut UpgradeEntity,
        key: StatKey,
        level: u32,
    ) -> Result<u32, PurchaseError> {
        let def = self
            .catalog
            .get(entity.class, key)
            .map_err(|_| PurchaseError::UnknownStat)?;
        let applied = match cost_curve::max_level(def) {
            Some(cap) => level.min(cap),
            None => level,
        };
        entity.levels.insert(key, applied);
        entity.values.insert(key, cost_curve::stat_value(def, applied));
        Ok(applied)
    }

    /// Recompute every value from its level. The authoritative recovery path
    /// after any load or formula change.
    pub fn refresh_values(&self, entity: &mut UpgradeEntity) -> Result<(), PurchaseError> {
        for &key in entity.class.stat_keys() {
            let def = self
                .catalog
                .get(entity.class, key)
                .map_err(|_| PurchaseError::UnknownStat)?;
            let level = entity.level(key);
            entity.values.insert(key, cost_curve::stat_value(def, level));
        }
        Ok(())
    }
}

impl From<QuoteError> for PurchaseError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::AtCap => PurchaseError::AtCap,
            QuoteError::BatchExceedsCap { max_batch } => {
                PurchaseError::BatchExceedsCap { max_batch }
            }
        }
    }
}

impl From<WalletError> for PurchaseError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InsufficientFunds {
                needed, available, ..
            } => PurchaseError::InsufficientFunds { needed, available },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::StatCatalog;
    use crate::engine::cost_curve;
    use crate::engine::wallet::CurrencyWallet;
    use crate::model::Currency;

    fn ledger() -> UpgradeLedger {
        UpgradeLedger::new(StatCatalog::standard())
    }

    fn funded_wallet(coins: f64, crystals: f64) -> CurrencyWallet {
        let mut wallet = CurrencyWallet::default();
        wallet.credit(Currency::Coins, coins);
        wallet.credit(Currency::Crystals, crystals);
        wallet
    }

    #[test]
    fn fresh_entity_starts_at_level_zero_with_derived_values() {
        let ledger = ledger();
        let turret = ledger
            .create_entity(1, EntityClass::Turret)
            .expect("create turret");

        for &key in EntityClass::Turret.stat_keys() {
            assert_eq!(turret.level(key), 0);
            let def = ledger.catalog().get(EntityClass::Turret, key).expect("def");
            assert_eq!(turret.value(key), cost_curve::stat_value(def, 0));
        }
    }

    #[test]
    fn purchase_debits_then_levels_then_rederives_value() {
        let ledger = ledger();
        let mut wallet = funded_wallet(1000.0, 0.0);
        let mut turret = ledger.create_entity(1, EntityClass::Turret).expect("turret");

        let result = ledger
            .purchase(&mut turret, StatKey::Damage, 3, &mut wallet)
            .expect("affordable batch");

        assert_eq!(result.new_level, 3);
        assert_eq!(result.price_paid, 33.0);
        assert_eq!(wallet.coins, 967.0);
        assert_eq!(turret.level(StatKey::Damage), 3);

        let def = ledger
            .catalog()
            .get(EntityClass::Turret, StatKey::Damage)
            .expect("def");
        assert_eq!(result.new_value, cost_curve::stat_value(def, 3));
        assert_eq!(turret.value(StatKey::Damage), result.new_value);
    }

    #[test]
    fn underfunded_purchase_changes_nothing() {
        let ledger = ledger();
        let mut wallet = funded_wallet(5.0, 0.0);
        let mut turret = ledger.create_entity(1, EntityClass::Turret).expect("turret");

        let err = ledger
            .purchase(&mut turret, StatKey::Damage, 3, &mut wallet)
            .expect_err("cannot afford 33 coins");
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                needed: 33.0,
                available: 5.0,
            }
        );
        assert_eq!(wallet.coins, 5.0);
        assert_eq!(turret.level(StatKey::Damage), 0);
    }

    #[test]
    fn two_purchases_against_one_balance_cannot_both_win() {
        // Wallet holds B; both intents cost more than B/2. Routed through
        // the one owner, exactly one succeeds and the balance ends at
        // B - price_of_the_winner.
        let ledger = ledger();
        let mut wallet = funded_wallet(40.0, 0.0);
        let mut turret = ledger.create_entity(1, EntityClass::Turret).expect("turret");

        let first = ledger.purchase(&mut turret, StatKey::Damage, 3, &mut wallet);
        let second = ledger.purchase(&mut turret, StatKey::Damage, 3, &mut wallet);

        let winner = first.expect("first intent wins");
        assert_eq!(winner.price_paid, 33.0);
        assert!(matches!(
            second,
            Err(PurchaseError::InsufficientFunds { .. })
        ));
        assert_eq!(wallet.coins, 40.0 - winner.price_paid);
        assert_eq!(turret.level(StatKey::Damage), 3);
    }

    #[test]
    fn capped_stat_clamps_then_reports_at_cap() {
        let ledger = ledger();
        let mut wallet = funded_wallet(0.0, f64::MAX / 4.0);
        let mut gunner = ledger.create_entity(2, EntityClass::Gunner).expect("gunner");

        // Accuracy: base 70, +1 per level, clamped at 100 -> cap at level 30.
        let result = ledger
            .purchase(&mut gunner, StatKey::Accuracy, 30, &mut wallet)
            .expect("buy straight to the cap");
        assert_eq!(result.new_level, 30);
        assert_eq!(result.new_value, 100.0);

        assert_eq!(
            ledger.purchase(&mut gunner, StatKey::Accuracy, 1, &mut wallet),
            Err(PurchaseError::AtCap)
        );
    }

    #[test]
    fn oversized_batch_is_rejected_whole() {
        let ledger = ledger();
        let mut wallet = funded_wallet(0.0, f64::MAX / 4.0);
        let mut gunner = ledger.create_entity(2, EntityClass::Gunner).expect("gunner");

        let err = ledger
            .purchase(&mut gunner, StatKey::Accuracy, 31, &mut wallet)
            .expect_err("31 levels pass the cap");
        assert_eq!(err, PurchaseError::BatchExceedsCap { max_batch: 30 });
        assert_eq!(gunner.level(StatKey::Accuracy), 0);
        assert_eq!(wallet.crystals, f64::MAX / 4.0);
    }

    #[test]
    fn decreasing_stat_shrinks_toward_its_floor() {
        let ledger = ledger();
        let mut wallet = funded_wallet(0.0, f64::MAX / 4.0);
        let mut gunner = ledger.create_entity(2, EntityClass::Gunner).expect("gunner");

        let result = ledger
            .purchase(&mut gunner, StatKey::ReloadDelay, 40, &mut wallet)
            .expect("buy down to the floor");
        assert!((result.new_value - 1.0).abs() < 1e-9);
        assert_eq!(
            ledger.purchase(&mut gunner, StatKey::ReloadDelay, 1, &mut wallet),
            Err(PurchaseError::AtCap)
        );
    }

    #[test]
    fn unauthored_stat_is_a_config_error() {
        let ledger = ledger();
        let mut wallet = funded_wallet(1000.0, 0.0);
        let mut base = ledger.create_entity(3, EntityClass::Base).expect("base");

        assert_eq!(
            ledger.purchase(&mut base, StatKey::PierceChance, 1, &mut wallet),
            Err(PurchaseError::UnknownStat)
        );
    }

    #[test]
    fn preview_matches_purchase_price_without_side_effects() {
        let ledger = ledger();
        let mut wallet = funded_wallet(1000.0, 0.0);
        let mut turret = ledger.create_entity(1, EntityClass::Turret).expect("turret");

        let preview = ledger
            .preview_cost(&turret, StatKey::Damage, 5)
            .expect("preview");
        assert_eq!(wallet.coins, 1000.0);
        assert_eq!(turret.level(StatKey::Damage), 0);

        let result = ledger
            .purchase(&mut turret, StatKey::Damage, 5, &mut wallet)
            .expect("purchase");
        assert_eq!(result.price_paid, preview);
    }

    #[test]
    fn apply_level_clamps_corrupt_levels_down() {
        let ledger = ledger();
        let mut gunner = ledger.create_entity(2, EntityClass::Gunner).expect("gunner");

        // A save written before the Accuracy cap changed could carry 9999.
        let applied = ledger
            .apply_level(&mut gunner, StatKey::Accuracy, 9999)
            .expect("apply");
        assert_eq!(applied, 30);
        assert_eq!(gunner.value(StatKey::Accuracy), 100.0);
    }
}
