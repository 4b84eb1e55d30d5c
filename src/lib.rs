pub mod data;
pub mod engine;
pub mod model;
pub mod save;

pub use data::{
    StatDataEntry, StatDataFile, load_stat_data, load_stat_data_from_path, stat_data_path,
};
pub use engine::{
    BatchQuote, BonusProvider, CatalogError, CurrencyWallet, EntityId, GameSession, LevelUpResult,
    MilestoneUnlocks, PurchaseError, QuoteError, StatCatalog, SupportBonus, TickDeltas,
    UpgradeEntity, UpgradeLedger, WalletError, WalletProvider, compose, quote_batch,
};
pub use model::{
    Currency, Direction, EffectiveStatSnapshot, EntityClass, FormulaKind, StatDefinition, StatKey,
};
pub use save::{
    SaveData, SaveEntity, SaveStatLevel, SaveWallet, apply_save_data, export_to_base64,
    import_from_base64, load_from_json_string, save_data_from_session, save_to_json_string,
};
