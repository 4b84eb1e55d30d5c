mod catalog;
mod compose;
pub mod cost_curve;
mod ledger;
mod session;
mod wallet;

pub use catalog::{CatalogError, StatCatalog};
pub use compose::{BonusProvider, MilestoneUnlocks, SupportBonus, compose};
pub use cost_curve::{BatchQuote, QuoteError, quote_batch};
pub use ledger::{EntityId, LevelUpResult, PurchaseError, UpgradeEntity, UpgradeLedger};
pub use session::GameSession;
pub use wallet::{CurrencyWallet, TickDeltas, WalletError, WalletProvider};
