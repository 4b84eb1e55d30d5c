use crate::model::Currency;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalletError {
    InsufficientFunds {
        currency: Currency,
        needed: f64,
        available: f64,
    },
}

/// Balance source the purchase transaction draws from. `debit` checks and
/// subtracts in one call, so two underfunded purchases can never both pass on
/// a stale balance read.
pub trait WalletProvider {
    fn balance(&self, currency: Currency) -> f64;
    fn debit(&mut self, currency: Currency, amount: f64) -> Result<(), WalletError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickDeltas {
    pub coins: f64,
    pub crystals: f64,
}

impl TickDeltas {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The session's currency ledgers plus lifetime totals for display and
/// prestige bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyWallet {
    pub coins: f64,
    pub total_coins_earned: f64,
    pub coins_earned_this_run: f64,
    pub crystals: f64,
    pub total_crystals_earned: f64,
    pub tick_deltas: TickDeltas,
}

impl CurrencyWallet {
    pub fn begin_tick(&mut self) {
        self.tick_deltas.reset();
    }

    pub fn credit(&mut self, currency: Currency, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        match currency {
            Currency::Coins => {
                self.coins += amount;
                self.total_coins_earned += amount;
                self.coins_earned_this_run += amount;
                self.tick_deltas.coins += amount;
            }
            Currency::Crystals => {
                self.crystals += amount;
                self.total_crystals_earned += amount;
                self.tick_deltas.crystals += amount;
            }
        }
    }
}

impl WalletProvider for CurrencyWallet {
    fn balance(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Coins => self.coins,
            Currency::Crystals => self.crystals,
        }
    }

    fn debit(&mut self, currency: Currency, amount: f64) -> Result<(), WalletError> {
        if amount <= 0.0 {
            return Ok(());
        }
        let available = self.balance(currency);
        if available + f64::EPSILON < amount {
            return Err(WalletError::InsufficientFunds {
                currency,
                needed: amount,
                available,
            });
        }
        match currency {
            Currency::Coins => {
                self.coins -= amount;
                self.tick_deltas.coins -= amount;
            }
            Currency::Crystals => {
                self.crystals -= amount;
                self.tick_deltas.crystals -= amount;
            }
        }
        Ok(())
    }
}
