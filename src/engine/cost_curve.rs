use crate::model::{Direction, FormulaKind, StatDefinition};

/// Growth guard threshold: once a value or price crosses half the f64 range it
/// is clamped straight to `f64::MAX` so exponential blowup can never leak
/// `inf`/NaN into the rest of the economy.
pub const GROWTH_CEILING: f64 = f64::MAX / 2.0;

/// Price and outcome of buying `batch` levels in one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchQuote {
    /// Total price, floored to whole currency units.
    pub total_cost: f64,
    pub final_level: u32,
    pub value_delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// The stat already sits on its clamp bound; no further level exists.
    AtCap,
    /// `current_level + batch` would pass the stat's derived max level.
    /// Purchases never partial-fill; the caller may retry with `max_batch`.
    BatchExceedsCap { max_batch: u32 },
}

fn guard(raw: f64) -> f64 {
    if !raw.is_finite() || raw > GROWTH_CEILING {
        f64::MAX
    } else {
        raw
    }
}

/// Snap near-integer level counts before ceiling so float noise in the
/// log/division cannot shift a cap by one level.
fn ceil_levels(levels: f64) -> f64 {
    let rounded = levels.round();
    if (levels - rounded).abs() < 1e-9 {
        rounded
    } else {
        levels.ceil()
    }
}

/// The stat's own value at `level`, before any bonus contribution.
/// Always computed from scratch; this is the single source of truth the
/// ledger re-derives values from.
pub fn stat_value(def: &StatDefinition, level: u32) -> f64 {
    let raw = match def.formula {
        FormulaKind::Exponential => {
            guard(def.base_value * def.growth_per_level.powf(f64::from(level)))
        }
        FormulaKind::HybridQuadratic | FormulaKind::LinearAdd => {
            let step = def.growth_per_level * f64::from(level);
            match def.direction {
                Direction::Increasing => def.base_value + step,
                Direction::Decreasing => def.base_value - step,
            }
        }
    };

    match def.direction {
        Direction::Increasing => def.max_value.map_or(raw, |max| raw.min(max)),
        Direction::Decreasing => def.min_value.map_or(raw, |min| raw.max(min)),
    }
}

/// Price of the single upgrade that takes the stat from `level` to `level + 1`.
pub fn level_cost(def: &StatDefinition, level: u32) -> f64 {
    match def.formula {
        FormulaKind::Exponential | FormulaKind::LinearAdd => {
            def.base_cost * def.cost_growth.powf(f64::from(level))
        }
        FormulaKind::HybridQuadratic => {
            let level = f64::from(level);
            def.base_cost * (1.0 + level * level * def.cost_growth)
        }
    }
}

/// Unfloored sum of `level_cost` over `[current_level, current_level + batch)`.
///
/// Geometric curves use the closed-form series sum so large batches price in
/// O(1); the hybrid quadratic kind has no closed form and iterates, bailing to
/// `f64::MAX` as soon as the running total crosses the growth ceiling.
pub fn batch_cost(def: &StatDefinition, current_level: u32, batch: u32) -> f64 {
    if batch == 0 {
        return 0.0;
    }
    match def.formula {
        FormulaKind::Exponential | FormulaKind::LinearAdd => {
            geometric_batch(def, current_level, batch)
        }
        FormulaKind::HybridQuadratic => {
            let end = current_level.saturating_add(batch);
            let mut total = 0.0;
            for level in current_level..end {
                total += level_cost(def, level);
                if total > GROWTH_CEILING {
                    return f64::MAX;
                }
            }
            total
        }
    }
}

fn geometric_batch(def: &StatDefinition, current_level: u32, batch: u32) -> f64 {
    let growth = def.cost_growth;
    if growth == 1.0 {
        // Flat cost curve; the series degenerates to a plain product.
        return guard(def.base_cost * f64::from(batch));
    }
    let first = def.base_cost * growth.powf(f64::from(current_level));
    let sum = first * (growth.powf(f64::from(batch)) - 1.0) / (growth - 1.0);
    guard(sum)
}

/// Highest purchasable level, derived from the clamp bound the stat grows
/// toward. `None` when the stat is unbounded or its curve never reaches the
/// bound.
pub fn max_level(def: &StatDefinition) -> Option<u32> {
    let bound = match def.direction {
        Direction::Increasing => def.max_value?,
        Direction::Decreasing => def.min_value?,
    };

    match def.formula {
        FormulaKind::Exponential => {
            if def.base_value <= 0.0 || def.growth_per_level <= 0.0 || bound <= 0.0 {
                return None;
            }
            let at_bound = match def.direction {
                Direction::Increasing => def.base_value >= bound,
                Direction::Decreasing => def.base_value <= bound,
            };
            if at_bound {
                return Some(0);
            }
            let moving_toward = match def.direction {
                Direction::Increasing => def.growth_per_level > 1.0,
                Direction::Decreasing => def.growth_per_level < 1.0,
            };
            if !moving_toward {
                return None;
            }
            let levels = (bound / def.base_value).ln() / def.growth_per_level.ln();
            if !levels.is_finite() || levels > f64::from(u32::MAX) {
                return None;
            }
            Some(ceil_levels(levels.max(0.0)) as u32)
        }
        FormulaKind::HybridQuadratic | FormulaKind::LinearAdd => {
            let step = def.growth_per_level;
            if step <= 0.0 {
                return None;
            }
            let distance = match def.direction {
                Direction::Increasing => bound - def.base_value,
                Direction::Decreasing => def.base_value - bound,
            };
            if distance <= 0.0 {
                return Some(0);
            }
            let levels = ceil_levels(distance / step);
            if levels > f64::from(u32::MAX) {
                return None;
            }
            Some(levels as u32)
        }
    }
}

/// Price a batch purchase without touching any state.
pub fn quote_batch(
    def: &StatDefinition,
    current_level: u32,
    batch: u32,
) -> Result<BatchQuote, QuoteError> {
    if let Some(cap) = max_level(def) {
        if current_level >= cap {
            return Err(QuoteError::AtCap);
        }
        let headroom = cap - current_level;
        if batch > headroom {
            return Err(QuoteError::BatchExceedsCap { max_batch: headroom });
        }
    }

    let final_level = current_level.saturating_add(batch);
    Ok(BatchQuote {
        total_cost: batch_cost(def, current_level, batch).floor(),
        final_level,
        value_delta: stat_value(def, final_level) - stat_value(def, current_level),
    })
}
