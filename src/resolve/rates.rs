//! Production rates.
//!
//! All rates are per turn: a yearly rate divided over four quarters.

use crate::catalog::Unit;

/// Turns per game year.
pub const TURNS_PER_YEAR: u64 = 4;

/// Converts active units into this turn's new work.
pub trait ProductionRates: Send + Sync {
    /// Food grown by `active` farm units.
    fn farm(&self, farm: &Unit, active: u64) -> u64;

    /// Ore extracted by `active` mine units, before yield.
    fn mine(&self, mine: &Unit, active: u64) -> u64;

    /// Units of `product` manufactured by `active` factory units.
    fn factory(&self, factory: &Unit, product: &Unit, active: u64) -> u64;
}

/// The standard rate table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRates;

impl ProductionRates for StandardRates {
    fn farm(&self, farm: &Unit, active: u64) -> u64 {
        let tech = u64::from(farm.tech_level);
        if tech <= 1 {
            active.saturating_mul(100) / TURNS_PER_YEAR
        } else {
            active.saturating_mul(20 * tech) / TURNS_PER_YEAR
        }
    }

    fn mine(&self, mine: &Unit, active: u64) -> u64 {
        let tech = u64::from(mine.tech_level);
        active.saturating_mul(100 * tech) / TURNS_PER_YEAR
    }

    fn factory(&self, factory: &Unit, _product: &Unit, active: u64) -> u64 {
        let yearly = factory.rate.unwrap_or(0.0).max(0.0);
        (active as f64 * yearly / TURNS_PER_YEAR as f64).floor() as u64
    }
}
