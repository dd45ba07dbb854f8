//! End-of-turn bookkeeping.
//!
//! Runs after every turn whatever phases were requested. It resets the
//! per-turn birth and death counters and writes each tallied fuel pool back
//! into cargo.

use tracing::debug;

use crate::catalog::{UnitCatalog, UnitKind};
use crate::engine::EngineError;
use crate::galaxy::{Galaxy, Hull};

/// Natural deaths for a population this turn.
pub fn natural_deaths(population: u64, rate: f64) -> u64 {
    (population as f64 * rate.max(0.0)).floor() as u64
}

/// Writes the fuel pool back into the hull's fuel cargo.
///
/// The first fuel line receives the whole remaining balance as stowed cargo
/// and every later fuel line is zeroed. Hulls whose fuel was never tallied
/// this turn are left alone.
pub fn collapse_fuel(hull: &mut Hull, catalog: &UnitCatalog) -> Result<(), EngineError> {
    if !hull.pools.fuel_tallied {
        return Ok(());
    }
    let mut first = true;
    for line in hull.inventory.iter_mut() {
        if catalog.require(&line.unit)?.kind != UnitKind::Fuel {
            continue;
        }
        line.active = 0;
        line.stowed = if first { hull.pools.fuel } else { 0 };
        first = false;
    }
    Ok(())
}

/// Closes out the turn for every hull.
pub fn finish_turn(
    galaxy: &mut Galaxy,
    catalog: &UnitCatalog,
    natural_death_rate: f64,
) -> Result<(), EngineError> {
    for hull in galaxy.hulls.iter_mut() {
        let natural = natural_deaths(hull.population.total(), natural_death_rate);
        hull.population.births_this_turn = natural;
        hull.population.deaths_this_turn = natural;
        collapse_fuel(hull, catalog)?;
        debug!(hull = %hull.id, natural, fuel = hull.pools.fuel, "turn closed");
    }
    Ok(())
}
