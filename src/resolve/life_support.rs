//! Life support for sealed hulls.
//!
//! Ships and enclosed or orbital colonies keep their people alive with
//! life-support units. Each active unit of tech `t` supports `t²` people;
//! whoever is left over dies.

use serde::Serialize;
use tracing::{debug, warn};

use super::allocate::{allocate, Demand};
use super::phase::{for_each_hull, TurnContext};
use crate::catalog::{UnitCatalog, UnitKind};
use crate::engine::EngineError;
use crate::galaxy::{Hull, HullId};

/// Life-support outcome for one hull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeSupportOutcome {
    pub hull: HullId,
    /// People the active units can support.
    pub capacity: u64,
    /// Population before any deaths.
    pub population: u64,
    pub deaths: u64,
}

/// Runs life support for one hull. Open colonies return `None`.
pub fn support_hull(
    hull: &mut Hull,
    catalog: &UnitCatalog,
) -> Result<Option<LifeSupportOutcome>, EngineError> {
    if !hull.needs_life_support() {
        return Ok(None);
    }

    let mut capacity: u64 = 0;
    for hull_unit in &hull.hull_units {
        let unit = catalog.require(&hull_unit.unit)?;
        if unit.kind != UnitKind::LifeSupport {
            continue;
        }
        let granted = allocate(
            &mut hull.pools,
            &Demand::for_unit(unit, hull_unit.quantity, false),
        );
        let tech = u64::from(unit.tech_level);
        capacity = capacity.saturating_add(granted.active.saturating_mul(tech * tech));
        debug!(hull = %hull.id, unit = %unit.code, active = granted.active, fuel = granted.fuel, "life support allocated");
    }

    let population = hull.population.total();
    let deaths = if population > capacity {
        hull.population.kill_proportionally(population - capacity)
    } else {
        0
    };
    // the dead are no longer available as labor this turn
    hull.pools.professionals = hull.pools.professionals.min(hull.population.professional);
    hull.pools.unskilled = hull.pools.unskilled.min(hull.population.unskilled);
    Ok(Some(LifeSupportOutcome {
        hull: hull.id,
        capacity,
        population,
        deaths,
    }))
}

pub(crate) fn run(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    let catalog = ctx.catalog;
    let outcomes = for_each_hull(&mut ctx.galaxy.hulls, ctx.config.parallel_hulls, |hull| {
        support_hull(hull, catalog)
    })?;
    for outcome in outcomes.into_iter().flatten() {
        if outcome.deaths > 0 {
            warn!(
                hull = %outcome.hull,
                capacity = outcome.capacity,
                population = outcome.population,
                deaths = outcome.deaths,
                "life support shortfall"
            );
        }
        ctx.report.life_support.push(outcome);
    }
    Ok(())
}
