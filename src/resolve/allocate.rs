//! Fuel and labor allocation.
//!
//! A hull's fuel and labor are spent first come, first served: each call to
//! `allocate` caps one unit-group by what is left in the pools and draws its
//! consumption down immediately, so later groups see what earlier ones left.

use tracing::debug;

use super::phase::TurnContext;
use crate::catalog::{Crew, Unit, UnitCatalog, UnitKind};
use crate::engine::EngineError;
use crate::galaxy::{Hull, Pools};

/// Farm tech levels that run on sunlight in a close orbit.
const SOLAR_FARM_TECH: std::ops::RangeInclusive<u8> = 2..=5;

/// What one unit-group asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demand {
    /// Desired active quantity.
    pub desired: u64,
    pub fuel_per_unit: f64,
    pub crew: Crew,
    /// Solar-powered units burn no fuel.
    pub solar: bool,
}

impl Demand {
    pub fn for_unit(unit: &Unit, desired: u64, solar: bool) -> Self {
        Demand {
            desired,
            fuel_per_unit: unit.fuel,
            crew: unit.crew(),
            solar,
        }
    }
}

/// What a unit-group was granted, and what it consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocation {
    pub active: u64,
    pub fuel: u64,
    pub professionals: u64,
    pub unskilled: u64,
}

/// Caps a demand by the pools and deducts the consumption.
pub fn allocate(pools: &mut Pools, demand: &Demand) -> Allocation {
    let burns_fuel = !demand.solar && demand.fuel_per_unit > 0.0;

    let mut active = demand.desired;
    if burns_fuel {
        active = active.min((pools.fuel as f64 / demand.fuel_per_unit).floor() as u64);
    }
    if demand.crew.professionals > 0 {
        active = active.min(pools.professionals / demand.crew.professionals);
    }
    if demand.crew.unskilled > 0 {
        active = active.min(pools.unskilled / demand.crew.unskilled);
    }

    let fuel = if burns_fuel {
        ((active as f64 * demand.fuel_per_unit).ceil() as u64).min(pools.fuel)
    } else {
        0
    };
    let professionals = active * demand.crew.professionals;
    let unskilled = active * demand.crew.unskilled;

    pools.fuel -= fuel;
    pools.professionals -= professionals;
    pools.unskilled -= unskilled;

    Allocation {
        active,
        fuel,
        professionals,
        unskilled,
    }
}

/// True if `unit` is a farm that runs on sunlight.
///
/// `close_orbit` says whether the hull is an orbital colony whose planet is
/// close enough to its star.
pub fn is_solar_powered(unit: &Unit, close_orbit: bool) -> bool {
    close_orbit && unit.kind == UnitKind::Farm && SOLAR_FARM_TECH.contains(&unit.tech_level)
}

/// Sums every fuel-kind inventory line into the hull's fuel pool.
pub fn tally_fuel(hull: &mut Hull, catalog: &UnitCatalog) -> Result<u64, EngineError> {
    let mut fuel = 0;
    for line in &hull.inventory {
        if catalog.require(&line.unit)?.kind == UnitKind::Fuel {
            fuel += line.total();
        }
    }
    hull.pools.fuel = fuel;
    hull.pools.fuel_tallied = true;
    Ok(fuel)
}

pub(crate) fn run_fuel_allocation(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    for hull in ctx.galaxy.hulls.iter_mut() {
        let fuel = tally_fuel(hull, ctx.catalog)?;
        debug!(hull = %hull.id, fuel, "fuel tallied");
    }
    Ok(())
}
