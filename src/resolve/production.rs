//! Farm, mine and factory production.
//!
//! Each production phase walks every hull's groups of one kind in list
//! order. A group's unit-groups are allocated in order, their combined
//! output is fed through the group's pipeline, and whatever reaches the
//! finished stage is delivered into the hull's cargo.

use serde::Serialize;
use tracing::debug;

use super::allocate::{allocate, is_solar_powered, Demand};
use super::phase::{for_each_hull, TurnContext};
use super::pipeline::Yield;
use super::rates::ProductionRates;
use crate::catalog::{Unit, UnitCatalog, UnitKind};
use crate::engine::EngineError;
use crate::galaxy::{Deposit, Galaxy, Hull, HullId, Planet, Pools, UnitGroup};

/// Which kind of group produced a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    Farm,
    Mine,
    Factory,
}

/// Finished output moved into a hull's cargo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub hull: HullId,
    pub kind: GroupKind,
    pub group: u32,
    pub unit: String,
    /// New work entering stage 1 this turn.
    pub produced: u64,
    /// Finished units moved to cargo.
    pub delivered: u64,
}

/// Allocates every unit-group and sums their output.
fn run_unit_groups(
    hull: HullId,
    pools: &mut Pools,
    units: &[UnitGroup],
    catalog: &UnitCatalog,
    expected: UnitKind,
    solar_site: bool,
    mut output: impl FnMut(&Unit, u64) -> u64,
) -> Result<u64, EngineError> {
    let mut produced: u64 = 0;
    for group in units {
        let unit = catalog.require(&group.unit)?;
        if unit.kind != expected {
            return Err(EngineError::WrongUnitKind {
                hull,
                unit: unit.code.clone(),
                expected,
            });
        }
        let solar = is_solar_powered(unit, solar_site);
        let granted = allocate(pools, &Demand::for_unit(unit, group.quantity, solar));
        produced = produced.saturating_add(output(unit, granted.active));
        debug!(
            hull = %hull,
            unit = %unit.code,
            desired = group.quantity,
            active = granted.active,
            fuel = granted.fuel,
            solar,
            "unit group allocated"
        );
    }
    Ok(produced)
}

/// True if an orbital colony sits close enough to its star for solar farms.
fn close_to_star(hull: &Hull, planets: &[Planet], limit: u8) -> Result<bool, EngineError> {
    if !hull.is_orbital() {
        return Ok(false);
    }
    let Some(planet_id) = hull.planet else {
        return Ok(false);
    };
    let planet = planets
        .get(planet_id.0 as usize)
        .filter(|p| p.id == planet_id)
        .ok_or(EngineError::UnknownPlanet {
            hull: hull.id,
            planet: planet_id,
        })?;
    Ok(planet.orbit <= limit)
}

/// Runs one hull's farm groups.
pub fn produce_farms(
    hull: &mut Hull,
    catalog: &UnitCatalog,
    rates: &dyn ProductionRates,
    solar_site: bool,
) -> Result<Vec<Delivery>, EngineError> {
    let food = UnitKind::Food.code(0);
    let mut deliveries = Vec::with_capacity(hull.farm_groups.len());
    for group in hull.farm_groups.iter_mut() {
        let produced = run_unit_groups(
            hull.id,
            &mut hull.pools,
            &group.units,
            catalog,
            UnitKind::Farm,
            solar_site,
            |unit, active| rates.farm(unit, active),
        )?;
        group.stages.advance(produced, Yield::Full);
        deliveries.push(Delivery {
            hull: hull.id,
            kind: GroupKind::Farm,
            group: group.id,
            unit: food.clone(),
            produced,
            delivered: group.stages.take_finished(),
        });
    }
    deliver(hull, &deliveries);
    Ok(deliveries)
}

/// Runs one hull's factory groups.
pub fn produce_factories(
    hull: &mut Hull,
    catalog: &UnitCatalog,
    rates: &dyn ProductionRates,
) -> Result<Vec<Delivery>, EngineError> {
    let mut deliveries = Vec::with_capacity(hull.factory_groups.len());
    for group in hull.factory_groups.iter_mut() {
        let product = catalog.require(&group.product)?;
        let produced = run_unit_groups(
            hull.id,
            &mut hull.pools,
            &group.units,
            catalog,
            UnitKind::Factory,
            false,
            |unit, active| rates.factory(unit, product, active),
        )?;
        group.stages.advance(produced, Yield::Full);
        deliveries.push(Delivery {
            hull: hull.id,
            kind: GroupKind::Factory,
            group: group.id,
            unit: product.code.clone(),
            produced,
            delivered: group.stages.take_finished(),
        });
    }
    deliver(hull, &deliveries);
    Ok(deliveries)
}

/// Runs one hull's mine groups, drawing down the deposits they work.
pub fn produce_mines(
    hull: &mut Hull,
    deposits: &mut [Deposit],
    catalog: &UnitCatalog,
    rates: &dyn ProductionRates,
) -> Result<Vec<Delivery>, EngineError> {
    let mut deliveries = Vec::with_capacity(hull.mine_groups.len());
    for group in hull.mine_groups.iter_mut() {
        let deposit = deposits
            .iter_mut()
            .find(|d| d.id == group.deposit)
            .ok_or(EngineError::UnknownDeposit {
                hull: hull.id,
                deposit: group.deposit,
            })?;
        let extracted = run_unit_groups(
            hull.id,
            &mut hull.pools,
            &group.units,
            catalog,
            UnitKind::Mine,
            false,
            |unit, active| rates.mine(unit, active),
        )?;
        let produced = extracted.min(deposit.remaining);
        deposit.remaining -= produced;
        group.stages.advance(produced, Yield::Percent(deposit.yield_pct));
        deliveries.push(Delivery {
            hull: hull.id,
            kind: GroupKind::Mine,
            group: group.id,
            unit: deposit.kind.code(0),
            produced,
            delivered: group.stages.take_finished(),
        });
    }
    deliver(hull, &deliveries);
    Ok(deliveries)
}

fn deliver(hull: &mut Hull, deliveries: &[Delivery]) {
    for delivery in deliveries {
        hull.stow(&delivery.unit, delivery.delivered);
    }
}

fn record(ctx: &mut TurnContext<'_>, deliveries: Vec<Vec<Delivery>>) {
    for delivery in deliveries.into_iter().flatten() {
        debug!(
            hull = %delivery.hull,
            group = delivery.group,
            unit = %delivery.unit,
            produced = delivery.produced,
            delivered = delivery.delivered,
            "production delivered"
        );
        ctx.report.deliveries.push(delivery);
    }
}

pub(crate) fn run_farms(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    let catalog = ctx.catalog;
    let rates = ctx.rates;
    let limit = ctx.config.solar_orbit_limit;
    let Galaxy { hulls, planets, .. } = &mut *ctx.galaxy;
    let planets = &*planets;
    let deliveries = for_each_hull(hulls, ctx.config.parallel_hulls, |hull| {
        let solar = close_to_star(hull, planets, limit)?;
        produce_farms(hull, catalog, rates, solar)
    })?;
    record(ctx, deliveries);
    Ok(())
}

/// Mines run sequentially: two hulls may work the same deposit.
pub(crate) fn run_mines(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    let Galaxy { hulls, deposits, .. } = &mut *ctx.galaxy;
    let mut deliveries = Vec::with_capacity(hulls.len());
    for hull in hulls.iter_mut() {
        deliveries.push(produce_mines(hull, deposits.as_mut_slice(), ctx.catalog, ctx.rates)?);
    }
    record(ctx, deliveries);
    Ok(())
}

pub(crate) fn run_factories(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    let catalog = ctx.catalog;
    let rates = ctx.rates;
    let deliveries = for_each_hull(&mut ctx.galaxy.hulls, ctx.config.parallel_hulls, |hull| {
        produce_factories(hull, catalog, rates)
    })?;
    record(ctx, deliveries);
    Ok(())
}
