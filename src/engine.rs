//! Turn execution.
//!
//! Holds the unit catalog, engine configuration and production rates, and
//! runs a caller-supplied list of phases against a galaxy. The engine does
//! no I/O: the caller loads the galaxy, hands it in, and persists it again
//! once `execute` returns.

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{CatalogError, UnitCatalog, UnitKind};
use crate::config::EngineConfig;
use crate::galaxy::{DepositId, Galaxy, HullId, PlanetId};
use crate::orders::PhaseOrders;
use crate::resolve::{
    finish_turn, ControlError, Delivery, LifeSupportOutcome, Phase, ProductionRates,
    StandardRates, TurnContext,
};

/// Data-model faults that abort a turn.
///
/// These mean the galaxy and catalog disagree, not that a player made a
/// mistake; player errors are collected in the `TurnReport` instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("hull {hull} is at unknown planet {}", .planet.0)]
    UnknownPlanet { hull: HullId, planet: PlanetId },

    #[error("hull {hull} mines unknown deposit {deposit}")]
    UnknownDeposit { hull: HullId, deposit: DepositId },

    #[error("hull {hull} has {unit} in a group that needs {expected:?} units")]
    WrongUnitKind {
        hull: HullId,
        unit: String,
        expected: UnitKind,
    },
}

/// What happened during one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    /// Phases that were resolved, in order.
    pub phases_run: Vec<Phase>,
    /// Requested phase names that were unknown or not implemented.
    pub skipped: Vec<String>,
    pub control_errors: Vec<ControlError>,
    pub life_support: Vec<LifeSupportOutcome>,
    pub deliveries: Vec<Delivery>,
}

/// Resolves turns.
pub struct Engine {
    catalog: UnitCatalog,
    config: EngineConfig,
    rates: Box<dyn ProductionRates>,
}

impl Engine {
    /// Creates an engine using the standard production rates.
    pub fn new(catalog: UnitCatalog, config: EngineConfig) -> Self {
        Engine {
            catalog,
            config,
            rates: Box::new(StandardRates),
        }
    }

    /// Replaces the production rate table.
    pub fn with_rates(mut self, rates: impl ProductionRates + 'static) -> Self {
        self.rates = Box::new(rates);
        self
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one turn using the configured default phase list.
    pub fn execute_default(
        &self,
        galaxy: &mut Galaxy,
        orders: &[PhaseOrders],
    ) -> Result<TurnReport, EngineError> {
        let phases = self.config.default_phase_names();
        self.execute(galaxy, orders, &phases)
    }

    /// Runs exactly the named phases, in order, then closes out the turn.
    ///
    /// Unknown and unimplemented phase names are logged and skipped. On error
    /// the galaxy may be partly resolved and should be discarded.
    pub fn execute(
        &self,
        galaxy: &mut Galaxy,
        orders: &[PhaseOrders],
        phases: &[&str],
    ) -> Result<TurnReport, EngineError> {
        galaxy.turn += 1;
        let mut report = TurnReport {
            turn: galaxy.turn,
            ..TurnReport::default()
        };
        for hull in galaxy.hulls.iter_mut() {
            hull.reset_pools();
        }
        info!(
            turn = galaxy.turn,
            phases = phases.len(),
            players = orders.len(),
            hulls = galaxy.hulls.len(),
            "turn started"
        );

        for &name in phases {
            let Some(phase) = Phase::from_name(name) else {
                warn!(phase = name, "unknown phase skipped");
                report.skipped.push(name.to_string());
                continue;
            };
            let Some(handler) = phase.handler() else {
                warn!(phase = phase.name(), "phase not implemented, skipped");
                report.skipped.push(phase.name().to_string());
                continue;
            };

            let started = Instant::now();
            let mut ctx = TurnContext {
                phase,
                galaxy: &mut *galaxy,
                orders,
                catalog: &self.catalog,
                config: &self.config,
                rates: self.rates.as_ref(),
                report: &mut report,
            };
            handler(&mut ctx)?;
            report.phases_run.push(phase);
            info!(
                phase = phase.name(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "phase resolved"
            );
        }

        finish_turn(galaxy, &self.catalog, self.config.natural_death_rate)?;
        info!(
            turn = galaxy.turn,
            control_errors = report.control_errors.len(),
            deliveries = report.deliveries.len(),
            "turn finished"
        );
        Ok(report)
    }
}
