//! Phase kinds and the dispatch table.
//!
//! Every phase name the game knows is a `Phase` variant. Implemented phases
//! carry a handler in `PHASE_INFO`; the rest are recognised and skipped.
//! Ordering is the caller's business: the engine runs phases exactly in the
//! order it is given.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::catalog::UnitCatalog;
use crate::config::EngineConfig;
use crate::engine::{EngineError, TurnReport};
use crate::galaxy::{Galaxy, Hull};
use crate::orders::PhaseOrders;

use super::rates::ProductionRates;

/// Number of phase kinds.
pub const PHASE_COUNT: usize = 14;

/// A turn phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Phase {
    FuelAllocation = 0,
    LifeSupport = 1,
    Assembly = 2,
    Retool = 3,
    Control = 4,
    FarmProduction = 5,
    MineProduction = 6,
    FactoryProduction = 7,
    Combat = 8,
    Movement = 9,
    Trade = 10,
    Espionage = 11,
    Disassembly = 12,
    Survey = 13,
}

/// All phases in discriminant order.
pub const ALL_PHASES: [Phase; PHASE_COUNT] = [
    Phase::FuelAllocation,
    Phase::LifeSupport,
    Phase::Assembly,
    Phase::Retool,
    Phase::Control,
    Phase::FarmProduction,
    Phase::MineProduction,
    Phase::FactoryProduction,
    Phase::Combat,
    Phase::Movement,
    Phase::Trade,
    Phase::Espionage,
    Phase::Disassembly,
    Phase::Survey,
];

/// Everything a phase handler may read or mutate.
pub struct TurnContext<'a> {
    /// The phase being resolved.
    pub phase: Phase,
    pub galaxy: &'a mut Galaxy,
    pub orders: &'a [PhaseOrders],
    pub catalog: &'a UnitCatalog,
    pub config: &'a EngineConfig,
    pub rates: &'a dyn ProductionRates,
    pub report: &'a mut TurnReport,
}

/// Resolves one phase against the galaxy.
pub type PhaseHandler = fn(&mut TurnContext<'_>) -> Result<(), EngineError>;

/// Static metadata for a phase.
pub struct PhaseInfo {
    pub name: &'static str,
    /// `None` for phases that are recognised but not resolved.
    pub handler: Option<PhaseHandler>,
}

/// Compile-time dispatch table: index by `Phase as usize`.
pub static PHASE_INFO: [PhaseInfo; PHASE_COUNT] = [
    PhaseInfo { name: "fuel-allocation", handler: Some(super::allocate::run_fuel_allocation) },
    PhaseInfo { name: "life-support", handler: Some(super::life_support::run) },
    PhaseInfo { name: "assembly", handler: Some(log_submissions) },
    PhaseInfo { name: "retool", handler: Some(log_submissions) },
    PhaseInfo { name: "control", handler: Some(super::control::run) },
    PhaseInfo { name: "farm-production", handler: Some(super::production::run_farms) },
    PhaseInfo { name: "mine-production", handler: Some(super::production::run_mines) },
    PhaseInfo { name: "factory-production", handler: Some(super::production::run_factories) },
    PhaseInfo { name: "combat", handler: None },
    PhaseInfo { name: "movement", handler: None },
    PhaseInfo { name: "trade", handler: None },
    PhaseInfo { name: "espionage", handler: None },
    PhaseInfo { name: "disassembly", handler: None },
    PhaseInfo { name: "survey", handler: None },
];

impl Phase {
    #[inline]
    pub fn info(self) -> &'static PhaseInfo {
        &PHASE_INFO[self as usize]
    }

    /// The phase's name as used in phase lists.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn handler(self) -> Option<PhaseHandler> {
        self.info().handler
    }

    pub fn is_implemented(self) -> bool {
        self.info().handler.is_some()
    }

    /// Looks up a phase by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Phase> {
        let name = name.trim();
        ALL_PHASES
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Handler for phases whose orders are accepted but not yet acted on.
fn log_submissions(ctx: &mut TurnContext<'_>) -> Result<(), EngineError> {
    let phase = ctx.phase;
    for bundle in ctx.orders {
        let count = bundle.for_phase(phase).len();
        if count > 0 {
            info!(phase = phase.name(), player = %bundle.player, orders = count, "orders received");
        }
    }
    Ok(())
}

/// Runs `f` over every hull, on the rayon pool when `parallel` is set.
///
/// Results come back in arena order either way.
pub(crate) fn for_each_hull<T, F>(
    hulls: &mut [Hull],
    parallel: bool,
    f: F,
) -> Result<Vec<T>, EngineError>
where
    T: Send,
    F: Fn(&mut Hull) -> Result<T, EngineError> + Sync + Send,
{
    if parallel {
        hulls.par_iter_mut().map(f).collect()
    } else {
        hulls.iter_mut().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_table_matches_discriminants() {
        for (i, phase) in ALL_PHASES.iter().enumerate() {
            assert_eq!(*phase as usize, i);
        }
    }

    #[test]
    fn name_roundtrip() {
        for phase in ALL_PHASES {
            assert_eq!(Phase::from_name(phase.name()), Some(phase));
        }
        assert_eq!(Phase::from_name(" Life-Support "), Some(Phase::LifeSupport));
        assert_eq!(Phase::from_name("banking"), None);
    }

    #[test]
    fn implemented_phases() {
        let implemented: Vec<&str> = ALL_PHASES
            .iter()
            .filter(|p| p.is_implemented())
            .map(|p| p.name())
            .collect();
        assert_eq!(
            implemented,
            vec![
                "fuel-allocation",
                "life-support",
                "assembly",
                "retool",
                "control",
                "farm-production",
                "mine-production",
                "factory-production",
            ]
        );
        assert!(!Phase::Combat.is_implemented());
        assert!(!Phase::Movement.is_implemented());
    }

    #[test]
    fn phase_serializes_by_name() {
        let json = serde_json::to_string(&Phase::FactoryProduction).unwrap();
        assert_eq!(json, "\"factory-production\"");
    }
}
