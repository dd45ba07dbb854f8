//! Turn resolution.
//!
//! Phase handlers and the pieces they are built from: the fuel and labor
//! allocator, the production pipeline, production rates, life support,
//! control orders, and end-of-turn bookkeeping.

pub mod allocate;
pub mod bookkeeping;
pub mod control;
pub mod life_support;
pub mod phase;
pub mod pipeline;
pub mod production;
pub mod rates;

pub use allocate::{allocate, is_solar_powered, tally_fuel, Allocation, Demand};
pub use bookkeeping::{collapse_fuel, finish_turn, natural_deaths};
pub use control::{apply_order, ControlError};
pub use life_support::{support_hull, LifeSupportOutcome};
pub use phase::{Phase, PhaseHandler, PhaseInfo, TurnContext, ALL_PHASES, PHASE_COUNT, PHASE_INFO};
pub use pipeline::{Advance, Yield};
pub use production::{produce_factories, produce_farms, produce_mines, Delivery, GroupKind};
pub use rates::{ProductionRates, StandardRates, TURNS_PER_YEAR};
