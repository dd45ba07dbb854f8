//! Unit catalog.
//!
//! Static reference data for every unit code: kind, tech level, running
//! costs, and mass. Read-only during turn resolution.

pub mod table;
pub mod unit;

pub use table::{CatalogError, UnitCatalog};
pub use unit::{Crew, Unit, UnitKind, ALL_UNIT_KINDS, MAX_TECH_LEVEL, UNIT_KIND_COUNT};
