//! Galaxy representation and game-state types.
//!
//! Contains the arenas of players, systems, planets, deposits and hulls,
//! the per-hull population and production records, and the starter-galaxy
//! generator.

pub mod generate;
pub mod group;
pub mod hull;
pub mod ids;
pub mod population;
pub mod state;

pub use generate::{generate, GenerateOptions};
pub use group::{FactoryGroup, FarmGroup, MineGroup, StageBuffer, UnitGroup, STAGE_COUNT};
pub use hull::{ColonyKind, Hull, HullKind, HullUnit, InventoryUnit, Pools};
pub use ids::{DepositId, HullId, InvalidId, PlanetId, PlayerId, SystemId};
pub use population::{
    PayRates, Population, PopulationClass, RationRates, ALL_POPULATION_CLASSES,
    POPULATION_CLASS_COUNT,
};
pub use state::{Deposit, Galaxy, GalaxyError, Planet, PlanetKind, Player, StarSystem};
