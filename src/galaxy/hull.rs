//! Colonies and ships.
//!
//! Both are hulls: a fixed structure of hull-units, a cargo inventory, a
//! population, and the production groups the owner has assembled.

use serde::{Deserialize, Serialize};

use super::group::{FactoryGroup, FarmGroup, MineGroup};
use super::ids::{HullId, PlanetId, PlayerId};
use super::population::{PayRates, Population, RationRates};

/// Where and how a colony is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColonyKind {
    /// On the surface, breathing the planet's atmosphere.
    Open,
    /// On the surface, sealed from the environment.
    Enclosed,
    /// In orbit around the planet.
    Orbital,
}

/// The kind of a hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HullKind {
    Colony(ColonyKind),
    Ship,
}

/// Fixed structure built into a hull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HullUnit {
    pub unit: String,
    pub quantity: u64,
}

/// Cargo carried by a hull.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUnit {
    pub unit: String,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub stowed: u64,
}

impl InventoryUnit {
    pub fn total(&self) -> u64 {
        self.active + self.stowed
    }
}

/// Resources a hull can still spend this turn.
///
/// Rebuilt at the start of every turn and never persisted. Allocation only
/// ever draws these down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pools {
    pub fuel: u64,
    pub professionals: u64,
    pub unskilled: u64,
    /// Set once fuel-allocation has tallied the fuel inventory.
    pub fuel_tallied: bool,
}

/// A colony or ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hull {
    pub id: HullId,
    #[serde(default)]
    pub name: String,
    pub kind: HullKind,
    #[serde(default)]
    pub owner: Option<PlayerId>,
    /// The planet a colony sits on or orbits, or where a ship is docked.
    #[serde(default)]
    pub planet: Option<PlanetId>,
    #[serde(default)]
    pub hull_units: Vec<HullUnit>,
    #[serde(default)]
    pub inventory: Vec<InventoryUnit>,
    #[serde(default)]
    pub population: Population,
    #[serde(default)]
    pub pay: PayRates,
    #[serde(default)]
    pub rations: RationRates,
    #[serde(default)]
    pub factory_groups: Vec<FactoryGroup>,
    #[serde(default)]
    pub farm_groups: Vec<FarmGroup>,
    #[serde(default)]
    pub mine_groups: Vec<MineGroup>,
    #[serde(skip)]
    pub pools: Pools,
}

impl Hull {
    /// Creates an empty, unowned hull.
    pub fn new(id: HullId, kind: HullKind) -> Self {
        Hull {
            id,
            name: String::new(),
            kind,
            owner: None,
            planet: None,
            hull_units: Vec::new(),
            inventory: Vec::new(),
            population: Population::default(),
            pay: PayRates::default(),
            rations: RationRates::default(),
            factory_groups: Vec::new(),
            farm_groups: Vec::new(),
            mine_groups: Vec::new(),
            pools: Pools::default(),
        }
    }

    /// True for ships and for enclosed or orbital colonies.
    pub fn needs_life_support(&self) -> bool {
        !matches!(self.kind, HullKind::Colony(ColonyKind::Open))
    }

    pub fn is_orbital(&self) -> bool {
        self.kind == HullKind::Colony(ColonyKind::Orbital)
    }

    /// Resets the per-turn pools from the current population.
    pub fn reset_pools(&mut self) {
        self.pools = Pools {
            fuel: 0,
            professionals: self.population.professional,
            unskilled: self.population.unskilled,
            fuel_tallied: false,
        };
    }

    /// Adds `quantity` of a unit to stowed cargo, opening a new line if needed.
    pub fn stow(&mut self, unit: &str, quantity: u64) {
        if quantity == 0 {
            return;
        }
        match self.inventory.iter_mut().find(|line| line.unit == unit) {
            Some(line) => line.stowed += quantity,
            None => self.inventory.push(InventoryUnit {
                unit: unit.to_string(),
                active: 0,
                stowed: quantity,
            }),
        }
    }

    /// Total quantity of a unit held in cargo across all lines.
    pub fn inventory_total(&self, unit: &str) -> u64 {
        self.inventory
            .iter()
            .filter(|line| line.unit == unit)
            .map(InventoryUnit::total)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_support_applies_to_sealed_hulls() {
        let open = Hull::new(HullId::Colony(1), HullKind::Colony(ColonyKind::Open));
        let enclosed = Hull::new(HullId::Colony(2), HullKind::Colony(ColonyKind::Enclosed));
        let orbital = Hull::new(HullId::Colony(3), HullKind::Colony(ColonyKind::Orbital));
        let ship = Hull::new(HullId::Ship(1), HullKind::Ship);
        assert!(!open.needs_life_support());
        assert!(enclosed.needs_life_support());
        assert!(orbital.needs_life_support());
        assert!(ship.needs_life_support());
        assert!(orbital.is_orbital());
        assert!(!ship.is_orbital());
    }

    #[test]
    fn stow_merges_into_existing_line() {
        let mut hull = Hull::new(HullId::Ship(1), HullKind::Ship);
        hull.stow("FOOD", 10);
        hull.stow("FOOD", 5);
        hull.stow("METS", 0);
        assert_eq!(hull.inventory.len(), 1);
        assert_eq!(hull.inventory_total("FOOD"), 15);
        assert_eq!(hull.inventory_total("METS"), 0);
    }

    #[test]
    fn reset_pools_reads_population() {
        let mut hull = Hull::new(HullId::Colony(1), HullKind::Colony(ColonyKind::Open));
        hull.population.professional = 40;
        hull.population.unskilled = 120;
        hull.pools.fuel = 99;
        hull.pools.fuel_tallied = true;
        hull.reset_pools();
        assert_eq!(
            hull.pools,
            Pools {
                fuel: 0,
                professionals: 40,
                unskilled: 120,
                fuel_tallied: false
            }
        );
    }

    #[test]
    fn hull_kind_serialization() {
        let json = serde_json::to_string(&HullKind::Colony(ColonyKind::Orbital)).unwrap();
        assert_eq!(json, r#"{"colony":"orbital"}"#);
        let json = serde_json::to_string(&HullKind::Ship).unwrap();
        assert_eq!(json, r#""ship""#);
    }
}
