//! Seeded construction of a starter galaxy.
//!
//! Builds a cluster of star systems, scatters planets and deposits, and sets
//! each player up with a home colony, an orbital colony above it, and one
//! ship. The same seed always yields the same galaxy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::group::{FactoryGroup, FarmGroup, MineGroup, UnitGroup};
use super::hull::{ColonyKind, Hull, HullKind, HullUnit, InventoryUnit};
use super::ids::{DepositId, HullId, PlanetId, PlayerId, SystemId};
use super::population::Population;
use super::state::{Deposit, Galaxy, GalaxyError, Planet, PlanetKind, Player, StarSystem};
use crate::catalog::UnitKind;

/// Orbit of every home planet.
const HOME_ORBIT: u8 = 3;

/// Largest galaxy `generate` will build.
pub const MAX_SYSTEMS: u32 = 100_000;

/// Knobs for `generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub players: u32,
    /// Systems created per player; the first `players` systems are homes.
    pub systems_per_player: u32,
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            players: 4,
            systems_per_player: 6,
            seed: 1,
        }
    }
}

impl GenerateOptions {
    /// Total systems to create, or an error if the options are unusable.
    pub fn system_count(&self) -> Result<u32, GalaxyError> {
        if self.players == 0 {
            return Err(GalaxyError::NoPlayers);
        }
        self.players
            .checked_mul(self.systems_per_player.max(1))
            .filter(|&count| count <= MAX_SYSTEMS)
            .ok_or(GalaxyError::TooManySystems {
                players: self.players,
                systems_per_player: self.systems_per_player,
                max: MAX_SYSTEMS,
            })
    }
}

/// Builds a new galaxy at turn 0.
pub fn generate(options: &GenerateOptions) -> Result<Galaxy, GalaxyError> {
    let system_count = options.system_count()?;
    let mut rng = SmallRng::seed_from_u64(options.seed);
    let mut galaxy = Galaxy::new();
    let radius = (system_count as f64).cbrt().ceil() as i32 * 4;

    for s in 0..system_count {
        let system = SystemId(s);
        galaxy.systems.push(StarSystem {
            id: system,
            x: rng.gen_range(-radius..=radius),
            y: rng.gen_range(-radius..=radius),
            z: rng.gen_range(-radius..=radius),
        });
        let is_home = s < options.players;
        let planet_count = if is_home { 5 } else { rng.gen_range(1..=10) };
        for orbit in 1..=planet_count {
            let id = PlanetId(galaxy.planets.len() as u32);
            let home_planet = is_home && orbit == HOME_ORBIT;
            let kind = if home_planet {
                PlanetKind::Terrestrial
            } else {
                random_planet_kind(&mut rng)
            };
            let habitability = match (home_planet, kind) {
                (true, _) => 25,
                (false, PlanetKind::Terrestrial) => rng.gen_range(0..=20),
                _ => 0,
            };
            galaxy.planets.push(Planet {
                id,
                system,
                orbit,
                kind,
                habitability,
            });
            if home_planet {
                for kind in [UnitKind::Fuel, UnitKind::Metallic, UnitKind::NonMetallic] {
                    push_deposit(&mut galaxy, &mut rng, id, kind);
                }
            } else {
                for _ in 0..rng.gen_range(0..=3) {
                    let kind = random_resource(&mut rng);
                    push_deposit(&mut galaxy, &mut rng, id, kind);
                }
            }
        }
    }

    for p in 0..options.players {
        let player = PlayerId(p + 1);
        galaxy.players.push(Player {
            id: player,
            name: format!("player-{}", p + 1),
        });
        let home = galaxy
            .planets
            .iter()
            .find(|planet| planet.system == SystemId(p) && planet.orbit == HOME_ORBIT)
            .map(|planet| planet.id);
        let deposits: Vec<DepositId> = galaxy
            .deposits
            .iter()
            .filter(|d| Some(d.planet) == home)
            .map(|d| d.id)
            .collect();
        galaxy
            .hulls
            .push(home_colony(HullId::Colony(2 * p + 1), player, home, &deposits));
        galaxy
            .hulls
            .push(orbital_colony(HullId::Colony(2 * p + 2), player, home));
        galaxy.hulls.push(starter_ship(HullId::Ship(p + 1), player, home));
    }

    Ok(galaxy)
}

fn random_planet_kind(rng: &mut SmallRng) -> PlanetKind {
    match rng.gen_range(0..10) {
        0..=5 => PlanetKind::Terrestrial,
        6..=7 => PlanetKind::GasGiant,
        _ => PlanetKind::AsteroidBelt,
    }
}

fn random_resource(rng: &mut SmallRng) -> UnitKind {
    match rng.gen_range(0..20) {
        0 => UnitKind::Gold,
        1..=6 => UnitKind::Fuel,
        7..=13 => UnitKind::Metallic,
        _ => UnitKind::NonMetallic,
    }
}

fn push_deposit(galaxy: &mut Galaxy, rng: &mut SmallRng, planet: PlanetId, kind: UnitKind) {
    let id = DepositId(galaxy.deposits.len() as u32 + 1);
    let yield_pct = match kind {
        UnitKind::Gold => rng.gen_range(1..=10),
        _ => rng.gen_range(20..=90),
    };
    galaxy.deposits.push(Deposit {
        id,
        planet,
        kind,
        yield_pct,
        remaining: rng.gen_range(1_000_000..=50_000_000),
    });
}

fn cargo(unit: &str, stowed: u64) -> InventoryUnit {
    InventoryUnit {
        unit: unit.to_string(),
        active: 0,
        stowed,
    }
}

fn structure(unit: &str, quantity: u64) -> HullUnit {
    HullUnit {
        unit: unit.to_string(),
        quantity,
    }
}

fn home_colony(
    id: HullId,
    owner: PlayerId,
    planet: Option<PlanetId>,
    deposits: &[DepositId],
) -> Hull {
    let mut hull = Hull::new(id, HullKind::Colony(ColonyKind::Open));
    hull.name = "Home".to_string();
    hull.owner = Some(owner);
    hull.planet = planet;
    hull.hull_units = vec![structure("STU", 1_000_000)];
    hull.inventory = vec![
        cargo("FUEL", 1_500_000),
        cargo("METS", 5_000_000),
        cargo("NMTS", 5_000_000),
        cargo("FOOD", 2_000_000),
        cargo("CNGD", 500_000),
    ];
    hull.population = Population {
        professional: 1_500_000,
        soldier: 2_500_000,
        unskilled: 6_000_000,
        unemployed: 5_900_000,
        ..Population::default()
    };
    hull.farm_groups = vec![FarmGroup {
        id: 1,
        units: vec![UnitGroup::new("FRM-1", 100_000)],
        stages: Default::default(),
    }];
    hull.mine_groups = deposits
        .iter()
        .enumerate()
        .map(|(i, &deposit)| MineGroup {
            id: i as u32 + 1,
            deposit,
            units: vec![UnitGroup::new("MIN-1", 50_000)],
            stages: Default::default(),
        })
        .collect();
    hull.factory_groups = vec![FactoryGroup {
        id: 1,
        product: "CNGD".to_string(),
        units: vec![UnitGroup::new("FCT-1", 50_000)],
        stages: Default::default(),
    }];
    hull
}

fn orbital_colony(id: HullId, owner: PlayerId, planet: Option<PlanetId>) -> Hull {
    let mut hull = Hull::new(id, HullKind::Colony(ColonyKind::Orbital));
    hull.name = "Orbital".to_string();
    hull.owner = Some(owner);
    hull.planet = planet;
    hull.hull_units = vec![structure("STU", 200_000), structure("LSP-1", 60_000)];
    hull.inventory = vec![cargo("FUEL", 1_000_000), cargo("FOOD", 100_000)];
    hull.population = Population {
        professional: 10_000,
        soldier: 5_000,
        unskilled: 30_000,
        unemployed: 5_000,
        ..Population::default()
    };
    hull.farm_groups = vec![FarmGroup {
        id: 1,
        units: vec![UnitGroup::new("FRM-2", 5_000)],
        stages: Default::default(),
    }];
    hull
}

fn starter_ship(id: HullId, owner: PlayerId, planet: Option<PlanetId>) -> Hull {
    let mut hull = Hull::new(id, HullKind::Ship);
    hull.name = "Pathfinder".to_string();
    hull.owner = Some(owner);
    hull.planet = planet;
    hull.hull_units = vec![
        structure("STU", 5_000),
        structure("HYD-1", 10),
        structure("SPD-1", 10),
        structure("SEN-1", 2),
        structure("LSP-1", 100),
    ];
    hull.inventory = vec![cargo("FUEL", 10_000), cargo("FOOD", 1_000)];
    hull.population = Population {
        professional: 50,
        soldier: 20,
        unskilled: 30,
        ..Population::default()
    };
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitCatalog;

    #[test]
    fn same_seed_same_galaxy() {
        let options = GenerateOptions::default();
        assert_eq!(generate(&options).unwrap(), generate(&options).unwrap());
    }

    #[test]
    fn different_seed_different_galaxy() {
        let a = generate(&GenerateOptions::default()).unwrap();
        let b = generate(&GenerateOptions {
            seed: 2,
            ..GenerateOptions::default()
        })
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn every_player_gets_three_hulls() {
        let galaxy = generate(&GenerateOptions {
            players: 3,
            systems_per_player: 2,
            seed: 9,
        })
        .unwrap();
        assert_eq!(galaxy.players.len(), 3);
        assert_eq!(galaxy.systems.len(), 6);
        for player in &galaxy.players {
            assert_eq!(galaxy.hulls_owned_by(player.id).count(), 3);
        }
    }

    #[test]
    fn home_colony_mines_home_deposits() {
        let galaxy = generate(&GenerateOptions::default()).unwrap();
        let home = galaxy.hull(HullId::Colony(1)).unwrap();
        assert_eq!(home.mine_groups.len(), 3);
        for group in &home.mine_groups {
            let deposit = galaxy.deposit(group.deposit).unwrap();
            assert_eq!(Some(deposit.planet), home.planet);
        }
        let planet = galaxy.planet(home.planet.unwrap()).unwrap();
        assert_eq!(planet.orbit, HOME_ORBIT);
    }

    #[test]
    fn generated_units_exist_in_builtin_catalog() {
        let catalog = UnitCatalog::builtin();
        let galaxy = generate(&GenerateOptions::default()).unwrap();
        for hull in &galaxy.hulls {
            for unit in &hull.hull_units {
                assert!(catalog.get(&unit.unit).is_some(), "{}", unit.unit);
            }
            for line in &hull.inventory {
                assert!(catalog.get(&line.unit).is_some(), "{}", line.unit);
            }
        }
    }

    #[test]
    fn generated_galaxy_survives_json() {
        let galaxy = generate(&GenerateOptions::default()).unwrap();
        let json = galaxy.to_json_string().unwrap();
        assert_eq!(Galaxy::from_json_str(&json).unwrap(), galaxy);
    }

    #[test]
    fn oversized_options_are_rejected() {
        let options = GenerateOptions {
            players: u32::MAX,
            systems_per_player: 2,
            seed: 1,
        };
        assert!(matches!(
            generate(&options),
            Err(GalaxyError::TooManySystems { players: u32::MAX, .. })
        ));
        let options = GenerateOptions {
            players: 1_000,
            systems_per_player: 1_000,
            seed: 1,
        };
        assert!(matches!(options.system_count(), Err(GalaxyError::TooManySystems { .. })));
    }

    #[test]
    fn zero_players_is_rejected() {
        let options = GenerateOptions {
            players: 0,
            ..GenerateOptions::default()
        };
        assert!(matches!(generate(&options), Err(GalaxyError::NoPlayers)));
    }
}
