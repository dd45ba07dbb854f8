//! Galaxy state representation.
//!
//! Holds the complete snapshot of a game between turns: players, star
//! systems, planets, deposits, and every colony and ship. Entities live in
//! flat arenas and refer to each other by id.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hull::Hull;
use super::ids::{DepositId, HullId, PlanetId, PlayerId, SystemId};
use crate::catalog::UnitKind;

/// Errors that can occur loading or saving a galaxy.
#[derive(Debug, Error)]
pub enum GalaxyError {
    #[error("failed to parse galaxy: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read galaxy from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write galaxy to {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("duplicate hull id {0}")]
    DuplicateHull(HullId),

    #[error("a galaxy needs at least one player")]
    NoPlayers,

    #[error("{players} players with {systems_per_player} systems each is more than {max} systems")]
    TooManySystems {
        players: u32,
        systems_per_player: u32,
        max: u32,
    },
}

/// A player in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// A star system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Broad planet classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanetKind {
    Terrestrial,
    GasGiant,
    AsteroidBelt,
}

/// A planet, or asteroid belt, in a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub system: SystemId,
    /// Orbit number, 1 closest to the star.
    pub orbit: u8,
    pub kind: PlanetKind,
    #[serde(default)]
    pub habitability: u8,
}

/// A finite natural-resource reserve on a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: DepositId,
    pub planet: PlanetId,
    /// The raw resource mined out: fuel, gold, metallic or non-metallic.
    pub kind: UnitKind,
    /// Share of extracted ore that becomes usable output, 0 to 100.
    pub yield_pct: u8,
    pub remaining: u64,
}

/// The full game state between turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Galaxy {
    pub turn: u32,
    pub players: Vec<Player>,
    pub systems: Vec<StarSystem>,
    pub planets: Vec<Planet>,
    pub deposits: Vec<Deposit>,
    pub hulls: Vec<Hull>,
}

impl Galaxy {
    /// Creates an empty galaxy at turn 0.
    pub fn new() -> Self {
        Galaxy::default()
    }

    /// Parses a galaxy from JSON, rejecting duplicate hull ids.
    pub fn from_json_str(json: &str) -> Result<Self, GalaxyError> {
        let galaxy: Galaxy = serde_json::from_str(json)?;
        galaxy.check_unique_hulls()?;
        Ok(galaxy)
    }

    /// Serializes the galaxy as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, GalaxyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, GalaxyError> {
        let contents = fs::read_to_string(path).map_err(|source| GalaxyError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn write_file(&self, path: &Path) -> Result<(), GalaxyError> {
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|source| GalaxyError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn check_unique_hulls(&self) -> Result<(), GalaxyError> {
        let mut ids: Vec<HullId> = self.hulls.iter().map(|h| h.id).collect();
        ids.sort();
        match ids.windows(2).find(|w| w[0] == w[1]) {
            Some(w) => Err(GalaxyError::DuplicateHull(w[0])),
            None => Ok(()),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id.0 as usize).filter(|p| p.id == id)
    }

    pub fn deposit(&self, id: DepositId) -> Option<&Deposit> {
        self.deposits.iter().find(|d| d.id == id)
    }

    pub fn hull(&self, id: HullId) -> Option<&Hull> {
        self.hulls.iter().find(|h| h.id == id)
    }

    pub fn hull_mut(&mut self, id: HullId) -> Option<&mut Hull> {
        self.hulls.iter_mut().find(|h| h.id == id)
    }

    /// Hulls currently owned by a player, in arena order.
    pub fn hulls_owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Hull> {
        self.hulls.iter().filter(move |h| h.owner == Some(player))
    }
}
