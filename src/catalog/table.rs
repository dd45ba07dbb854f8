//! The unit catalog: a read-only table of every unit code in the game.
//!
//! The engine never loads or mutates the catalog itself; callers build one
//! (usually with `UnitCatalog::builtin`) and pass it by reference into each
//! turn.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::unit::{Unit, UnitKind, ALL_UNIT_KINDS, MAX_TECH_LEVEL};

/// Errors raised while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse unit catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read unit catalog from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("duplicate unit code '{0}'")]
    Duplicate(String),

    #[error("unknown unit code '{0}'")]
    UnknownUnit(String),
}

/// Per-tech-level costs for the builtin catalog.
struct BaseCosts {
    kind: UnitKind,
    fuel: f64,
    metallic: f64,
    non_metallic: f64,
    mass: f64,
    /// Cargo space per unit when stowed.
    volume: f64,
    rate: Option<f64>,
}

/// Builtin cost table. Tech-levelled kinds scale every figure by the tech
/// level; the rest use the figures as given.
const BASE_COSTS: &[BaseCosts] = &[
    BaseCosts { kind: UnitKind::Fuel, fuel: 0.0, metallic: 0.0, non_metallic: 0.0, mass: 1.0, volume: 1.0, rate: None },
    BaseCosts { kind: UnitKind::Metallic, fuel: 0.0, metallic: 0.0, non_metallic: 0.0, mass: 1.0, volume: 1.0, rate: None },
    BaseCosts { kind: UnitKind::NonMetallic, fuel: 0.0, metallic: 0.0, non_metallic: 0.0, mass: 1.0, volume: 1.0, rate: None },
    BaseCosts { kind: UnitKind::Gold, fuel: 0.0, metallic: 0.0, non_metallic: 0.0, mass: 1.0, volume: 1.0, rate: None },
    BaseCosts { kind: UnitKind::Food, fuel: 0.0, metallic: 0.0, non_metallic: 0.0, mass: 6.0, volume: 6.0, rate: None },
    BaseCosts { kind: UnitKind::Factory, fuel: 0.5, metallic: 8.0, non_metallic: 4.0, mass: 12.0, volume: 24.0, rate: Some(20.0) },
    BaseCosts { kind: UnitKind::Farm, fuel: 0.5, metallic: 4.0, non_metallic: 2.0, mass: 6.0, volume: 12.0, rate: None },
    BaseCosts { kind: UnitKind::Mine, fuel: 0.5, metallic: 5.0, non_metallic: 5.0, mass: 10.0, volume: 20.0, rate: None },
    BaseCosts { kind: UnitKind::LifeSupport, fuel: 1.0, metallic: 3.0, non_metallic: 5.0, mass: 8.0, volume: 16.0, rate: None },
    BaseCosts { kind: UnitKind::Structural, fuel: 0.0, metallic: 0.1, non_metallic: 0.1, mass: 0.5, volume: 0.5, rate: None },
    BaseCosts { kind: UnitKind::ConsumerGoods, fuel: 0.0, metallic: 0.2, non_metallic: 0.4, mass: 0.6, volume: 0.6, rate: None },
    BaseCosts { kind: UnitKind::Research, fuel: 0.0, metallic: 0.0, non_metallic: 0.0, mass: 0.0, volume: 0.0, rate: None },
    BaseCosts { kind: UnitKind::HyperDrive, fuel: 0.0, metallic: 25.0, non_metallic: 20.0, mass: 45.0, volume: 45.0, rate: None },
    BaseCosts { kind: UnitKind::Sensor, fuel: 0.05, metallic: 10.0, non_metallic: 20.0, mass: 40.0, volume: 40.0, rate: None },
    BaseCosts { kind: UnitKind::SpaceDrive, fuel: 0.0, metallic: 15.0, non_metallic: 10.0, mass: 25.0, volume: 25.0, rate: None },
    BaseCosts { kind: UnitKind::Transport, fuel: 0.1, metallic: 3.0, non_metallic: 1.0, mass: 4.0, volume: 8.0, rate: None },
    BaseCosts { kind: UnitKind::Automation, fuel: 0.0, metallic: 2.0, non_metallic: 2.0, mass: 4.0, volume: 4.0, rate: None },
];

/// Read-only mapping from unit code to catalog entry.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: BTreeMap<String, Unit>,
}

impl UnitCatalog {
    /// Builds a catalog from a list of units, rejecting duplicate codes.
    pub fn from_units(units: Vec<Unit>) -> Result<Self, CatalogError> {
        let mut table = BTreeMap::new();
        for unit in units {
            if table.contains_key(&unit.code) {
                return Err(CatalogError::Duplicate(unit.code));
            }
            table.insert(unit.code.clone(), unit);
        }
        Ok(UnitCatalog { units: table })
    }

    /// The builtin catalog: every kind, every tech level from 1 to 10.
    pub fn builtin() -> Self {
        let mut units = BTreeMap::new();
        for base in BASE_COSTS {
            if base.kind.is_tech_levelled() {
                for tech in 1..=MAX_TECH_LEVEL {
                    let unit = scaled_unit(base, tech);
                    units.insert(unit.code.clone(), unit);
                }
            } else {
                let unit = scaled_unit(base, 0);
                units.insert(unit.code.clone(), unit);
            }
        }
        debug_assert_eq!(BASE_COSTS.len(), ALL_UNIT_KINDS.len());
        UnitCatalog { units }
    }

    /// Parses a JSON array of units.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let units: Vec<Unit> = serde_json::from_str(json)?;
        Self::from_units(units)
    }

    /// Reads a JSON array of units from a file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Looks up a unit by code.
    pub fn get(&self, code: &str) -> Option<&Unit> {
        self.units.get(code)
    }

    /// Looks up a unit by code, failing on an unknown code.
    pub fn require(&self, code: &str) -> Result<&Unit, CatalogError> {
        self.units
            .get(code)
            .ok_or_else(|| CatalogError::UnknownUnit(code.to_string()))
    }

    /// Looks up the unit of a kind at a tech level.
    pub fn by_kind(&self, kind: UnitKind, tech_level: u8) -> Option<&Unit> {
        self.units.get(&kind.code(tech_level))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn scaled_unit(base: &BaseCosts, tech: u8) -> Unit {
    let scale = if base.kind.is_tech_levelled() {
        f64::from(tech)
    } else {
        1.0
    };
    Unit {
        code: base.kind.code(tech),
        kind: base.kind,
        tech_level: tech,
        fuel: base.fuel * scale,
        metallic: base.metallic * scale,
        non_metallic: base.non_metallic * scale,
        mass: base.mass * scale,
        volume: base.volume * scale,
        rate: base.rate.map(|r| r * scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_tech_level() {
        let catalog = UnitCatalog::builtin();
        for tech in 1..=MAX_TECH_LEVEL {
            assert!(catalog.get(&format!("FRM-{}", tech)).is_some());
            assert!(catalog.get(&format!("LSP-{}", tech)).is_some());
        }
        assert!(catalog.get("FRM-11").is_none());
        assert!(catalog.get("FUEL").is_some());
        let levelled = ALL_UNIT_KINDS.iter().filter(|k| k.is_tech_levelled()).count();
        let bare = ALL_UNIT_KINDS.len() - levelled;
        assert_eq!(catalog.len(), levelled * MAX_TECH_LEVEL as usize + bare);
    }

    #[test]
    fn builtin_scales_with_tech() {
        let catalog = UnitCatalog::builtin();
        let fct1 = catalog.require("FCT-1").unwrap();
        let fct3 = catalog.require("FCT-3").unwrap();
        assert_eq!(fct1.tech_level, 1);
        assert_eq!(fct3.fuel, fct1.fuel * 3.0);
        assert_eq!(fct3.rate, Some(60.0));
        assert_eq!(fct1.mass, 12.0);
        assert_eq!(fct1.volume, 24.0);
        assert_eq!(fct3.volume, 72.0);
        let stu = catalog.require("STU").unwrap();
        assert_eq!(stu.tech_level, 0);
    }

    #[test]
    fn require_unknown_fails() {
        let catalog = UnitCatalog::builtin();
        let err = catalog.require("WARP-9").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownUnit(code) if code == "WARP-9"));
    }

    #[test]
    fn by_kind_builds_code() {
        let catalog = UnitCatalog::builtin();
        assert_eq!(catalog.by_kind(UnitKind::Mine, 2).unwrap().code, "MIN-2");
        assert_eq!(catalog.by_kind(UnitKind::Research, 5).unwrap().code, "RSCH");
    }

    #[test]
    fn from_json_loads_units() {
        let json = r#"[
            {"code": "LSP-1", "kind": "life-support", "tech_level": 1, "fuel": 2.0},
            {"code": "FUEL", "kind": "fuel"}
        ]"#;
        let catalog = UnitCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.require("LSP-1").unwrap().fuel, 2.0);
        assert_eq!(catalog.require("FUEL").unwrap().rate, None);
    }

    #[test]
    fn from_json_rejects_duplicates() {
        let json = r#"[
            {"code": "FUEL", "kind": "fuel"},
            {"code": "FUEL", "kind": "fuel"}
        ]"#;
        let err = UnitCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(_)));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            UnitCatalog::from_json_str("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
