//! Unit kinds and catalog entries.
//!
//! Every item in the game, from raw fuel to hyper drives, is a unit. Kinds
//! are enumerated here together with a compile-time metadata table indexed
//! by the `UnitKind` discriminant: catalog code prefix, order-language
//! keyword, whether the kind is tech-levelled, and the labor crew each
//! active unit needs.

use serde::{Deserialize, Serialize};

/// The number of unit kinds.
pub const UNIT_KIND_COUNT: usize = 17;

/// Highest tech level a unit can be built at.
pub const MAX_TECH_LEVEL: u8 = 10;

/// The kind of a unit.
///
/// The `#[repr(u8)]` attribute enables use as an index into `UNIT_KIND_INFO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum UnitKind {
    Fuel = 0,
    Metallic = 1,
    NonMetallic = 2,
    Gold = 3,
    Food = 4,
    Factory = 5,
    Farm = 6,
    Mine = 7,
    LifeSupport = 8,
    Structural = 9,
    ConsumerGoods = 10,
    Research = 11,
    HyperDrive = 12,
    Sensor = 13,
    SpaceDrive = 14,
    Transport = 15,
    Automation = 16,
}

/// All unit kinds in index order.
pub const ALL_UNIT_KINDS: [UnitKind; UNIT_KIND_COUNT] = [
    UnitKind::Fuel,
    UnitKind::Metallic,
    UnitKind::NonMetallic,
    UnitKind::Gold,
    UnitKind::Food,
    UnitKind::Factory,
    UnitKind::Farm,
    UnitKind::Mine,
    UnitKind::LifeSupport,
    UnitKind::Structural,
    UnitKind::ConsumerGoods,
    UnitKind::Research,
    UnitKind::HyperDrive,
    UnitKind::Sensor,
    UnitKind::SpaceDrive,
    UnitKind::Transport,
    UnitKind::Automation,
];

/// Labor an active unit ties up for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Crew {
    pub professionals: u64,
    pub unskilled: u64,
}

impl Crew {
    /// No labor required.
    pub const NONE: Crew = Crew {
        professionals: 0,
        unskilled: 0,
    };

    /// One professional and three unskilled workers per unit.
    pub const PRODUCTION: Crew = Crew {
        professionals: 1,
        unskilled: 3,
    };
}

/// Static metadata for a unit kind.
pub struct UnitKindInfo {
    /// Catalog code prefix, e.g. `FRM` for `FRM-2`.
    pub prefix: &'static str,
    /// Order-language keyword, if orders may name this kind.
    pub keyword: Option<&'static str>,
    /// Tech-levelled kinds carry a `-<n>` suffix in codes and keywords.
    pub tech_levelled: bool,
    pub crew: Crew,
}

/// Compile-time lookup table: index by `UnitKind as usize`.
pub static UNIT_KIND_INFO: [UnitKindInfo; UNIT_KIND_COUNT] = [
    UnitKindInfo { prefix: "FUEL", keyword: None, tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "METS", keyword: None, tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "NMTS", keyword: None, tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "GOLD", keyword: None, tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "FOOD", keyword: None, tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "FCT", keyword: Some("factory"), tech_levelled: true, crew: Crew::PRODUCTION },
    UnitKindInfo { prefix: "FRM", keyword: Some("farm"), tech_levelled: true, crew: Crew::PRODUCTION },
    UnitKindInfo { prefix: "MIN", keyword: Some("mine"), tech_levelled: true, crew: Crew::PRODUCTION },
    UnitKindInfo { prefix: "LSP", keyword: None, tech_levelled: true, crew: Crew::NONE },
    UnitKindInfo { prefix: "STU", keyword: Some("structural"), tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "CNGD", keyword: Some("consumer-goods"), tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "RSCH", keyword: Some("research"), tech_levelled: false, crew: Crew::NONE },
    UnitKindInfo { prefix: "HYD", keyword: Some("hyper-drive"), tech_levelled: true, crew: Crew::NONE },
    UnitKindInfo { prefix: "SEN", keyword: Some("sensor"), tech_levelled: true, crew: Crew::NONE },
    UnitKindInfo { prefix: "SPD", keyword: Some("space-drive"), tech_levelled: true, crew: Crew::NONE },
    UnitKindInfo { prefix: "TPT", keyword: Some("transport"), tech_levelled: true, crew: Crew::NONE },
    UnitKindInfo { prefix: "AUT", keyword: Some("automation"), tech_levelled: true, crew: Crew::NONE },
];

impl UnitKind {
    /// Returns the catalog code prefix.
    pub const fn prefix(self) -> &'static str {
        UNIT_KIND_INFO[self as usize].prefix
    }

    /// Returns the order-language keyword, without any tech suffix.
    pub const fn keyword(self) -> Option<&'static str> {
        UNIT_KIND_INFO[self as usize].keyword
    }

    /// Returns true if codes for this kind carry a tech level.
    pub const fn is_tech_levelled(self) -> bool {
        UNIT_KIND_INFO[self as usize].tech_levelled
    }

    /// Returns the labor each active unit of this kind needs.
    pub const fn crew(self) -> Crew {
        UNIT_KIND_INFO[self as usize].crew
    }

    /// Builds the catalog code for this kind at a tech level.
    ///
    /// The tech level is ignored for kinds that are not tech-levelled.
    pub fn code(self, tech_level: u8) -> String {
        if self.is_tech_levelled() {
            format!("{}-{}", self.prefix(), tech_level)
        } else {
            self.prefix().to_string()
        }
    }

    /// Looks up a kind by its order-language keyword (no tech suffix).
    pub fn from_keyword(keyword: &str) -> Option<UnitKind> {
        ALL_UNIT_KINDS
            .iter()
            .copied()
            .find(|k| k.keyword() == Some(keyword))
    }
}

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub code: String,
    pub kind: UnitKind,
    #[serde(default)]
    pub tech_level: u8,
    /// Fuel burned per active unit per turn.
    #[serde(default)]
    pub fuel: f64,
    /// Metallic material per active unit per turn.
    #[serde(default)]
    pub metallic: f64,
    /// Non-metallic material per active unit per turn.
    #[serde(default)]
    pub non_metallic: f64,
    #[serde(default)]
    pub mass: f64,
    #[serde(default)]
    pub volume: f64,
    /// Finished units per active unit per year, for kinds that manufacture.
    #[serde(default)]
    pub rate: Option<f64>,
}

impl Unit {
    /// Labor each active unit needs.
    pub fn crew(&self) -> Crew {
        self.kind.crew()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_table_matches_discriminants() {
        for (i, kind) in ALL_UNIT_KINDS.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(UnitKind::from_keyword("factory"), Some(UnitKind::Factory));
        assert_eq!(UnitKind::from_keyword("consumer-goods"), Some(UnitKind::ConsumerGoods));
        assert_eq!(UnitKind::from_keyword("space-drive"), Some(UnitKind::SpaceDrive));
        assert_eq!(UnitKind::from_keyword("fuel"), None);
        assert_eq!(UnitKind::from_keyword("life-support"), None);
    }

    #[test]
    fn codes_carry_tech_only_when_levelled() {
        assert_eq!(UnitKind::Farm.code(2), "FRM-2");
        assert_eq!(UnitKind::LifeSupport.code(7), "LSP-7");
        assert_eq!(UnitKind::Structural.code(3), "STU");
        assert_eq!(UnitKind::Fuel.code(0), "FUEL");
    }

    #[test]
    fn production_kinds_need_crew() {
        assert_eq!(UnitKind::Farm.crew(), Crew::PRODUCTION);
        assert_eq!(UnitKind::Mine.crew(), Crew::PRODUCTION);
        assert_eq!(UnitKind::Factory.crew(), Crew::PRODUCTION);
        assert_eq!(UnitKind::LifeSupport.crew(), Crew::NONE);
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&UnitKind::ConsumerGoods).unwrap();
        assert_eq!(json, "\"consumer-goods\"");
        let kind: UnitKind = serde_json::from_str("\"life-support\"").unwrap();
        assert_eq!(kind, UnitKind::LifeSupport);
    }
}
