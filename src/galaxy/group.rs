//! Production groups: farms, mines, and factories.
//!
//! A group is one or more unit-groups working toward a single output. Work
//! in progress sits in a 4-slot stage buffer holding quantities at 25, 50,
//! 75 and 100 percent completion.

use serde::{Deserialize, Serialize};

use super::ids::DepositId;

/// Number of stages in a production pipeline.
pub const STAGE_COUNT: usize = 4;

/// Work in progress for a production group.
///
/// `stages[0]` is 25% complete and `stages[3]` is finished output awaiting
/// delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageBuffer {
    pub stages: [u64; STAGE_COUNT],
}

impl StageBuffer {
    pub const fn new(stages: [u64; STAGE_COUNT]) -> Self {
        StageBuffer { stages }
    }

    /// Sum of all four slots.
    pub fn total(&self) -> u64 {
        self.stages.iter().sum()
    }

    /// Empties the finished slot, returning what was in it.
    pub fn take_finished(&mut self) -> u64 {
        std::mem::take(&mut self.stages[STAGE_COUNT - 1])
    }
}

/// A cluster of identical units within a production group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGroup {
    /// Catalog code, e.g. `FRM-2`.
    pub unit: String,
    /// Desired active quantity.
    pub quantity: u64,
}

impl UnitGroup {
    pub fn new(unit: impl Into<String>, quantity: u64) -> Self {
        UnitGroup {
            unit: unit.into(),
            quantity,
        }
    }
}

/// Farms producing food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmGroup {
    pub id: u32,
    pub units: Vec<UnitGroup>,
    #[serde(default)]
    pub stages: StageBuffer,
}

/// Mines extracting from a deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineGroup {
    pub id: u32,
    pub deposit: DepositId,
    pub units: Vec<UnitGroup>,
    #[serde(default)]
    pub stages: StageBuffer,
}

/// Factories manufacturing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryGroup {
    pub id: u32,
    /// Catalog code of the product.
    pub product: String,
    pub units: Vec<UnitGroup>,
    #[serde(default)]
    pub stages: StageBuffer,
}
